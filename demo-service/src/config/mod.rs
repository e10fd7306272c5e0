use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub common: core_config::Config,
    pub demo: DemoSettings,
}

/// Service-specific settings, read from the same sources as the common
/// config (`APP__SERVICE_NAME`, `APP__DELAY_MIN_MS`, `APP__DELAY_MAX_MS`).
#[derive(Debug, Clone, Deserialize)]
pub struct DemoSettings {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Lower bound of the simulated work, inclusive.
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,
    /// Upper bound of the simulated work, exclusive.
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,
}

fn default_service_name() -> String {
    "demo-service".to_string()
}

fn default_delay_min_ms() -> u64 {
    50
}

fn default_delay_max_ms() -> u64 {
    200
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
        }
    }
}

impl DemoSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.delay_min_ms >= self.delay_max_ms {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "delay_min_ms ({}) must be below delay_max_ms ({})",
                self.delay_min_ms,
                self.delay_max_ms
            )));
        }
        Ok(())
    }

    pub fn delay_window(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.delay_min_ms),
            Duration::from_millis(self.delay_max_ms),
        )
    }
}

impl DemoConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;
        let demo: DemoSettings = core_config::load_settings()?;
        demo.validate()?;

        Ok(DemoConfig { common, demo })
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            demo: DemoSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_50_to_200_ms() {
        let settings = DemoSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(
            settings.delay_window(),
            (Duration::from_millis(50), Duration::from_millis(200))
        );
    }

    #[test]
    fn empty_window_is_rejected() {
        let settings = DemoSettings {
            delay_min_ms: 200,
            delay_max_ms: 200,
            ..DemoSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let settings = DemoSettings {
            delay_min_ms: 300,
            delay_max_ms: 100,
            ..DemoSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
