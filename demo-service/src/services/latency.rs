use crate::config::DemoSettings;
use rand::Rng;
use service_core::error::AppError;
use std::time::Duration;

/// Stand-in for real work: suspends the calling task for a duration drawn
/// uniformly from `[min, max)`.
#[derive(Debug, Clone, Copy)]
pub struct LatencySimulator {
    min_nanos: u64,
    max_nanos: u64,
}

impl LatencySimulator {
    pub fn new(min: Duration, max: Duration) -> Result<Self, AppError> {
        if min >= max {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "empty delay window: {:?}..{:?}",
                min,
                max
            )));
        }
        let to_nanos = |bound: Duration| {
            u64::try_from(bound.as_nanos()).map_err(|_| {
                AppError::ConfigError(anyhow::anyhow!(
                    "delay bound {:?} exceeds the supported range",
                    bound
                ))
            })
        };

        Ok(Self {
            min_nanos: to_nanos(min)?,
            max_nanos: to_nanos(max)?,
        })
    }

    pub fn from_settings(settings: &DemoSettings) -> Result<Self, AppError> {
        let (min, max) = settings.delay_window();
        Self::new(min, max)
    }

    pub fn window(&self) -> (Duration, Duration) {
        (
            Duration::from_nanos(self.min_nanos),
            Duration::from_nanos(self.max_nanos),
        )
    }

    pub fn sample(&self) -> Duration {
        let nanos = rand::thread_rng().gen_range(self.min_nanos..self.max_nanos);
        Duration::from_nanos(nanos)
    }

    /// Sleeps for a sampled duration and returns it. Only the current task
    /// is suspended.
    pub async fn simulate_work(&self) -> Duration {
        let delay = self.sample();
        tokio::time::sleep(delay).await;
        delay
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self {
            min_nanos: 50_000_000,
            max_nanos: 200_000_000,
        }
    }
}
