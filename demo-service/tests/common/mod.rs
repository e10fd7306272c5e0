#![allow(dead_code)]

use demo_service::config::DemoConfig;
use demo_service::services::{DemoMetrics, LatencySimulator};
use demo_service::startup::Application;
use demo_service::AppState;
use std::sync::Arc;

pub const ROOT_OK_SERIES: &str = r#"http_requests_total{method="GET",path="/",status="200"}"#;
pub const ERROR_SERIES: &str = r#"http_requests_total{method="GET",path="/error",status="500"}"#;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub metrics: Arc<DemoMetrics>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut config = DemoConfig::default();
        config.common.host = "127.0.0.1".to_string();
        config.common.port = 0; // Random port for testing

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let metrics = app.metrics();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            metrics,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn scrape(&self) -> String {
        let response = self.get("/metrics").await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.text().await.expect("Failed to read metrics body")
    }
}

/// State for router-level tests that don't need a listener.
pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(DemoMetrics::new().expect("Failed to build metrics registry")),
        LatencySimulator::default(),
        "demo-service".to_string(),
    )
}

/// Value of the exposition line whose series (name plus labels) is exactly
/// `series`.
pub fn sample_value(exposition: &str, series: &str) -> Option<f64> {
    exposition.lines().find_map(|line| {
        line.strip_prefix(series)
            .and_then(|rest| rest.strip_prefix(' '))
            .and_then(|value| value.trim().parse().ok())
    })
}
