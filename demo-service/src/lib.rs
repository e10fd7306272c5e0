pub mod config;
pub mod handlers;
pub mod services;
pub mod startup;

use services::metrics::DemoMetrics;
use services::latency::LatencySimulator;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<DemoMetrics>,
    pub latency: LatencySimulator,
    pub service_name: String,
}

impl AppState {
    pub fn new(metrics: Arc<DemoMetrics>, latency: LatencySimulator, service_name: String) -> Self {
        Self {
            metrics,
            latency,
            service_name,
        }
    }
}
