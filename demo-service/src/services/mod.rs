pub mod latency;
pub mod metrics;

pub use latency::LatencySimulator;
pub use metrics::{DemoMetrics, MetricsError};
