//! Request metrics for demo-service.
//!
//! Each [`DemoMetrics`] owns its own Prometheus registry. The binary creates
//! exactly one at startup and shares it through `AppState`; tests create as
//! many isolated instances as they need.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prometheus::{
    Encoder, HistogramOpts, HistogramTimer, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use thiserror::Error;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Default bucket boundaries of the reference Prometheus client libraries.
pub const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics registry error: {0}")]
    Registry(#[from] prometheus::Error),

    #[error("metrics output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Failed to export metrics");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

pub struct DemoMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
}

impl DemoMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(HTTP_REQUESTS_TOTAL, "Total HTTP requests"),
            &["method", "path", "status"],
        )?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(HTTP_REQUEST_DURATION_SECONDS, "Request latency")
                .buckets(LATENCY_BUCKETS.to_vec()),
            &["path"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration,
        })
    }

    pub fn record_request(&self, method: &str, path: &str, status: &str) {
        self.requests_total
            .with_label_values(&[method, path, status])
            .inc();
    }

    pub fn observe_latency(&self, path: &str, seconds: f64) {
        self.request_duration
            .with_label_values(&[path])
            .observe(seconds);
    }

    /// Starts a timer that records into the latency histogram for `path`
    /// when dropped.
    pub fn start_timer(&self, path: &str) -> HistogramTimer {
        self.request_duration
            .with_label_values(&[path])
            .start_timer()
    }

    /// Render every registered family in the text exposition format.
    pub fn export_text(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Value of one exposition line, matched by its full series name.
    fn sample(metrics: &DemoMetrics, series: &str) -> Option<f64> {
        metrics.export_text().unwrap().lines().find_map(|line| {
            line.strip_prefix(series)
                .and_then(|rest| rest.strip_prefix(' '))
                .and_then(|value| value.parse().ok())
        })
    }

    #[test]
    fn counter_series_are_keyed_by_all_three_labels() {
        let metrics = DemoMetrics::new().unwrap();
        metrics.record_request("GET", "/", "200");
        metrics.record_request("GET", "/", "200");
        metrics.record_request("GET", "/error", "500");

        assert_eq!(
            sample(&metrics, r#"http_requests_total{method="GET",path="/",status="200"}"#),
            Some(2.0)
        );
        assert_eq!(
            sample(&metrics, r#"http_requests_total{method="GET",path="/error",status="500"}"#),
            Some(1.0)
        );
        assert_eq!(
            sample(&metrics, r#"http_requests_total{method="GET",path="/",status="500"}"#),
            None
        );
    }

    #[test]
    fn timer_records_on_drop() {
        let metrics = DemoMetrics::new().unwrap();
        {
            let _timer = metrics.start_timer("/");
        }
        assert_eq!(
            sample(&metrics, r#"http_request_duration_seconds_count{path="/"}"#),
            Some(1.0)
        );
        assert_eq!(
            sample(&metrics, r#"http_request_duration_seconds_count{path="/error"}"#),
            None
        );
    }

    #[test]
    fn export_uses_exact_series_names() {
        let metrics = DemoMetrics::new().unwrap();
        metrics.record_request("GET", "/error", "500");
        metrics.observe_latency("/error", 0.12);

        let text = metrics.export_text().unwrap();
        assert!(text.contains("# TYPE http_requests_total counter"));
        assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
        assert!(text.contains(
            r#"http_requests_total{method="GET",path="/error",status="500"} 1"#
        ));
        assert!(text.contains(r#"http_request_duration_seconds_count{path="/error"} 1"#));
        assert!(text.contains(r#"http_request_duration_seconds_bucket{path="/error",le="0.1"} 0"#));
        assert!(text.contains(r#"http_request_duration_seconds_bucket{path="/error",le="0.25"} 1"#));
    }

    #[test]
    fn registries_are_isolated() {
        let first = DemoMetrics::new().unwrap();
        let second = DemoMetrics::new().unwrap();
        first.record_request("GET", "/", "200");

        let series = r#"http_requests_total{method="GET",path="/",status="200"}"#;
        assert_eq!(sample(&first, series), Some(1.0));
        assert_eq!(sample(&second, series), None);
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let metrics = std::sync::Arc::new(DemoMetrics::new().unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = metrics.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        metrics.record_request("GET", "/", "200");
                        metrics.observe_latency("/", 0.05);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            sample(&metrics, r#"http_requests_total{method="GET",path="/",status="200"}"#),
            Some(8000.0)
        );
        assert_eq!(
            sample(&metrics, r#"http_request_duration_seconds_count{path="/"}"#),
            Some(8000.0)
        );
    }
}
