use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

pub const ROOT_PATH: &str = "/";
pub const ERROR_PATH: &str = "/error";

/// Runs the simulated work and records both the latency and the request
/// count on a detached task. A client that disconnects mid-request drops
/// only the await on the join handle, so the two series always agree.
async fn simulate_request(state: &AppState, path: &'static str, status: StatusCode) {
    let metrics = state.metrics.clone();
    let latency = state.latency;

    let work = tokio::spawn(async move {
        let _timer = metrics.start_timer(path);
        let delay = latency.simulate_work().await;
        tracing::debug!(path, delay_ms = delay.as_millis() as u64, "Simulated work done");

        metrics.record_request("GET", path, status.as_str());
    });

    if let Err(e) = work.await {
        tracing::error!(path, "Simulated work task failed: {}", e);
    }
}

/// `GET /`: simulated work, then a fixed success payload.
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    simulate_request(&state, ROOT_PATH, StatusCode::OK).await;
    Json(json!({ "status": "ok" }))
}

/// `GET /error`: same simulated work, then an unconditional 500 with an
/// empty body. Exists to feed the error-rate series.
pub async fn error(State(state): State<AppState>) -> StatusCode {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    simulate_request(&state, ERROR_PATH, status).await;
    status
}
