use crate::services::MetricsError;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, MetricsError> {
    let body = state.metrics.export_text()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    ))
}
