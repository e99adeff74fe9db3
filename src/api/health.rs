use axum::{extract::State, response::Json};
use tracing::debug;

use super::AppState;
use crate::types::HealthReport;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    let report = HealthReport::ok(state.started_at, &state.health.message, &state.health.environment);
    debug!("Health check served, uptime {:.3}s", report.uptime);
    Json(report)
}
