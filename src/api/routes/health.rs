//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (sheet source reachable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 503 while the workbook directory or spreadsheet cannot be reached.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match check_source_health(&state).await {
        true => StatusCode::OK,
        false => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let source_ok = check_source_health(&state).await;

    Json(HealthResponse {
        status: (if source_ok { "healthy" } else { "degraded" }).to_string(),
        source: state.source.name().to_string(),
        source_status: (if source_ok { "ok" } else { "error" }).to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn check_source_health(state: &AppState) -> bool {
    match state.source.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(source = state.source.name(), error = %e, "Sheet source not reachable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
