//! Liveness probe for load balancers and the door-scanning kiosks.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Round trip of the probe query. Absent when it failed.
    pub db_latency_ms: Option<u64>,
    /// Whether admins may currently preview tickets of undecided registrations.
    pub ticket_admin_preview: bool,
}

/// GET /health
///
/// 200 when the database answers, 503 otherwise. Lives at the root, not
/// under `/api/v1`.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let probe = eventhub_db::health_check(&state.pool).await;
    let db_latency_ms = probe
        .as_ref()
        .ok()
        .map(|_| started.elapsed().as_millis() as u64);

    if let Err(e) = &probe {
        tracing::warn!(error = %e, "Database health probe failed");
    }

    let db_healthy = probe.is_ok();
    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            db_latency_ms,
            ticket_admin_preview: state.config.ticket_admin_preview,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
