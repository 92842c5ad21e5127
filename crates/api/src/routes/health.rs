//! Root-level liveness probe.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    /// `"ok"` when everything is reachable, `"degraded"` otherwise.
    status: &'static str,
    /// Crate version from Cargo.toml.
    version: &'static str,
    /// Whether the database answered a ping.
    db_healthy: bool,
}

/// GET /health
///
/// Always 200; a broken database shows up in the body, not the status
/// code, so probes can distinguish "down" from "up but degraded".
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = campus_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mounted at the application root, outside the `/api/v1` prefix.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
