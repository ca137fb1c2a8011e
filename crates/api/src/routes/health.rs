use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// GET /health -- liveness only; does not touch the store.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Mount health check routes (root-level, NOT under `/v1`, no key required).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
