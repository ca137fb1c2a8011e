pub mod health;
pub mod styles;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Every route below requires the `X-API-Key` header.
///
/// ```text
/// /styles                                  list styles
/// /styles/{style_id}/tracks                style membership
/// /styles/{style_id}/assignments           list, upsert, delete
/// /styles/{style_id}/weights               list, upsert
/// /styles/{style_id}/playback-profile      aggregated profile
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/styles", styles::router())
}
