//! Handlers for the `/styles` collection.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppResult, StoreResultExt};
use crate::middleware::internal_key::RequireInternalKey;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /v1/styles
///
/// List all styles ordered by name.
pub async fn list(
    _key: RequireInternalKey,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let styles = state
        .store
        .list_styles()
        .await
        .context("Failed to fetch styles")?;
    Ok(Json(DataResponse { data: styles }))
}
