//! Handlers for a style's track membership.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use opus_core::classification::normalize_style_id;

use crate::error::{AppResult, StoreResultExt};
use crate::middleware::internal_key::RequireInternalKey;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum number of tracks returned by the listing.
pub const STYLE_TRACKS_LIMIT: usize = 3000;

/// GET /v1/styles/{style_id}/tracks
///
/// List the style's tracks with their library metadata (`song`, or null).
pub async fn list(
    _key: RequireInternalKey,
    State(state): State<AppState>,
    Path(style_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let style_id = normalize_style_id(Some(&style_id));
    let tracks = state
        .store
        .list_style_tracks(&style_id, STYLE_TRACKS_LIMIT)
        .await
        .context("Failed to fetch style tracks")?;
    Ok(Json(DataResponse { data: tracks }))
}
