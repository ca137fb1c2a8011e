//! Route definitions for styles and their classification data.

use axum::routing::get;
use axum::Router;

use crate::handlers::{self, assignments, playback_profile, styles, tracks, weights};
use crate::state::AppState;

/// Routes mounted at `/styles`.
///
/// ```text
/// GET    /                             -> list styles
/// GET    /{style_id}/tracks            -> membership with library songs
/// GET    /{style_id}/assignments       -> list
/// PUT    /{style_id}/assignments       -> bulk upsert
/// DELETE /{style_id}/assignments       -> bulk delete
/// GET    /{style_id}/weights           -> list
/// PUT    /{style_id}/weights           -> upsert (must sum to 100)
/// GET    /{style_id}/playback-profile  -> aggregated profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(styles::list))
        .route("/{style_id}/tracks", get(tracks::list))
        .route(
            "/{style_id}/assignments",
            get(assignments::list)
                .put(assignments::upsert)
                .delete(assignments::delete),
        )
        .route(
            "/{style_id}/weights",
            get(weights::list).put(weights::upsert),
        )
        .route("/{style_id}/playback-profile", get(playback_profile::get))
        .method_not_allowed_fallback(handlers::method_not_allowed)
}
