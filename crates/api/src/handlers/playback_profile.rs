//! Handler for the aggregated playback profile of a style.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use opus_core::classification::normalize_style_id;
use opus_core::playback_profile::{build_playback_profile, Membership, MEMBERSHIP_FETCH_LIMIT};

use crate::error::{AppResult, StoreResultExt};
use crate::middleware::internal_key::RequireInternalKey;
use crate::query::{parse_flag, ProfileParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /v1/styles/{style_id}/playback-profile
///
/// Partition the style's tracks into class pools and decide whether the
/// player should run class-weighted or fall back to legacy selection.
/// Pool track ids are included only with `?include_track_ids=1`.
pub async fn get(
    _key: RequireInternalKey,
    State(state): State<AppState>,
    Path(style_id): Path<String>,
    Query(params): Query<ProfileParams>,
) -> AppResult<impl IntoResponse> {
    let style_id = normalize_style_id(Some(&style_id));
    let include_track_ids = parse_flag(params.include_track_ids.as_deref());

    let store = &state.store;
    let (weights, mut track_ids, assignments) = tokio::try_join!(
        async {
            store
                .list_weights(&style_id)
                .await
                .context("Failed to fetch weights")
        },
        async {
            store
                .list_style_track_ids(&style_id, MEMBERSHIP_FETCH_LIMIT + 1)
                .await
                .context("Failed to fetch style tracks")
        },
        async {
            store
                .list_assignments(&style_id)
                .await
                .context("Failed to fetch assignments")
        },
    )?;

    let truncated = track_ids.len() > MEMBERSHIP_FETCH_LIMIT;
    if truncated {
        track_ids.truncate(MEMBERSHIP_FETCH_LIMIT);
        tracing::warn!(
            %style_id,
            limit = MEMBERSHIP_FETCH_LIMIT,
            "Style membership exceeds fetch limit; profile covers a truncated set"
        );
    }

    let profile = build_playback_profile(
        &style_id,
        weights.iter().map(|w| w.as_profile_input()),
        Membership {
            track_ids: &track_ids,
            truncated,
        },
        assignments.iter().map(|a| a.as_profile_input()),
        include_track_ids,
    );

    tracing::debug!(%style_id, mode = ?profile.mode, "Playback profile built");

    Ok(Json(DataResponse { data: profile }))
}
