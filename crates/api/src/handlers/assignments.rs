//! Handlers for per-track class assignments within a style.
//!
//! Upserts are all-or-nothing: every class code is normalized before the
//! store is touched, and one invalid code rejects the batch.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use opus_core::classification::normalize_style_id;
use opus_core::validation::{collapse_last_wins, validate_assignment_batch, AssignmentDraft};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{AppResult, StoreResultExt};
use crate::middleware::internal_key::RequireInternalKey;
use crate::middleware::validated_json::ValidatedJson;
use crate::response::{DataResponse, DeleteResponse, UpsertResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AssignmentEntry {
    #[validate(length(min = 1, message = "library_song_id must not be empty"))]
    pub library_song_id: String,
    #[validate(length(min = 1, message = "class_code must not be empty"))]
    pub class_code: String,
}

/// Body of `PUT /styles/{style_id}/assignments`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertAssignmentsBody {
    #[validate(
        length(min = 1, message = "assignments must contain at least one entry"),
        nested
    )]
    pub assignments: Vec<AssignmentEntry>,
}

/// Body of `DELETE /styles/{style_id}/assignments`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteAssignmentsBody {
    #[serde(rename = "songIds")]
    #[validate(
        length(min = 1, message = "songIds must contain at least one id"),
        custom(function = "validate_song_ids")
    )]
    pub song_ids: Vec<String>,
}

fn validate_song_ids(ids: &[String]) -> Result<(), ValidationError> {
    if ids.iter().any(String::is_empty) {
        return Err(ValidationError::new("empty_song_id")
            .with_message("songIds must not contain empty ids".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/styles/{style_id}/assignments
pub async fn list(
    _key: RequireInternalKey,
    State(state): State<AppState>,
    Path(style_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let style_id = normalize_style_id(Some(&style_id));
    let assignments = state
        .store
        .list_assignments(&style_id)
        .await
        .context("Failed to fetch assignments")?;
    Ok(Json(DataResponse { data: assignments }))
}

/// PUT /v1/styles/{style_id}/assignments
///
/// Insert or overwrite class assignments. Answers with the number of
/// submitted rows.
pub async fn upsert(
    _key: RequireInternalKey,
    State(state): State<AppState>,
    Path(style_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpsertAssignmentsBody>,
) -> AppResult<impl IntoResponse> {
    let style_id = normalize_style_id(Some(&style_id));

    let rows = validate_assignment_batch(body.assignments.iter().map(|a| AssignmentDraft {
        library_song_id: &a.library_song_id,
        class_code: &a.class_code,
    }))?;
    let submitted = rows.len();

    let rows = collapse_last_wins(rows, |r| r.library_song_id.clone());
    state
        .store
        .upsert_assignments(&style_id, &rows)
        .await
        .context("Failed to upsert assignments")?;

    tracing::info!(%style_id, upserted = submitted, distinct = rows.len(), "Assignments upserted");

    Ok(Json(UpsertResponse {
        ok: true,
        upserted: submitted,
    }))
}

/// DELETE /v1/styles/{style_id}/assignments
///
/// Remove the assignments of the given tracks, returning them to
/// "uncategorized". Answers with the number of rows actually removed.
pub async fn delete(
    _key: RequireInternalKey,
    State(state): State<AppState>,
    Path(style_id): Path<String>,
    ValidatedJson(body): ValidatedJson<DeleteAssignmentsBody>,
) -> AppResult<impl IntoResponse> {
    let style_id = normalize_style_id(Some(&style_id));

    let deleted = state
        .store
        .delete_assignments(&style_id, &body.song_ids)
        .await
        .context("Failed to delete assignments")?;

    tracing::info!(%style_id, requested = body.song_ids.len(), deleted = deleted.len(), "Assignments deleted");

    Ok(Json(DeleteResponse {
        ok: true,
        deleted: deleted.len(),
    }))
}
