//! Handlers for a style's per-class weights.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use opus_core::classification::normalize_style_id;
use opus_core::validation::{collapse_last_wins, validate_weight_batch, WeightDraft};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppResult, StoreResultExt};
use crate::middleware::internal_key::RequireInternalKey;
use crate::middleware::validated_json::ValidatedJson;
use crate::response::{DataResponse, UpsertResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct WeightEntry {
    #[validate(length(min = 1, message = "class_code must not be empty"))]
    pub class_code: String,
    pub weight_pct: i32,
}

/// Body of `PUT /styles/{style_id}/weights`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertWeightsBody {
    #[validate(
        length(min = 1, message = "weights must contain at least one entry"),
        nested
    )]
    pub weights: Vec<WeightEntry>,
}

/// GET /v1/styles/{style_id}/weights
pub async fn list(
    _key: RequireInternalKey,
    State(state): State<AppState>,
    Path(style_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let style_id = normalize_style_id(Some(&style_id));
    let weights = state
        .store
        .list_weights(&style_id)
        .await
        .context("Failed to fetch weights")?;
    Ok(Json(DataResponse { data: weights }))
}

/// PUT /v1/styles/{style_id}/weights
///
/// The submitted weights must sum to exactly 100 on their own; stored
/// weights for classes absent from the body are left untouched.
pub async fn upsert(
    _key: RequireInternalKey,
    State(state): State<AppState>,
    Path(style_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpsertWeightsBody>,
) -> AppResult<impl IntoResponse> {
    let style_id = normalize_style_id(Some(&style_id));

    let rows = validate_weight_batch(body.weights.iter().map(|w| WeightDraft {
        class_code: &w.class_code,
        weight_pct: w.weight_pct,
    }))?;
    let submitted = rows.len();

    let rows = collapse_last_wins(rows, |r| r.class_code);
    state
        .store
        .upsert_weights(&style_id, &rows)
        .await
        .context("Failed to upsert weights")?;

    tracing::info!(%style_id, upserted = submitted, "Weights upserted");

    Ok(Json(UpsertResponse {
        ok: true,
        upserted: submitted,
    }))
}
