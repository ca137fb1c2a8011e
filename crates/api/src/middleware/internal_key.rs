//! Pre-shared API key extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use opus_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the internal API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Requires the `X-API-Key` header to equal the configured internal key.
/// Rejects with 401 otherwise.
///
/// ```ignore
/// async fn guarded(_key: RequireInternalKey) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireInternalKey;

impl FromRequestParts<AppState> for RequireInternalKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        match provided {
            Some(key) if key == state.config.internal_api_key => Ok(RequireInternalKey),
            _ => {
                tracing::warn!(
                    method = %parts.method,
                    path = %parts.uri.path(),
                    key_present = provided.is_some(),
                    "Rejected request without a valid API key",
                );
                Err(AppError::Core(CoreError::Unauthorized("Unauthorized".into())))
            }
        }
    }
}
