pub mod assignments;
pub mod playback_profile;
pub mod styles;
pub mod tracks;
pub mod weights;

use axum::extract::OriginalUri;
use axum::http::Method;

use crate::error::AppError;
use crate::middleware::internal_key::RequireInternalKey;

/// Fallback for unmatched routes.
///
/// The key is checked first, so callers without it learn nothing about
/// which paths exist.
pub async fn not_found(_key: RequireInternalKey, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("Route {} not found", uri.path()))
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed(
    _key: RequireInternalKey,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> AppError {
    AppError::MethodNotAllowed(format!("Method {method} not allowed on {}", uri.path()))
}
