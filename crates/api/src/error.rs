use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opus_core::error::CoreError;
use opus_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the uniform
/// `{ "error": { "message", "status" } }` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `opus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store operation failed; `context` names the operation.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// A malformed request body or one that violates the request schema.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The path exists but not for this method.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Attach a static context phrase to a store result.
pub trait StoreResultExt<T> {
    fn context(self, context: &'static str) -> AppResult<T>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::Store { context, source })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store { context, source } => {
                tracing::error!(error = %source, context, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{context}: {source}"),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}
