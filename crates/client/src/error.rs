/// Errors surfaced by [`OpusApiClient`](crate::OpusApiClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL cannot address API routes.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Transport failure, timeout, or an undecodable success body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `message` and `status` come from the server's error body when it has
    /// one; otherwise the HTTP status and a generic message are used.
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
