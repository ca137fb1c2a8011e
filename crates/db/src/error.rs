/// Failure surfaced by any [`StyleStore`](crate::StyleStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Non-SQL backends report failures as plain text.
    #[error("{0}")]
    Unavailable(String),
}
