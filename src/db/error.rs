#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("Failed to (de)serialize stored value: {0}")]
    SerdeError(#[from] serde_json::Error),
}
