#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Weather provider returned status {status} for {city}")]
    Status { status: u16, city: String },
    #[error("Failed to parse weather JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Weather payload has no temperature")]
    MissingTemperature,
}

impl FetchError {
    /// Transport failures and 5xx responses are worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Request(_) => true,
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::ParseError(_) | FetchError::MissingTemperature => false,
        }
    }
}
