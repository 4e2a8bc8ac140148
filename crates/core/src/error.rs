/// Errors raised while interpreting API payloads.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The payload parsed as JSON but did not have the expected layout.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A record or patch could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
