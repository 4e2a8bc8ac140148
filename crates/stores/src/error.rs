use fundhub_gateway::GatewayError;

/// Error type for store operations that report failure to their caller.
///
/// Most store actions absorb failures into state. Only the actions whose
/// callers drive a follow-up flow (edit, create, verify, suspend,
/// unsuspend) return one of these.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The server answered and refused the action.
    #[error("{0}")]
    Rejected(String),

    /// The request did not produce a usable answer (network failure,
    /// expired session, malformed body).
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl StoreError {
    /// Message suitable for a failure dialog.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            StoreError::Rejected(message) => message.clone(),
            StoreError::Gateway(e) => e.user_message(fallback),
        }
    }
}
