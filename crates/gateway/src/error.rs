//! Errors surfaced by the HTTP gateway.

/// Message shown when the session has been torn down after a 401.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Error type for outbound API calls.
///
/// Transport failures (no response) and server-reported failures (a response
/// with a non-2xx status) are kept apart so callers can tell whether the
/// server had anything to say.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status other than 401.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// `message` extracted from the response body, if it had one.
        message: Option<String>,
    },

    /// The API returned 401; the session has already been torn down.
    #[error("Unauthorized: session expired")]
    Unauthorized,

    /// A 2xx response whose body did not match the expected envelope.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Human-readable message for display, preferring what the server said
    /// and falling back to `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            GatewayError::Unauthorized => SESSION_EXPIRED_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Whether no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Request(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = GatewayError::Api {
            status: 422,
            message: Some("Email already in use".into()),
        };
        assert_eq!(err.user_message("Failed to update user"), "Email already in use");
        assert!(!err.is_transport());
    }

    #[test]
    fn user_message_falls_back_without_body() {
        let err = GatewayError::Api {
            status: 502,
            message: None,
        };
        assert_eq!(err.user_message("Failed to load users"), "Failed to load users");
        assert_eq!(err.to_string(), "API error (502): <no message>");
    }

    #[test]
    fn unauthorized_has_fixed_message() {
        assert_eq!(
            GatewayError::Unauthorized.user_message("ignored"),
            SESSION_EXPIRED_MESSAGE
        );
    }

    #[test]
    fn request_error_is_transport() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = GatewayError::Request(req_err);
        assert!(err.is_transport());
        assert!(err.to_string().contains("HTTP request failed"));
        assert_eq!(err.user_message("Network error"), "Network error");
    }
}
