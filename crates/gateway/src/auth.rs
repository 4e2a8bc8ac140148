//! Sign-in, registration and sign-out.
//!
//! These are the only endpoints called without a bearer token.

use fundhub_core::envelope::MutationResult;
use fundhub_core::models::{AuthPayload, RegisterRequest, SignInRequest};

use crate::client::HttpGateway;
use crate::error::GatewayError;

/// Sign-in endpoint.
pub const SIGN_IN_PATH: &str = "/api/auth/login";
/// Registration endpoint.
pub const REGISTER_PATH: &str = "/api/auth/register";

/// Paths that never carry an `Authorization` header.
const PUBLIC_PATHS: &[&str] = &[SIGN_IN_PATH, REGISTER_PATH];

/// Whether `path` is a public auth endpoint.
pub fn is_public_path(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    PUBLIC_PATHS.contains(&path.trim_end_matches('/'))
}

impl HttpGateway {
    /// Sign in and, on success, establish the session.
    ///
    /// Wrong credentials come back as `Ok` with `success == false`; only
    /// transport or decoding problems are `Err`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<MutationResult, GatewayError> {
        let body = SignInRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = match self.post::<_, AuthPayload>(SIGN_IN_PATH, &body).await {
            Ok(response) => response,
            Err(GatewayError::Api { message, .. }) => {
                let message = message.unwrap_or_else(|| "Sign in failed".into());
                tracing::info!(email = %body.email, "Sign in rejected");
                return Ok(MutationResult::failed(message));
            }
            Err(e) => return Err(e),
        };
        self.accept_auth(response.success, response.message, response.data, "Sign in failed")
            .await
    }

    /// Register a new admin account and, on success, establish the session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<MutationResult, GatewayError> {
        let response = match self.post::<_, AuthPayload>(REGISTER_PATH, request).await {
            Ok(response) => response,
            Err(GatewayError::Api { message, .. }) => {
                return Ok(MutationResult::failed(
                    message.unwrap_or_else(|| "Registration failed".into()),
                ));
            }
            Err(e) => return Err(e),
        };
        self.accept_auth(
            response.success,
            response.message,
            response.data,
            "Registration failed",
        )
        .await
    }

    /// Clear the session locally. The API keeps no server-side session.
    pub async fn sign_out(&self) {
        self.session().sign_out().await;
    }

    async fn accept_auth(
        &self,
        success: bool,
        message: Option<String>,
        data: Option<AuthPayload>,
        fallback: &str,
    ) -> Result<MutationResult, GatewayError> {
        let message = message.filter(|m| !m.trim().is_empty());
        let payload = match (success, data) {
            (true, Some(payload)) if !payload.token.trim().is_empty() => payload,
            (true, _) => {
                return Err(GatewayError::Decode(
                    "auth response is missing a token".into(),
                ))
            }
            (false, _) => {
                return Ok(MutationResult::failed(
                    message.unwrap_or_else(|| fallback.to_string()),
                ))
            }
        };

        if let Err(e) = self.session().establish(payload.token, payload.user).await {
            // The in-memory session is still usable; only persistence failed.
            tracing::error!(error = %e, "Failed to persist session");
        }
        Ok(MutationResult::succeeded(
            message.unwrap_or_else(|| "Signed in".into()),
        ))
    }
}
