//! The HTTP gateway: single chokepoint for outbound API calls.
//!
//! [`HttpGateway`] wraps a [`reqwest::Client`] and applies two interceptors:
//!
//! - **Request**: attach `Authorization: Bearer <token>` unless the path is
//!   a public auth endpoint. A missing token does not block the request.
//! - **Response**: on 401, tear the session down, set the redirect marker
//!   and navigate to the sign-in route. Every other failure is returned to
//!   the caller unchanged.
//!
//! Calls are fire-once: there is no retry, backoff or queuing here.

use std::sync::Arc;

use fundhub_core::envelope::ApiResponse;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::is_public_path;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::navigator::{Navigator, SIGN_IN_ROUTE};
use crate::session::SessionStore;

/// HTTP client bound to one API base URL and one session.
pub struct HttpGateway {
    client: reqwest::Client,
    api_url: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl HttpGateway {
    /// Build a gateway with a client configured from `config`.
    pub fn new(
        config: &GatewayConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone(), session, navigator))
    }

    /// Build a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: String,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `GET path?query`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, GatewayError> {
        let builder = self.request(Method::GET, path).await.query(query);
        self.execute(Method::GET, path, builder).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).await.json(body);
        self.execute(Method::POST, path, builder).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).await.json(body);
        self.execute(Method::PUT, path, builder).await
    }

    /// `DELETE path` with a JSON body.
    pub async fn delete<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::DELETE, path).await.json(body);
        self.execute(Method::DELETE, path, builder).await
    }

    // ---- interceptors ----

    /// Start a request, attaching the bearer token for protected paths.
    async fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.api_url, path));
        if is_public_path(path) {
            return builder;
        }
        match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => {
                tracing::debug!(path, "No session token; sending request unauthenticated");
                builder
            }
        }
    }

    /// Send the request and interpret the response.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>, GatewayError> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!(%method, path, error = %e, "API request failed");
            GatewayError::Request(e)
        })?;

        let status = response.status();
        // A 401 from sign-in means bad credentials, not an expired session.
        if status == StatusCode::UNAUTHORIZED && !is_public_path(path) {
            self.handle_unauthorized(path).await;
            return Err(GatewayError::Unauthorized);
        }

        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message);
            tracing::warn!(%method, path, status = status.as_u16(), "API returned an error status");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<ApiResponse<T>>(&body).map_err(|e| {
            tracing::error!(%method, path, error = %e, "API response did not match envelope");
            GatewayError::Decode(e.to_string())
        })
    }

    async fn handle_unauthorized(&self, path: &str) {
        tracing::warn!(path, "API returned 401; tearing down session");
        if self.session.expire().await {
            self.navigator.navigate(SIGN_IN_ROUTE);
        }
    }
}
