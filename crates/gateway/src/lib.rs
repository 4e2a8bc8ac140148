//! HTTP gateway and session layer for the admin client.
//!
//! - [`HttpGateway`] -- the single outbound chokepoint (bearer token on every
//!   protected request, session teardown on 401).
//! - [`SessionStore`] -- token, profile and auth flag, mirrored to
//!   [`KeyValueStorage`].
//! - [`Navigator`] -- receives the forced redirect to the sign-in route.
//! - [`GatewayConfig`] -- environment-driven configuration.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod navigator;
pub mod session;
pub mod storage;

pub use client::HttpGateway;
pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use navigator::{LoggingNavigator, Navigator, SIGN_IN_ROUTE};
pub use session::{SessionState, SessionStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
