//! Navigation side-effects requested by the gateway.

/// Route the user is sent to after the session is torn down.
pub const SIGN_IN_ROUTE: &str = "/signin";

/// Receives forced navigations (e.g. to the sign-in screen on 401).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator that only records the request in the log.
///
/// Used by headless front-ends that have no router of their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: &str) {
        tracing::warn!(route, "Navigation requested");
    }
}
