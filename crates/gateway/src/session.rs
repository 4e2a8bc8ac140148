//! Session (authentication) state shared by the gateway.
//!
//! [`SessionStore`] keeps the bearer token, the signed-in admin's profile and
//! the `is_authenticated` flag in memory, mirrored to durable storage so a
//! restart can pick the session back up. The three fields are always written
//! together: a non-empty token implies `is_authenticated`, and teardown
//! resets all of them at once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fundhub_core::models::SessionUser;
use fundhub_events::{EventBus, StoreAction, StoreEvent};
use tokio::sync::RwLock;

use crate::storage::{KeyValueStorage, StorageError};

/// Durable key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Durable key holding the JSON-encoded [`SessionUser`].
pub const USER_KEY: &str = "user";
/// Durable key holding `"true"` while signed in.
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
/// Durable key set when the session was torn down by a 401.
pub const REDIRECT_MARKER_KEY: &str = "redirectedDueToAuthError";

/// Name used for session events on the bus.
const EVENT_SOURCE: &str = "session";

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
}

impl SessionState {
    fn signed_in(token: String, user: Option<SessionUser>) -> Self {
        Self {
            token: Some(token),
            user,
            is_authenticated: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Owner of the session state.
///
/// Designed to be wrapped in `Arc` and shared by the gateway and the
/// front-end.
pub struct SessionStore {
    state: RwLock<SessionState>,
    /// Readable "expired last time" flag, mirrored by the durable marker.
    redirected: AtomicBool,
    /// Set by the first teardown since the last sign-in or restore in this
    /// process; later 401s see it and skip navigation.
    torn_down: AtomicBool,
    storage: Arc<dyn KeyValueStorage>,
    events: Arc<EventBus>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, events: Arc<EventBus>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            redirected: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
            storage,
            events,
        }
    }

    /// Hydrate the in-memory session from durable storage.
    ///
    /// Returns whether a signed-in session was found. A stored token without
    /// a readable profile still counts as signed in; the profile is left
    /// empty.
    pub async fn restore(&self) -> Result<bool, StorageError> {
        let marker = self.storage.get(REDIRECT_MARKER_KEY)?.as_deref() == Some("true");
        self.redirected.store(marker, Ordering::SeqCst);
        self.torn_down.store(false, Ordering::SeqCst);

        let token = self
            .storage
            .get(TOKEN_KEY)?
            .filter(|t| !t.trim().is_empty());

        let Some(token) = token else {
            *self.state.write().await = SessionState::default();
            return Ok(false);
        };

        let user = match self.storage.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored session profile is unreadable");
                    None
                }
            },
            None => None,
        };

        *self.state.write().await = SessionState::signed_in(token, user);
        tracing::info!("Session restored from durable storage");
        Ok(true)
    }

    /// Record a successful sign-in in memory and durable storage.
    ///
    /// Clears any pending redirect marker from an earlier expiry.
    pub async fn establish(&self, token: String, user: SessionUser) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&user).map_err(StorageError::Corrupt)?;
        let user_id = user.id.clone();

        {
            let mut state = self.state.write().await;
            self.storage.set(TOKEN_KEY, &token)?;
            self.storage.set(USER_KEY, &user_json)?;
            self.storage.set(AUTHENTICATED_KEY, "true")?;
            self.storage.remove(REDIRECT_MARKER_KEY)?;
            self.redirected.store(false, Ordering::SeqCst);
            self.torn_down.store(false, Ordering::SeqCst);
            *state = SessionState::signed_in(token, Some(user));
        }

        tracing::info!(user_id = %user_id, "Session established");
        self.events
            .publish(StoreEvent::new(EVENT_SOURCE, StoreAction::SignedIn).with_entity(user_id));
        Ok(())
    }

    /// Sign out explicitly. No marker is set.
    pub async fn sign_out(&self) {
        {
            let mut state = self.state.write().await;
            *state = SessionState::default();
            self.remove_durable();
        }
        tracing::info!("Signed out");
        self.events
            .publish(StoreEvent::new(EVENT_SOURCE, StoreAction::SignedOut));
    }

    /// Tear the session down after a 401.
    ///
    /// Clears memory and durable storage and sets the redirect marker.
    /// Returns `true` only for the first teardown since the last sign-in or
    /// restore, so concurrent 401s trigger a single navigation. A marker left
    /// over from an earlier process does not count.
    pub async fn expire(&self) -> bool {
        let first = {
            let mut state = self.state.write().await;
            *state = SessionState::default();
            self.remove_durable();
            let first = !self.torn_down.swap(true, Ordering::SeqCst);
            self.redirected.store(true, Ordering::SeqCst);
            if let Err(e) = self.storage.set(REDIRECT_MARKER_KEY, "true") {
                tracing::error!(error = %e, "Failed to persist redirect marker");
            }
            first
        };

        if first {
            tracing::warn!("Session expired; credentials cleared");
            self.events.publish(
                StoreEvent::new(EVENT_SOURCE, StoreAction::SessionExpired)
                    .with_message(crate::error::SESSION_EXPIRED_MESSAGE),
            );
        }
        first
    }

    /// Current bearer token.
    ///
    /// Falls back to durable storage when the in-memory session has not been
    /// hydrated (e.g. right after start-up).
    pub async fn token(&self) -> Option<String> {
        if let Some(token) = self.state.read().await.token.clone() {
            return Some(token);
        }
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read token from durable storage");
                None
            }
        }
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    /// Whether the last teardown was caused by a 401 and has not been
    /// acknowledged through [`take_redirect_marker`](Self::take_redirect_marker).
    pub fn redirected_due_to_auth_error(&self) -> bool {
        self.redirected.load(Ordering::SeqCst)
    }

    /// Read and clear the redirect marker (e.g. once the sign-in screen has
    /// shown its "session expired" notice).
    pub fn take_redirect_marker(&self) -> bool {
        let was_set = self.redirected.swap(false, Ordering::SeqCst);
        if let Err(e) = self.storage.remove(REDIRECT_MARKER_KEY) {
            tracing::warn!(error = %e, "Failed to clear redirect marker");
        }
        was_set
    }

    /// Best-effort removal of the durable credentials; teardown proceeds in
    /// memory even if storage fails.
    fn remove_durable(&self) {
        for key in [TOKEN_KEY, USER_KEY, AUTHENTICATED_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!(key, error = %e, "Failed to clear durable session key");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
