//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`StoreEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` between the session layer and
//! every resource store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// StoreAction
// ---------------------------------------------------------------------------

/// The state transition that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreAction {
    /// A read or mutation has started and its busy flag is now set.
    Pending,
    ListLoaded,
    DetailLoaded,
    SearchUpdated,
    SearchCleared,
    DashboardLoaded,
    Created,
    Edited,
    Deleted,
    Suspended,
    Unsuspended,
    Verified,
    /// An action settled with `error` set.
    Failed,
    ErrorCleared,
    /// In-flight reads were cancelled and their flags reset.
    Cancelled,
    SignedIn,
    SignedOut,
    /// A 401 tore the session down.
    SessionExpired,
}

// ---------------------------------------------------------------------------
// StoreEvent
// ---------------------------------------------------------------------------

/// A state transition that occurred in a store or in the session.
///
/// Constructed via [`StoreEvent::new`] and enriched with
/// [`with_entity`](StoreEvent::with_entity) and
/// [`with_message`](StoreEvent::with_message).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEvent {
    /// Name of the publishing store, e.g. `"businesses"` or `"session"`.
    pub store: String,

    pub action: StoreAction,

    /// Id of the record the transition applied to, if any.
    pub entity_id: Option<String>,

    /// Human-readable status accompanying the transition.
    pub message: Option<String>,

    /// When the transition was applied (UTC).
    pub timestamp: DateTime<Utc>,
}

impl StoreEvent {
    pub fn new(store: impl Into<String>, action: StoreAction) -> Self {
        Self {
            store: store.into(),
            action,
            entity_id: None,
            message: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the id of the affected record.
    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Attach a status message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of observers can
/// independently receive every published [`StoreEvent`].
///
/// # Usage
///
/// ```rust
/// use fundhub_events::bus::{EventBus, StoreAction, StoreEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(StoreEvent::new("users", StoreAction::ListLoaded));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped and
    /// slow observers see `RecvError::Lagged`; they should then re-read the
    /// snapshot of every store they watch.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no subscribers the event is dropped.
    pub fn publish(&self, event: StoreEvent) {
        tracing::trace!(store = %event.store, action = ?event.action, "Store event");
        // Ignore the SendError: it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
