//! Per-operation request sequencing.
//!
//! Every read a store issues (list, detail, search, dashboard) takes a
//! [`Ticket`] for its [`ReadKey`]. Starting a newer request for the same key
//! cancels the older ticket, and a response is only applied while its
//! ticket is still the latest for that key, so the most recent intent wins
//! regardless of the order responses arrive in.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

/// Read operations that are sequenced independently of one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadKey {
    List,
    Detail,
    Search,
    Dashboard,
}

/// Proof that a request was started, checked again when its response
/// arrives.
#[derive(Debug, Clone)]
pub struct Ticket {
    key: ReadKey,
    seq: u64,
    token: CancellationToken,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Resolves once a newer request for the same key starts, or the key is
    /// invalidated.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

struct Slot {
    seq: u64,
    token: CancellationToken,
}

/// Tracks the latest ticket per [`ReadKey`].
#[derive(Default)]
pub struct RequestSequencer {
    next_seq: AtomicU64,
    latest: Mutex<HashMap<ReadKey, Slot>>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `key`, superseding any request still in flight.
    pub fn begin(&self, key: ReadKey) -> Ticket {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        let previous = self
            .slots()
            .insert(key, Slot { seq, token: token.clone() });
        if let Some(previous) = previous {
            tracing::debug!(?key, superseded = previous.seq, by = seq, "Superseding in-flight request");
            previous.token.cancel();
        }
        Ticket { key, seq, token }
    }

    /// Whether `ticket` is still the latest request for its key.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        !ticket.is_cancelled()
            && self
                .slots()
                .get(&ticket.key)
                .is_some_and(|slot| slot.seq == ticket.seq)
    }

    /// Release the slot held by `ticket` once its response has been handled.
    /// A no-op if a newer request has taken the slot.
    pub fn finish(&self, ticket: &Ticket) {
        let mut slots = self.slots();
        if slots.get(&ticket.key).is_some_and(|slot| slot.seq == ticket.seq) {
            slots.remove(&ticket.key);
        }
    }

    /// Cancel whatever is in flight for `key` without starting anything new.
    pub fn invalidate(&self, key: ReadKey) {
        if let Some(slot) = self.slots().remove(&key) {
            slot.token.cancel();
        }
    }

    /// Cancel every in-flight request. Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<Slot> = self.slots().drain().map(|(_, slot)| slot).collect();
        for slot in &drained {
            slot.token.cancel();
        }
        drained.len()
    }

    /// Number of keys with a request in flight.
    pub fn in_flight(&self) -> usize {
        self.slots().len()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<ReadKey, Slot>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
