//! Change notifications for the admin client.
//!
//! Stores and the session layer publish a [`StoreEvent`] after every state
//! transition. Observers subscribe to the shared [`EventBus`] and re-read
//! the snapshot of the store named in the event.

pub mod bus;

pub use bus::{EventBus, StoreAction, StoreEvent};
