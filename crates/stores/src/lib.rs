//! Client-side resource stores for the admin dashboard.
//!
//! One [`ResourceStore`] per resource type holds the current page, the
//! loaded detail record, search results, in-flight flags and the outcome of
//! the last action. Views read [`StoreState`] snapshots and re-read after
//! each [`StoreEvent`](fundhub_events::StoreEvent).

use std::sync::Arc;

use fundhub_events::EventBus;
use fundhub_gateway::HttpGateway;

pub mod businesses;
pub mod error;
pub mod fundability;
pub mod investors;
pub mod sequence;
pub mod state;
pub mod store;
pub mod users;

pub use businesses::BusinessStore;
pub use error::StoreError;
pub use fundability::FundabilityTestStore;
pub use investors::InvestorStore;
pub use state::{Busy, Flags, StoreState, ViewState};
pub use store::{ResourceStore, StoreOptions, VerifyEndpoint};
pub use users::UserStore;

/// The four admin stores, sharing one gateway and one event bus.
pub struct Stores {
    pub users: Arc<UserStore>,
    pub businesses: Arc<BusinessStore>,
    pub investors: Arc<InvestorStore>,
    pub tests: Arc<FundabilityTestStore>,
}

impl Stores {
    pub fn new(gateway: Arc<HttpGateway>, events: Arc<EventBus>, options: StoreOptions) -> Self {
        Self {
            users: Arc::new(ResourceStore::new(gateway.clone(), events.clone(), options)),
            businesses: Arc::new(ResourceStore::new(gateway.clone(), events.clone(), options)),
            investors: Arc::new(ResourceStore::new(gateway.clone(), events.clone(), options)),
            tests: Arc::new(ResourceStore::new(gateway, events, options)),
        }
    }

    /// Cancel in-flight reads on every store.
    pub fn cancel_pending(&self) {
        self.users.cancel_pending();
        self.businesses.cancel_pending();
        self.investors.cancel_pending();
        self.tests.cancel_pending();
    }
}
