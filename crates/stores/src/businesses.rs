//! Businesses, including verification and deal-room data.

use fundhub_core::envelope::MutationResult;
use fundhub_core::models::{Business, BusinessData, Proposal};

use crate::error::StoreError;
use crate::state::StoreState;
use crate::store::{ResourceStore, VerifyEndpoint};

pub type BusinessStore = ResourceStore<Business>;

impl VerifyEndpoint for Business {
    const VERIFY_SUFFIX: &'static str = "verify-business";
}

impl ResourceStore<Business> {
    /// POST `/api/businesses/verify-business` with `{ id }`.
    pub async fn verify_business(&self, id: &str) -> Result<MutationResult, StoreError> {
        self.verify(id).await
    }
}

impl StoreState<Business> {
    /// Deal-room proposals of the loaded business `id`; empty when the
    /// detail record belongs to another business or has no deal room.
    pub fn proposals(&self, id: &str) -> &[Proposal] {
        self.detail_for(id)
            .map(BusinessData::proposals)
            .unwrap_or_default()
    }
}
