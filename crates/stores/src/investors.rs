//! Investors.

use fundhub_core::envelope::MutationResult;
use fundhub_core::models::Investor;

use crate::error::StoreError;
use crate::state::StoreState;
use crate::store::{ResourceStore, VerifyEndpoint};

pub type InvestorStore = ResourceStore<Investor>;

impl VerifyEndpoint for Investor {
    const VERIFY_SUFFIX: &'static str = "verify";
}

impl ResourceStore<Investor> {
    /// POST `/api/investors/verify` with `{ id }`.
    pub async fn verify_investor(&self, id: &str) -> Result<MutationResult, StoreError> {
        self.verify(id).await
    }
}

impl StoreState<Investor> {
    /// Displayed investors whose ticket range covers `amount`.
    pub fn investors_for_ticket(&self, amount: f64) -> Vec<&Investor> {
        self.visible()
            .iter()
            .filter(|investor| investor.accepts_ticket(amount))
            .collect()
    }
}
