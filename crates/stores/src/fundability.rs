//! Fundability test results.

use fundhub_core::models::FundabilityTest;

use crate::state::StoreState;
use crate::store::ResourceStore;

pub type FundabilityTestStore = ResourceStore<FundabilityTest>;

impl StoreState<FundabilityTest> {
    /// Mean score of the displayed tests, `None` when nothing is displayed.
    pub fn average_score(&self) -> Option<f64> {
        let tests = self.visible();
        if tests.is_empty() {
            return None;
        }
        Some(tests.iter().map(|test| test.score).sum::<f64>() / tests.len() as f64)
    }
}
