use serde::{Deserialize, Serialize};

/// Headline counts served by `GET /api/<resource>/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub suspended: u64,
    /// Only reported for resources that go through verification.
    #[serde(default)]
    pub verified: Option<u64>,
}
