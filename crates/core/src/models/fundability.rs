//! Fundability test models.
//!
//! A fundability test scores a business's readiness for investment across a
//! set of categories. The summary row appears in the admin test table; the
//! same scoring block is embedded in the business detail record as
//! [`FundabilityTestDetails`].

use serde::{Deserialize, Serialize};

use crate::resource::{Identified, Resource};
use crate::types::{ResourceId, Timestamp};

/// Score for one category of the test (e.g. "Financials").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub max_score: Option<f64>,
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAnswer {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Fundability block embedded in a business detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundabilityTestDetails {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub categories: Vec<CategoryScore>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

/// Fundability test row as shown in the admin test table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundabilityTest {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub business_id: ResourceId,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub score: f64,
    /// `"in_progress"`, `"completed"`, `"reviewed"`, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

/// Detail record for a single test, with per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundabilityTestData {
    #[serde(flatten)]
    pub test: FundabilityTest,
    #[serde(default)]
    pub categories: Vec<CategoryScore>,
    #[serde(default)]
    pub answers: Vec<TestAnswer>,
    #[serde(default)]
    pub reviewer_notes: Option<String>,
}

/// DTO for adjusting a test result. All fields are optional.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundabilityTestPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_notes: Option<String>,
}

/// DTO for recording a test result on behalf of a business.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundabilityTestDraft {
    pub business_id: ResourceId,
    pub score: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryScore>,
}

impl FundabilityTestData {
    /// Sum of category maxima, when every category reports one.
    pub fn max_total(&self) -> Option<f64> {
        self.categories.iter().map(|c| c.max_score).sum()
    }
}

impl Identified for FundabilityTest {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for FundabilityTestData {
    fn id(&self) -> &str {
        &self.test.id
    }
}

impl Resource for FundabilityTest {
    type Detail = FundabilityTestData;
    type Patch = FundabilityTestPatch;
    type Draft = FundabilityTestDraft;

    const NAME: &'static str = "fundability test";
    const PLURAL: &'static str = "fundability tests";
    const BASE_PATH: &'static str = "/api/fundability-tests";
    const COLLECTION_KEY: &'static str = "tests";
}
