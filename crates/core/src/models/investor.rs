//! Investor models and DTOs.

use serde::{Deserialize, Serialize};

use crate::models::business::Proposal;
use crate::resource::{Identified, Resource, Suspendable, Verifiable};
use crate::types::{ResourceId, Timestamp};

/// Investor row as shown in the admin investor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub firm: Option<String>,
    #[serde(default)]
    pub investment_focus: Vec<String>,
    #[serde(default)]
    pub ticket_min: Option<f64>,
    #[serde(default)]
    pub ticket_max: Option<f64>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Detail record for a single investor, with the proposals they sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorData {
    #[serde(flatten)]
    pub investor: Investor,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
}

/// DTO for editing an investor. All fields are optional.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_focus: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// DTO for onboarding an investor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorDraft {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub investment_focus: Vec<String>,
}

impl Investor {
    /// Whether an ask of `amount` falls inside the investor's ticket range.
    /// Open-ended bounds accept anything on that side.
    pub fn accepts_ticket(&self, amount: f64) -> bool {
        self.ticket_min.map_or(true, |min| amount >= min)
            && self.ticket_max.map_or(true, |max| amount <= max)
    }
}

impl Identified for Investor {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for InvestorData {
    fn id(&self) -> &str {
        &self.investor.id
    }
}

impl Suspendable for Investor {
    fn is_suspended(&self) -> bool {
        self.is_suspended
    }

    fn set_suspended(&mut self, suspended: bool) {
        self.is_suspended = suspended;
    }
}

impl Suspendable for InvestorData {
    fn is_suspended(&self) -> bool {
        self.investor.is_suspended
    }

    fn set_suspended(&mut self, suspended: bool) {
        self.investor.is_suspended = suspended;
    }
}

impl Verifiable for Investor {
    fn is_verified(&self) -> bool {
        self.is_verified
    }

    fn set_verified(&mut self, verified: bool) {
        self.is_verified = verified;
    }
}

impl Verifiable for InvestorData {
    fn is_verified(&self) -> bool {
        self.investor.is_verified
    }

    fn set_verified(&mut self, verified: bool) {
        self.investor.is_verified = verified;
    }
}

impl Resource for Investor {
    type Detail = InvestorData;
    type Patch = InvestorPatch;
    type Draft = InvestorDraft;

    const NAME: &'static str = "investor";
    const PLURAL: &'static str = "investors";
    const BASE_PATH: &'static str = "/api/investors";
    const COLLECTION_KEY: &'static str = "investors";
}
