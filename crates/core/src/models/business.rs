//! Business models, including the deal-room and test sub-records embedded in
//! the business detail response.

use serde::{Deserialize, Serialize};

use crate::models::fundability::FundabilityTestDetails;
use crate::resource::{Identified, Resource, Suspendable, Verifiable};
use crate::types::{ResourceId, Timestamp};

/// Business row as shown in the admin business table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub business_name: String,
    #[serde(default)]
    pub owner_id: Option<ResourceId>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Company stage, e.g. `"idea"`, `"mvp"`, `"growth"`.
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub funding_required: Option<f64>,
    #[serde(default)]
    pub fundability_score: Option<f64>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A funding proposal exchanged in a business's deal room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub investor_id: Option<ResourceId>,
    #[serde(default)]
    pub investor_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    /// `"pending"`, `"accepted"`, `"rejected"`, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Deal-room state for a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRoomDetails {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub documents: Vec<String>,
}

/// Result of the startup readiness questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupTestDetails {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

/// Detail record for a single business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessData {
    #[serde(flatten)]
    pub business: Business,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub fundability_test_details: Option<FundabilityTestDetails>,
    #[serde(default)]
    pub deal_room_details: Option<DealRoomDetails>,
    #[serde(default)]
    pub startup_test_details: Option<StartupTestDetails>,
}

/// DTO for editing a business. All fields are optional.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_required: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// DTO for registering a business on behalf of an owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDraft {
    pub business_name: String,
    pub owner_id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_required: Option<f64>,
}

impl BusinessData {
    /// Proposals in the deal room, or an empty slice if there is no deal room.
    pub fn proposals(&self) -> &[Proposal] {
        self.deal_room_details
            .as_ref()
            .map(|room| room.proposals.as_slice())
            .unwrap_or_default()
    }
}

impl Identified for Business {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for BusinessData {
    fn id(&self) -> &str {
        &self.business.id
    }
}

impl Suspendable for Business {
    fn is_suspended(&self) -> bool {
        self.is_suspended
    }

    fn set_suspended(&mut self, suspended: bool) {
        self.is_suspended = suspended;
    }
}

impl Suspendable for BusinessData {
    fn is_suspended(&self) -> bool {
        self.business.is_suspended
    }

    fn set_suspended(&mut self, suspended: bool) {
        self.business.is_suspended = suspended;
    }
}

impl Verifiable for Business {
    fn is_verified(&self) -> bool {
        self.is_verified
    }

    fn set_verified(&mut self, verified: bool) {
        self.is_verified = verified;
    }
}

impl Verifiable for BusinessData {
    fn is_verified(&self) -> bool {
        self.business.is_verified
    }

    fn set_verified(&mut self, verified: bool) {
        self.business.is_verified = verified;
    }
}

impl Resource for Business {
    type Detail = BusinessData;
    type Patch = BusinessPatch;
    type Draft = BusinessDraft;

    const NAME: &'static str = "business";
    const PLURAL: &'static str = "businesses";
    const BASE_PATH: &'static str = "/api/businesses";
    const COLLECTION_KEY: &'static str = "businesses";
}
