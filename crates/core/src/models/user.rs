//! Marketplace user models and DTOs.

use serde::{Deserialize, Serialize};

use crate::models::business::Business;
use crate::resource::{Identified, Resource, Suspendable};
use crate::types::{ResourceId, Timestamp};

/// User row as shown in the admin user table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Account role, e.g. `"entrepreneur"`, `"investor"`, `"admin"`.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Detail record for a single user, including the businesses they own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub businesses: Vec<Business>,
    #[serde(default)]
    pub last_login_at: Option<Timestamp>,
}

/// DTO for editing a user. All fields are optional.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// DTO for creating a user from the admin panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for UserData {
    fn id(&self) -> &str {
        &self.user.id
    }
}

impl Suspendable for User {
    fn is_suspended(&self) -> bool {
        self.is_suspended
    }

    fn set_suspended(&mut self, suspended: bool) {
        self.is_suspended = suspended;
    }
}

impl Suspendable for UserData {
    fn is_suspended(&self) -> bool {
        self.user.is_suspended
    }

    fn set_suspended(&mut self, suspended: bool) {
        self.user.is_suspended = suspended;
    }
}

impl Resource for User {
    type Detail = UserData;
    type Patch = UserPatch;
    type Draft = UserDraft;

    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";
    const BASE_PATH: &'static str = "/api/users";
    const COLLECTION_KEY: &'static str = "users";
}
