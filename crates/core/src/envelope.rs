//! Response envelopes used by every API endpoint.
//!
//! All endpoints answer `{ "success": bool, "message": string, "data": ... }`.
//! List endpoints nest the records under a resource-specific key next to a
//! `metadata` object, so [`ListPage::from_data`] takes that key explicitly.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::pagination::PageMetadata;

/// Standard `{ success, message, data }` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// The server message, or `fallback` when the server sent none.
    pub fn message_or(&self, fallback: &str) -> String {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// One page of records extracted from a list response.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub metadata: Option<PageMetadata>,
}

impl<T: DeserializeOwned> ListPage<T> {
    /// Extract `data.<key>` and `data.metadata` from a list response body.
    ///
    /// A missing item array is treated as an empty page; anything other than
    /// an object for `data` is rejected.
    pub fn from_data(data: serde_json::Value, key: &str) -> Result<Self, CoreError> {
        let serde_json::Value::Object(mut map) = data else {
            return Err(CoreError::UnexpectedShape(format!(
                "list data for '{key}' is not an object"
            )));
        };

        let items = match map.remove(key) {
            Some(serde_json::Value::Null) | None => Vec::new(),
            Some(raw) => serde_json::from_value(raw)?,
        };

        let metadata = match map.remove("metadata") {
            Some(serde_json::Value::Null) | None => None,
            Some(raw) => Some(serde_json::from_value(raw)?),
        };

        Ok(Self { items, metadata })
    }
}

/// `{ success, message }` outcome handed back to callers of mutations so
/// they can branch between success and failure flows without matching on
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    pub success: bool,
    pub message: String,
}

impl MutationResult {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Body for search endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

/// Body for id-addressed mutations (`/delete`, `/suspend`, `/verify-business`).
#[derive(Debug, Clone, Serialize)]
pub struct IdRequest<'a> {
    pub id: &'a str,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
