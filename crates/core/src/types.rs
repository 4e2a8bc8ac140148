/// Resource identifiers are opaque strings assigned by the API.
pub type ResourceId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
