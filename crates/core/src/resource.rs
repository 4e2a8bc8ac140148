//! Traits describing how a resource type maps onto the REST API.
//!
//! A [`Resource`] is the summary record shown in list pages. Its associated
//! `Detail` type is the fully-populated record returned by `GET /:id`, and
//! `Patch` / `Draft` are the payloads for edit and create.

use std::fmt::Debug;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Everything outside the unreserved set is escaped inside a path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Anything addressable by an API-assigned id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Records carrying an account suspension flag.
pub trait Suspendable {
    fn is_suspended(&self) -> bool;
    fn set_suspended(&mut self, suspended: bool);
}

/// Records carrying an admin verification flag.
pub trait Verifiable {
    fn is_verified(&self) -> bool;
    fn set_verified(&mut self, verified: bool);
}

/// Marker bound for payload and record types that cross the wire.
pub trait Wire: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {}

impl<T> Wire for T where T: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {}

/// A resource type served under `/api/<resource>`.
pub trait Resource: Identified + Wire {
    /// Fully-populated record returned by the detail endpoint.
    type Detail: Identified + Wire;
    /// Partial update sent to `/edit/:id`; `None` members are omitted.
    type Patch: Serialize + Debug + Send + Sync;
    /// Payload sent to create a new record.
    type Draft: Serialize + Debug + Send + Sync;

    /// Singular, human-readable name (e.g. `"business"`).
    const NAME: &'static str;
    /// Plural, human-readable name (e.g. `"businesses"`).
    const PLURAL: &'static str;
    /// Base path of the resource endpoints (e.g. `"/api/businesses"`).
    const BASE_PATH: &'static str;
    /// Key under `data` holding the item array in list responses.
    const COLLECTION_KEY: &'static str;
}

/// Join `base` and `segments` into a request path, escaping each segment so
/// an id containing `/`, `?` or `#` stays a single path component.
pub fn record_path(base: &str, segments: &[&str]) -> String {
    let mut path = base.trim_end_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.extend(utf8_percent_encode(segment, SEGMENT_ENCODE_SET));
    }
    path
}
