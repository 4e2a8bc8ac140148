//! Field-level merge of a partial update into a cached record.
//!
//! Patches are plain structs whose optional members are skipped when `None`.
//! [`overlay`] serialises both sides to JSON objects, copies every non-null
//! patch field onto the target (recursing into nested objects), and
//! deserialises the result back into the target type. Fields absent from the
//! patch keep their current value.
//!
//! [`overlay_record`] is the variant for records echoed back by the server:
//! there a `null` is the confirmed value, so it overwrites the cached one.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nulls {
    Skip,
    Apply,
}

/// Return `target` with every non-null field present in `patch` overwritten.
pub fn overlay<T, P>(target: &T, patch: &P) -> Result<T, CoreError>
where
    T: Serialize + DeserializeOwned,
    P: Serialize + ?Sized,
{
    merge(target, patch, Nulls::Skip)
}

/// Return `target` with every field of `record` copied over, nulls included.
///
/// Fields `target` has and `record` lacks (e.g. detail-only members) are
/// kept.
pub fn overlay_record<T, P>(target: &T, record: &P) -> Result<T, CoreError>
where
    T: Serialize + DeserializeOwned,
    P: Serialize + ?Sized,
{
    merge(target, record, Nulls::Apply)
}

fn merge<T, P>(target: &T, patch: &P, nulls: Nulls) -> Result<T, CoreError>
where
    T: Serialize + DeserializeOwned,
    P: Serialize + ?Sized,
{
    let mut base = serde_json::to_value(target)?;
    let incoming = serde_json::to_value(patch)?;

    let Value::Object(fields) = incoming else {
        return Err(CoreError::UnexpectedShape(
            "patch must serialise to an object".into(),
        ));
    };
    let Value::Object(ref mut base_fields) = base else {
        return Err(CoreError::UnexpectedShape(
            "merge target must serialise to an object".into(),
        ));
    };

    merge_objects(base_fields, fields, nulls);
    Ok(serde_json::from_value(base)?)
}

fn merge_objects(base: &mut Map<String, Value>, patch: Map<String, Value>, nulls: Nulls) {
    for (key, value) in patch {
        if value.is_null() && nulls == Nulls::Skip {
            continue;
        }
        match base.get_mut(&key) {
            Some(Value::Object(existing)) if value.is_object() => {
                if let Value::Object(nested) = value {
                    merge_objects(existing, nested, nulls);
                }
            }
            _ => {
                base.insert(key, value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
