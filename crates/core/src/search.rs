//! Search query helpers.

/// Maximum accepted query length; longer input is truncated on a char
/// boundary before being sent.
pub const MAX_QUERY_LEN: usize = 200;

/// Trim a raw query and return it only if something searchable remains.
///
/// A `None` result means the caller should leave search mode instead of
/// issuing a request.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_QUERY_LEN).collect())
}
