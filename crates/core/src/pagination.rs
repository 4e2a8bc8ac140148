//! Pagination descriptors and page-request normalisation.
//!
//! List endpoints accept `?page=&limit=` and report `metadata` alongside the
//! items. The client keeps its own [`Pagination`] derived from the request
//! that produced the current page, so `page` and `limit` always describe what
//! was asked for and `total_pages` is recomputed from the server's `total`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// First page index (pages are 1-based).
pub const FIRST_PAGE: u32 = 1;

/// Default number of records per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Maximum number of records per page.
pub const MAX_PAGE_LIMIT: u32 = 100;

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A normalised `page`/`limit` pair ready to be sent as query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Build a request from optional caller input.
    ///
    /// Missing values fall back to [`FIRST_PAGE`] and `default_limit`; a
    /// page of `0` becomes the first page and `limit` is clamped to
    /// `1..=MAX_PAGE_LIMIT`.
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        let page = page.unwrap_or(FIRST_PAGE).max(FIRST_PAGE);
        let limit = limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    /// Query-string pairs in the order the API expects.
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_LIMIT)
    }
}

// ---------------------------------------------------------------------------
// Wire metadata
// ---------------------------------------------------------------------------

/// The `metadata` object returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Pagination state for the page currently held by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// Build a descriptor for `page` of size `limit` over `total` records.
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        }
    }

    /// Resolve the descriptor for a fetched page.
    ///
    /// `total` comes from the server metadata when present, otherwise from
    /// the number of records actually returned.
    pub fn resolve(request: PageRequest, metadata: Option<&PageMetadata>, fetched: usize) -> Self {
        let total = metadata.map_or(fetched as u64, |m| m.total);
        Self::new(total, request.page, request.limit)
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page > FIRST_PAGE
    }

    /// Zero-based index of the first record on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Account for a record confirmed as created on the server.
    pub fn record_added(&mut self) {
        *self = Self::new(self.total + 1, self.page, self.limit);
    }

    /// Account for a record confirmed as deleted on the server.
    pub fn record_removed(&mut self) {
        *self = Self::new(self.total.saturating_sub(1), self.page, self.limit);
    }
}

/// Number of pages needed to show `total` records `limit` at a time.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_defaults() {
        let req = PageRequest::new(None, None, DEFAULT_PAGE_LIMIT);
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn page_request_clamps_bounds() {
        let req = PageRequest::new(Some(0), Some(0), DEFAULT_PAGE_LIMIT);
        assert_eq!(req, PageRequest { page: 1, limit: 1 });

        let req = PageRequest::new(Some(3), Some(10_000), DEFAULT_PAGE_LIMIT);
        assert_eq!(req, PageRequest { page: 3, limit: MAX_PAGE_LIMIT });
    }

    #[test]
    fn query_pairs_are_stringified() {
        let req = PageRequest::new(Some(2), Some(25), DEFAULT_PAGE_LIMIT);
        assert_eq!(
            req.query_pairs(),
            [("page", "2".to_string()), ("limit", "25".to_string())]
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn resolve_uses_request_page_and_server_total() {
        let req = PageRequest::new(Some(2), Some(10), DEFAULT_PAGE_LIMIT);
        let meta = PageMetadata {
            total: 25,
            page: 2,
            limit: 10,
            total_pages: 3,
        };
        let p = Pagination::resolve(req, Some(&meta), 10);
        assert_eq!(
            p,
            Pagination {
                total: 25,
                page: 2,
                limit: 10,
                total_pages: 3
            }
        );
    }

    #[test]
    fn resolve_without_metadata_counts_fetched() {
        let req = PageRequest::new(Some(1), Some(10), DEFAULT_PAGE_LIMIT);
        let p = Pagination::resolve(req, None, 4);
        assert_eq!(p.total, 4);
        assert_eq!(p.total_pages, 1);
    }

    #[test]
    fn navigation_helpers() {
        let p = Pagination::new(25, 2, 10);
        assert!(p.has_next());
        assert!(p.has_previous());
        assert_eq!(p.offset(), 10);

        let last = Pagination::new(25, 3, 10);
        assert!(!last.has_next());

        let first = Pagination::new(25, 1, 10);
        assert!(!first.has_previous());
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn add_and_remove_recompute_pages() {
        let mut p = Pagination::new(20, 1, 10);
        p.record_added();
        assert_eq!((p.total, p.total_pages), (21, 3));
        p.record_removed();
        p.record_removed();
        assert_eq!((p.total, p.total_pages), (19, 2));

        let mut empty = Pagination::new(0, 1, 10);
        empty.record_removed();
        assert_eq!(empty.total, 0);
    }
}
