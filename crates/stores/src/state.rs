//! The state slice owned by one resource store.
//!
//! [`StoreState`] is replaced as a unit on every transition; observers read
//! it through [`ResourceStore::snapshot`](crate::store::ResourceStore::snapshot)
//! and never see a half-applied update.

use fundhub_core::models::DashboardSummary;
use fundhub_core::pagination::{PageRequest, Pagination};
use fundhub_core::resource::{Identified, Resource};

// ---------------------------------------------------------------------------
// Busy flags
// ---------------------------------------------------------------------------

/// Kinds of in-flight work, each with its own flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    /// List, detail and dashboard fetches.
    Loading,
    Searching,
    /// Create and edit.
    Editing,
    Verifying,
    /// Suspend and unsuspend.
    Suspending,
    Deleting,
}

const BUSY_KINDS: usize = 6;

impl Busy {
    fn index(self) -> usize {
        match self {
            Busy::Loading => 0,
            Busy::Searching => 1,
            Busy::Editing => 2,
            Busy::Verifying => 3,
            Busy::Suspending => 4,
            Busy::Deleting => 5,
        }
    }
}

/// Public view of the in-flight counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub loading: bool,
    pub searching: bool,
    pub editing: bool,
    pub verifying: bool,
    pub suspending: bool,
    pub deleting: bool,
}

impl Flags {
    pub fn get(&self, busy: Busy) -> bool {
        match busy {
            Busy::Loading => self.loading,
            Busy::Searching => self.searching,
            Busy::Editing => self.editing,
            Busy::Verifying => self.verifying,
            Busy::Suspending => self.suspending,
            Busy::Deleting => self.deleting,
        }
    }

    fn set(&mut self, busy: Busy, value: bool) {
        let slot = match busy {
            Busy::Loading => &mut self.loading,
            Busy::Searching => &mut self.searching,
            Busy::Editing => &mut self.editing,
            Busy::Verifying => &mut self.verifying,
            Busy::Suspending => &mut self.suspending,
            Busy::Deleting => &mut self.deleting,
        };
        *slot = value;
    }

    /// Whether anything at all is in flight.
    pub fn any(&self) -> bool {
        self.loading
            || self.searching
            || self.editing
            || self.verifying
            || self.suspending
            || self.deleting
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// What a list or detail view should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    /// The last action failed; show the message with a retry action.
    Error(String),
    /// The fetch succeeded but returned nothing.
    Empty,
    /// A search was run and matched nothing.
    NoMatches,
    Populated,
}

// ---------------------------------------------------------------------------
// StoreState
// ---------------------------------------------------------------------------

/// Everything one store knows about its resource.
#[derive(Debug, Clone)]
pub struct StoreState<R: Resource> {
    /// Current page of the main collection.
    pub items: Vec<R>,
    /// Describes `items`; `None` until the first successful page fetch.
    pub pagination: Option<Pagination>,
    /// The record last fetched by id.
    pub detail: Option<R::Detail>,
    /// Results of the last search; never merged into `items`.
    pub search_results: Vec<R>,
    /// While true, views read `search_results` instead of `items`.
    pub search_active: bool,
    pub search_query: Option<String>,
    pub dashboard: Option<DashboardSummary>,
    pub flags: Flags,
    pub error: Option<String>,
    pub message: Option<String>,
    /// Outcome of the last settled action.
    pub success: bool,
    pub(crate) last_request: Option<PageRequest>,
    in_flight: [u32; BUSY_KINDS],
}

impl<R: Resource> Default for StoreState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            detail: None,
            search_results: Vec::new(),
            search_active: false,
            search_query: None,
            dashboard: None,
            flags: Flags::default(),
            error: None,
            message: None,
            success: false,
            last_request: None,
            in_flight: [0; BUSY_KINDS],
        }
    }
}

impl<R: Resource> StoreState<R> {
    /// The page request behind the current collection, if any.
    pub fn last_request(&self) -> Option<PageRequest> {
        self.last_request
    }

    /// Find a record in the main collection by id.
    pub fn item(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// The detail record, only if it belongs to `id`.
    pub fn detail_for(&self, id: &str) -> Option<&R::Detail> {
        self.detail.as_ref().filter(|detail| detail.id() == id)
    }

    /// The list a view should currently display.
    pub fn visible(&self) -> &[R] {
        if self.search_active {
            &self.search_results
        } else {
            &self.items
        }
    }

    /// Render state for the list view (search-aware).
    pub fn list_view(&self) -> ViewState {
        if self.search_active || self.flags.searching {
            if self.flags.searching {
                return ViewState::Loading;
            }
            if let Some(error) = &self.error {
                return ViewState::Error(error.clone());
            }
            if self.search_results.is_empty() {
                return ViewState::NoMatches;
            }
            return ViewState::Populated;
        }

        if self.flags.loading {
            return ViewState::Loading;
        }
        if let Some(error) = &self.error {
            return ViewState::Error(error.clone());
        }
        if self.items.is_empty() {
            return ViewState::Empty;
        }
        ViewState::Populated
    }

    /// Render state for the detail view.
    pub fn detail_view(&self) -> ViewState {
        if self.flags.loading && self.detail.is_none() {
            return ViewState::Loading;
        }
        if let Some(error) = &self.error {
            return ViewState::Error(error.clone());
        }
        match self.detail {
            Some(_) => ViewState::Populated,
            None => ViewState::Empty,
        }
    }

    /// Text for [`ViewState::Empty`] on the list view.
    pub fn empty_message() -> String {
        format!("No {} available", R::PLURAL)
    }

    /// Text for [`ViewState::NoMatches`].
    pub fn no_matches_message() -> String {
        format!("No matching {} found", R::PLURAL)
    }

    // ---- in-flight bookkeeping ----

    pub(crate) fn enter(&mut self, busy: Busy) {
        let count = &mut self.in_flight[busy.index()];
        *count += 1;
        self.flags.set(busy, true);
    }

    pub(crate) fn leave(&mut self, busy: Busy) {
        let count = &mut self.in_flight[busy.index()];
        *count = count.saturating_sub(1);
        let still_busy = *count > 0;
        self.flags.set(busy, still_busy);
    }

    // ---- transient status ----

    pub(crate) fn succeed(&mut self, message: Option<String>) {
        self.error = None;
        self.message = message;
        self.success = true;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message.clone());
        self.message = Some(message);
        self.success = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
