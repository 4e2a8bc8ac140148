//! Generic resource store.
//!
//! [`ResourceStore`] owns the [`StoreState`] for one resource type and is
//! the only code that mutates it. Every action follows the same shape:
//!
//! ```text
//! idle -> pending (flag on, error cleared)
//!      -> success (flag off, data patched, success = true)
//!       | failure (flag off, error set, success = false)
//! ```
//!
//! Data is only changed after the server confirms, and cached records are
//! patched by id rather than re-fetched. Each transition is applied under a
//! single write lock and announced on the [`EventBus`] afterwards.
//!
//! Reads are sequenced per [`ReadKey`]: starting a newer list, detail,
//! search or dashboard request cancels the older one, and a late response
//! is dropped if it is no longer the latest.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use fundhub_core::envelope::{ApiResponse, IdRequest, ListPage, MutationResult, SearchRequest};
use fundhub_core::error::CoreError;
use fundhub_core::merge::{overlay, overlay_record};
use fundhub_core::models::DashboardSummary;
use fundhub_core::pagination::{PageRequest, Pagination, DEFAULT_PAGE_LIMIT};
use fundhub_core::resource::{record_path, Identified, Resource, Suspendable, Verifiable};
use fundhub_core::search::normalize_query;
use fundhub_events::{EventBus, StoreAction, StoreEvent};
use fundhub_gateway::{GatewayConfig, GatewayError, HttpGateway};
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::sequence::{ReadKey, RequestSequencer, Ticket};
use crate::state::{Busy, StoreState};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Tunables shared by every store.
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    /// Page size used when `fetch_list` is called without one.
    pub page_limit: u32,
    /// Delay applied by [`ResourceStore::search_debounced`].
    pub search_debounce: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            search_debounce: Duration::from_millis(300),
        }
    }
}

impl From<&GatewayConfig> for StoreOptions {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            page_limit: config.page_limit,
            search_debounce: config.search_debounce,
        }
    }
}

/// Resources whose verification endpoint lives under their base path.
pub trait VerifyEndpoint {
    /// Path segment after the base path, e.g. `"verify-business"`.
    const VERIFY_SUFFIX: &'static str;
}

// ---------------------------------------------------------------------------
// Reply classification
// ---------------------------------------------------------------------------

/// A settled API call reduced to what the store acts on.
enum Reply<T> {
    /// `success: true`.
    Accepted {
        data: Option<T>,
        message: Option<String>,
    },
    /// The server answered and said no (`success: false` or non-2xx).
    Rejected(String),
    /// No usable answer: transport failure, 401, or undecodable body.
    Failed(GatewayError),
}

impl<T> Reply<T> {
    fn from_result(result: Result<ApiResponse<T>, GatewayError>, fallback: &str) -> Self {
        match result {
            Ok(response) if response.success => Reply::Accepted {
                data: response.data,
                message: response.message.filter(|m| !m.trim().is_empty()),
            },
            Ok(response) => Reply::Rejected(response.message_or(fallback)),
            Err(e @ GatewayError::Api { .. }) => Reply::Rejected(e.user_message(fallback)),
            Err(e) => Reply::Failed(e),
        }
    }
}

async fn race<T>(ticket: &Ticket, request: impl Future<Output = T>) -> Option<T> {
    tokio::select! {
        biased;
        _ = ticket.cancelled() => None,
        out = request => Some(out),
    }
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// BusyGuard
// ---------------------------------------------------------------------------

/// Holds one unit of a busy flag. Settling applies the outcome and releases
/// the flag in the same transition; dropping an unsettled guard (superseded
/// or cancelled request) only releases the flag.
struct BusyGuard<'a, R: Resource> {
    store: &'a ResourceStore<R>,
    busy: Busy,
    armed: bool,
}

impl<R: Resource> BusyGuard<'_, R> {
    fn settle<F>(mut self, apply: F)
    where
        F: FnOnce(&mut StoreState<R>) -> Option<StoreEvent>,
    {
        self.armed = false;
        let busy = self.busy;
        self.store.update(|state| {
            state.leave(busy);
            apply(state)
        });
    }
}

impl<R: Resource> Drop for BusyGuard<'_, R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let busy = self.busy;
        self.store.update(|state| {
            state.leave(busy);
            (!state.flags.get(busy)).then(|| ResourceStore::<R>::event(StoreAction::Cancelled))
        });
    }
}

// ---------------------------------------------------------------------------
// ResourceStore
// ---------------------------------------------------------------------------

/// State container for one resource type.
///
/// Designed to be wrapped in `Arc` and shared with every view that shows the
/// resource; one instance per resource type.
pub struct ResourceStore<R: Resource> {
    gateway: Arc<HttpGateway>,
    events: Arc<EventBus>,
    state: RwLock<StoreState<R>>,
    sequencer: RequestSequencer,
    search_intent: AtomicU64,
    options: StoreOptions,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(gateway: Arc<HttpGateway>, events: Arc<EventBus>, options: StoreOptions) -> Self {
        Self {
            gateway,
            events,
            state: RwLock::new(StoreState::default()),
            sequencer: RequestSequencer::new(),
            search_intent: AtomicU64::new(0),
            options,
        }
    }

    /// Name used as the event source, e.g. `"businesses"`.
    pub fn name(&self) -> &'static str {
        R::PLURAL
    }

    /// A consistent copy of the current state.
    pub fn snapshot(&self) -> StoreState<R> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribe to change notifications from every store on the bus.
    /// Filter on [`StoreEvent::store`] to follow this one.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    // ---- reads ----

    /// Fetch one page of the collection.
    ///
    /// On success the collection and pagination are replaced; on failure the
    /// previous page is kept and `error` is set.
    pub async fn fetch_list(&self, page: Option<u32>, limit: Option<u32>) {
        let request = PageRequest::new(page, limit, self.options.page_limit);
        let ticket = self.sequencer.begin(ReadKey::List);
        let guard = self.enter(Busy::Loading, |state| state.last_request = Some(request));
        tracing::debug!(resource = R::PLURAL, page = request.page, limit = request.limit, "Fetching list");

        let query = request.query_pairs();
        let Some(result) = race(
            &ticket,
            self.gateway.get::<serde_json::Value>(R::BASE_PATH, &query),
        )
        .await
        else {
            tracing::debug!(resource = R::PLURAL, seq = ticket.seq(), "List fetch superseded");
            return;
        };

        let fallback = format!("Failed to fetch {}", R::PLURAL);
        let outcome = match Reply::from_result(result, &fallback) {
            Reply::Accepted {
                data: Some(data),
                message,
            } => match ListPage::<R>::from_data(data, R::COLLECTION_KEY) {
                Ok(page) => Ok((page, message)),
                Err(e) => {
                    tracing::error!(resource = R::PLURAL, error = %e, "Malformed list response");
                    Err(fallback)
                }
            },
            Reply::Accepted { data: None, .. } => Err(fallback),
            Reply::Rejected(message) => Err(message),
            Reply::Failed(e) => Err(e.user_message(&fallback)),
        };

        guard.settle(|state| {
            if !self.sequencer.is_current(&ticket) {
                return None;
            }
            match outcome {
                Ok((ListPage { mut items, metadata }, message)) => {
                    let fetched = items.len();
                    let limit = request.limit as usize;
                    if fetched > limit {
                        tracing::warn!(resource = R::PLURAL, fetched, limit, "Server returned more records than requested");
                        items.truncate(limit);
                    }
                    let pagination = Pagination::resolve(request, metadata.as_ref(), fetched);
                    tracing::info!(
                        resource = R::PLURAL,
                        page = pagination.page,
                        total = pagination.total,
                        count = items.len(),
                        "List loaded"
                    );
                    state.items = items;
                    state.pagination = Some(pagination);
                    state.succeed(message);
                    Some(Self::event(StoreAction::ListLoaded))
                }
                Err(message) => Some(self.failure(state, message)),
            }
        });
        self.sequencer.finish(&ticket);
    }

    /// Re-fetch the page last requested (or the first page).
    pub async fn refresh(&self) {
        let last = self.read(|state| state.last_request);
        match last {
            Some(request) => self.fetch_list(Some(request.page), Some(request.limit)).await,
            None => self.fetch_list(None, None).await,
        }
    }

    /// Fetch the detail record for `id`, replacing any previous one.
    ///
    /// A detail record for a different id is cleared as soon as the request
    /// starts.
    pub async fn fetch_by_id(&self, id: &str) {
        let ticket = self.sequencer.begin(ReadKey::Detail);
        let guard = self.enter(Busy::Loading, |state| {
            if state.detail.as_ref().is_some_and(|detail| detail.id() != id) {
                state.detail = None;
            }
        });

        let path = record_path(R::BASE_PATH, &[id]);
        let Some(result) = race(&ticket, self.gateway.get::<R::Detail>(&path, &[])).await else {
            tracing::debug!(resource = R::PLURAL, id, "Detail fetch superseded");
            return;
        };

        let fallback = format!("Failed to fetch {} details", R::NAME);
        let outcome = match Reply::from_result(result, &fallback) {
            Reply::Accepted {
                data: Some(detail),
                message,
            } => Ok((detail, message)),
            Reply::Accepted { data: None, .. } => Err(fallback),
            Reply::Rejected(message) => Err(message),
            Reply::Failed(e) => Err(e.user_message(&fallback)),
        };

        guard.settle(|state| {
            if !self.sequencer.is_current(&ticket) {
                return None;
            }
            match outcome {
                Ok((detail, message)) => {
                    tracing::info!(resource = R::PLURAL, id, "Detail loaded");
                    state.detail = Some(detail);
                    state.succeed(message);
                    Some(Self::event(StoreAction::DetailLoaded).with_entity(id))
                }
                Err(message) => Some(self.failure(state, message).with_entity(id)),
            }
        });
        self.sequencer.finish(&ticket);
    }

    /// Fetch the headline counts for this resource.
    pub async fn fetch_dashboard(&self) {
        let ticket = self.sequencer.begin(ReadKey::Dashboard);
        let guard = self.enter(Busy::Loading, |_| {});

        let path = format!("{}/dashboard", R::BASE_PATH);
        let Some(result) = race(&ticket, self.gateway.get::<DashboardSummary>(&path, &[])).await
        else {
            return;
        };

        let fallback = format!("Failed to fetch {} dashboard", R::NAME);
        let outcome = match Reply::from_result(result, &fallback) {
            Reply::Accepted {
                data: Some(summary),
                message,
            } => Ok((summary, message)),
            Reply::Accepted { data: None, .. } => Err(fallback),
            Reply::Rejected(message) => Err(message),
            Reply::Failed(e) => Err(e.user_message(&fallback)),
        };

        guard.settle(|state| {
            if !self.sequencer.is_current(&ticket) {
                return None;
            }
            match outcome {
                Ok((summary, message)) => {
                    state.dashboard = Some(summary);
                    state.succeed(message);
                    Some(Self::event(StoreAction::DashboardLoaded))
                }
                Err(message) => Some(self.failure(state, message)),
            }
        });
        self.sequencer.finish(&ticket);
    }

    // ---- search ----

    /// Run a server-side search.
    ///
    /// A blank query leaves search mode without a request. The paginated
    /// collection is never touched.
    pub async fn search(&self, query: &str) {
        self.search_intent.fetch_add(1, Ordering::SeqCst);
        let Some(query) = normalize_query(query) else {
            self.clear_search();
            return;
        };

        let ticket = self.sequencer.begin(ReadKey::Search);
        let guard = self.enter(Busy::Searching, |state| {
            state.search_query = Some(query.clone());
        });

        let path = format!("{}/search", R::BASE_PATH);
        let body = SearchRequest { query: &query };
        let Some(result) = race(&ticket, self.gateway.post::<_, Vec<R>>(&path, &body)).await else {
            tracing::debug!(resource = R::PLURAL, query = %query, "Search superseded");
            return;
        };

        let fallback = format!("Failed to search {}", R::PLURAL);
        let outcome = match Reply::from_result(result, &fallback) {
            Reply::Accepted { data, message } => Ok((data.unwrap_or_default(), message)),
            Reply::Rejected(message) => Err(message),
            Reply::Failed(e) => Err(e.user_message(&fallback)),
        };

        guard.settle(|state| {
            if !self.sequencer.is_current(&ticket) {
                return None;
            }
            state.search_active = true;
            match outcome {
                Ok((results, message)) => {
                    tracing::info!(resource = R::PLURAL, query = %query, count = results.len(), "Search completed");
                    state.search_results = results;
                    state.succeed(message);
                    Some(Self::event(StoreAction::SearchUpdated))
                }
                Err(message) => Some(self.failure(state, message)),
            }
        });
        self.sequencer.finish(&ticket);
    }

    /// Search after the configured debounce delay.
    ///
    /// Returns `false` without issuing a request if a newer search, a
    /// `clear_search` or a `cancel_pending` happened during the delay.
    pub async fn search_debounced(&self, query: &str) -> bool {
        if normalize_query(query).is_none() {
            self.search(query).await;
            return false;
        }
        let intent = self.search_intent.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.options.search_debounce).await;
        if self.search_intent.load(Ordering::SeqCst) != intent {
            tracing::debug!(resource = R::PLURAL, "Debounced search dropped for newer input");
            return false;
        }
        self.search(query).await;
        true
    }

    /// Leave search mode. The paginated collection is left as is and no
    /// re-fetch is triggered.
    pub fn clear_search(&self) {
        self.search_intent.fetch_add(1, Ordering::SeqCst);
        self.sequencer.invalidate(ReadKey::Search);
        self.update(|state| {
            state.search_results.clear();
            state.search_active = false;
            state.search_query = None;
            Some(Self::event(StoreAction::SearchCleared))
        });
    }

    /// Reset `error` without touching data.
    pub fn clear_error(&self) {
        self.update(|state| {
            state.error = None;
            Some(Self::event(StoreAction::ErrorCleared))
        });
    }

    /// Cancel every in-flight read (e.g. when the owning view goes away).
    /// Their responses will not be applied.
    pub fn cancel_pending(&self) {
        self.search_intent.fetch_add(1, Ordering::SeqCst);
        let cancelled = self.sequencer.cancel_all();
        if cancelled > 0 {
            tracing::debug!(resource = R::PLURAL, cancelled, "Cancelled in-flight reads");
            self.events.publish(Self::event(StoreAction::Cancelled));
        }
    }

    // ---- mutations ----

    /// Create a record. The confirmed record is inserted at the front of the
    /// current page.
    ///
    /// Server-side refusals come back as `Ok` with `success == false`;
    /// `Err` means no usable response was received.
    pub async fn create(&self, draft: &R::Draft) -> Result<MutationResult, StoreError> {
        let guard = self.enter(Busy::Editing, |_| {});
        let result = self.gateway.post::<_, R>(R::BASE_PATH, draft).await;
        let fallback = format!("Failed to create {}", R::NAME);

        match Reply::from_result(result, &fallback) {
            Reply::Accepted { data, message } => {
                let message = message.unwrap_or_else(|| format!("{} created", capitalized(R::NAME)));
                let id = data.as_ref().map(|record| record.id().to_string());
                tracing::info!(resource = R::PLURAL, id = ?id, "Record created");
                guard.settle(|state| {
                    if let Some(record) = data {
                        let id = record.id().to_string();
                        state.items.retain(|item| item.id() != id);
                        state.items.insert(0, record);
                        if let Some(pagination) = state.pagination.as_mut() {
                            pagination.record_added();
                            state.items.truncate(pagination.limit as usize);
                        }
                    }
                    state.succeed(Some(message.clone()));
                    let event = Self::event(StoreAction::Created).with_message(message.clone());
                    Some(match id {
                        Some(id) => event.with_entity(id),
                        None => event,
                    })
                });
                Ok(MutationResult::succeeded(message))
            }
            Reply::Rejected(message) => {
                guard.settle(|state| Some(self.failure(state, message.clone())));
                Ok(MutationResult::failed(message))
            }
            Reply::Failed(e) => {
                let message = e.user_message(&fallback);
                guard.settle(|state| Some(self.failure(state, message)));
                Err(StoreError::Gateway(e))
            }
        }
    }

    /// Edit the record `id`.
    ///
    /// On success the matching entry in the collection (and search results)
    /// is replaced and a loaded detail record for `id` takes every field of
    /// the response, including cleared ones. If the server does not echo the record back, the
    /// patch itself is applied. Other entries are untouched.
    pub async fn edit(&self, id: &str, patch: &R::Patch) -> Result<MutationResult, StoreError> {
        let guard = self.enter(Busy::Editing, |_| {});
        let path = record_path(R::BASE_PATH, &["edit", id]);
        let result = self.gateway.put::<_, R>(&path, patch).await;
        let fallback = format!("Failed to update {}", R::NAME);

        match Reply::from_result(result, &fallback) {
            Reply::Accepted { data, message } => {
                let message = message.unwrap_or_else(|| format!("{} updated", capitalized(R::NAME)));
                tracing::info!(resource = R::PLURAL, id, "Record updated");
                guard.settle(|state| {
                    apply_edit(state, id, data, patch);
                    state.succeed(Some(message.clone()));
                    Some(
                        Self::event(StoreAction::Edited)
                            .with_entity(id)
                            .with_message(message.clone()),
                    )
                });
                Ok(MutationResult::succeeded(message))
            }
            Reply::Rejected(message) => {
                guard.settle(|state| Some(self.failure(state, message.clone()).with_entity(id)));
                Ok(MutationResult::failed(message))
            }
            Reply::Failed(e) => {
                let message = e.user_message(&fallback);
                guard.settle(|state| Some(self.failure(state, message).with_entity(id)));
                Err(StoreError::Gateway(e))
            }
        }
    }

    /// Delete the record `id`.
    ///
    /// The record is removed from the collection, the search results and the
    /// detail slot only once the server confirms; otherwise everything stays
    /// and `error` is set.
    pub async fn delete(&self, id: &str) {
        let guard = self.enter(Busy::Deleting, |_| {});
        let path = format!("{}/delete", R::BASE_PATH);
        let result = self
            .gateway
            .delete::<_, serde_json::Value>(&path, &IdRequest { id })
            .await;
        let fallback = format!("Failed to delete {}", R::NAME);

        match Reply::from_result(result, &fallback) {
            Reply::Accepted { message, .. } => {
                let message = message.unwrap_or_else(|| format!("{} deleted", capitalized(R::NAME)));
                tracing::info!(resource = R::PLURAL, id, "Record deleted");
                guard.settle(|state| {
                    state.items.retain(|item| item.id() != id);
                    state.search_results.retain(|item| item.id() != id);
                    if state.detail.as_ref().is_some_and(|detail| detail.id() == id) {
                        state.detail = None;
                    }
                    if let Some(pagination) = state.pagination.as_mut() {
                        pagination.record_removed();
                    }
                    state.succeed(Some(message.clone()));
                    Some(
                        Self::event(StoreAction::Deleted)
                            .with_entity(id)
                            .with_message(message),
                    )
                });
            }
            Reply::Rejected(message) => {
                guard.settle(|state| Some(self.failure(state, message).with_entity(id)));
            }
            Reply::Failed(e) => {
                let message = e.user_message(&fallback);
                guard.settle(|state| Some(self.failure(state, message).with_entity(id)));
            }
        }
    }

    // ---- internals ----

    fn event(action: StoreAction) -> StoreEvent {
        StoreEvent::new(R::PLURAL, action)
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState<R>) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Apply one transition under the write lock, then publish its event.
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut StoreState<R>) -> Option<StoreEvent>,
    {
        let event = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut state)
        };
        if let Some(event) = event {
            self.events.publish(event);
        }
    }

    /// Enter the pending state for `busy`.
    fn enter(&self, busy: Busy, prepare: impl FnOnce(&mut StoreState<R>)) -> BusyGuard<'_, R> {
        self.update(|state| {
            state.enter(busy);
            state.error = None;
            prepare(state);
            Some(Self::event(StoreAction::Pending))
        });
        BusyGuard {
            store: self,
            busy,
            armed: true,
        }
    }

    fn failure(&self, state: &mut StoreState<R>, message: String) -> StoreEvent {
        tracing::warn!(resource = R::PLURAL, error = %message, "Store action failed");
        state.fail(message.clone());
        Self::event(StoreAction::Failed).with_message(message)
    }

    fn patch_matching(
        &self,
        state: &mut StoreState<R>,
        id: &str,
        item_fn: impl Fn(&mut R),
        detail_fn: impl FnOnce(&mut R::Detail),
    ) {
        state
            .items
            .iter_mut()
            .chain(state.search_results.iter_mut())
            .filter(|item| item.id() == id)
            .for_each(item_fn);
        if let Some(detail) = state.detail.as_mut().filter(|detail| detail.id() == id) {
            detail_fn(detail);
        }
    }
}

/// Patch every cached copy of `id` after a confirmed edit.
fn apply_edit<R: Resource>(state: &mut StoreState<R>, id: &str, echoed: Option<R>, patch: &R::Patch) {
    let items = state
        .items
        .iter_mut()
        .chain(state.search_results.iter_mut())
        .filter(|item| item.id() == id);

    match echoed {
        Some(record) => {
            for item in items {
                *item = record.clone();
            }
            if let Some(detail) = state.detail.as_mut().filter(|detail| detail.id() == id) {
                merge_into(detail, &record, overlay_record);
            }
        }
        None => {
            for item in items {
                merge_into(item, patch, overlay);
            }
            if let Some(detail) = state.detail.as_mut().filter(|detail| detail.id() == id) {
                merge_into(detail, patch, overlay);
            }
        }
    }
}

fn merge_into<T, P>(target: &mut T, patch: &P, merge: fn(&T, &P) -> Result<T, CoreError>)
where
    T: serde::Serialize + serde::de::DeserializeOwned,
    P: serde::Serialize + ?Sized,
{
    match merge(&*target, patch) {
        Ok(merged) => *target = merged,
        Err(e) => tracing::error!(error = %e, "Could not merge update into cached record"),
    }
}

// ---------------------------------------------------------------------------
// Status toggles
// ---------------------------------------------------------------------------

impl<R> ResourceStore<R>
where
    R: Resource + Suspendable,
    R::Detail: Suspendable,
{
    /// Suspend the account `id`.
    ///
    /// Any failure, including a server refusal, is returned as `Err` so the
    /// caller can show its failure dialog.
    pub async fn suspend(&self, id: &str) -> Result<MutationResult, StoreError> {
        self.set_suspension(id, true).await
    }

    /// Lift the suspension on `id`. Fails like [`suspend`](Self::suspend).
    pub async fn unsuspend(&self, id: &str) -> Result<MutationResult, StoreError> {
        self.set_suspension(id, false).await
    }

    async fn set_suspension(&self, id: &str, suspended: bool) -> Result<MutationResult, StoreError> {
        let (segment, action, verb) = if suspended {
            ("suspend", StoreAction::Suspended, "suspended")
        } else {
            ("unsuspend", StoreAction::Unsuspended, "unsuspended")
        };

        let guard = self.enter(Busy::Suspending, |_| {});
        let path = format!("{}/{}", R::BASE_PATH, segment);
        let result = self
            .gateway
            .post::<_, serde_json::Value>(&path, &IdRequest { id })
            .await;
        let fallback = format!("Failed to {segment} {}", R::NAME);

        match Reply::from_result(result, &fallback) {
            Reply::Accepted { message, .. } => {
                let message = message.unwrap_or_else(|| format!("{} {verb}", capitalized(R::NAME)));
                tracing::info!(resource = R::PLURAL, id, suspended, "Suspension updated");
                guard.settle(|state| {
                    self.patch_matching(
                        state,
                        id,
                        |item| item.set_suspended(suspended),
                        |detail| detail.set_suspended(suspended),
                    );
                    state.succeed(Some(message.clone()));
                    Some(Self::event(action).with_entity(id).with_message(message.clone()))
                });
                Ok(MutationResult::succeeded(message))
            }
            Reply::Rejected(message) => {
                guard.settle(|state| Some(self.failure(state, message.clone()).with_entity(id)));
                Err(StoreError::Rejected(message))
            }
            Reply::Failed(e) => {
                let message = e.user_message(&fallback);
                guard.settle(|state| Some(self.failure(state, message).with_entity(id)));
                Err(StoreError::Gateway(e))
            }
        }
    }
}

impl<R> ResourceStore<R>
where
    R: Resource + Verifiable + VerifyEndpoint,
    R::Detail: Verifiable,
{
    /// Mark `id` as verified.
    ///
    /// Returns like [`edit`](Self::edit): refusals are `Ok` with
    /// `success == false`, only a missing response is `Err`. On success the
    /// verification flag is set on the list entry and the loaded detail
    /// record for `id`; nothing else changes.
    pub async fn verify(&self, id: &str) -> Result<MutationResult, StoreError> {
        let guard = self.enter(Busy::Verifying, |_| {});
        let path = format!("{}/{}", R::BASE_PATH, R::VERIFY_SUFFIX);
        let result = self
            .gateway
            .post::<_, serde_json::Value>(&path, &IdRequest { id })
            .await;
        let fallback = format!("Failed to verify {}", R::NAME);

        match Reply::from_result(result, &fallback) {
            Reply::Accepted { message, .. } => {
                let message = message.unwrap_or_else(|| format!("{} verified", capitalized(R::NAME)));
                tracing::info!(resource = R::PLURAL, id, "Record verified");
                guard.settle(|state| {
                    self.patch_matching(
                        state,
                        id,
                        |item| item.set_verified(true),
                        |detail| detail.set_verified(true),
                    );
                    state.succeed(Some(message.clone()));
                    Some(
                        Self::event(StoreAction::Verified)
                            .with_entity(id)
                            .with_message(message.clone()),
                    )
                });
                Ok(MutationResult::succeeded(message))
            }
            Reply::Rejected(message) => {
                guard.settle(|state| Some(self.failure(state, message.clone()).with_entity(id)));
                Ok(MutationResult::failed(message))
            }
            Reply::Failed(e) => {
                let message = e.user_message(&fallback);
                guard.settle(|state| Some(self.failure(state, message).with_entity(id)));
                Err(StoreError::Gateway(e))
            }
        }
    }
}
