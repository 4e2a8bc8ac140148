#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use fundhub_core::models::SessionUser;
use fundhub_events::EventBus;
use fundhub_gateway::{GatewayConfig, HttpGateway, MemoryStorage, Navigator, SessionStore};
use fundhub_stores::{StoreOptions, Stores};

// ---------------------------------------------------------------------------
// Mock REST API
// ---------------------------------------------------------------------------

const CLIENT_TIMEOUT: Duration = Duration::from_secs(2);
const STALL: Duration = Duration::from_secs(10);

/// In-memory backend serving `/api/<resource>` for all four resources.
#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    records: Mutex<HashMap<String, Vec<Value>>>,
    calls: Mutex<Vec<String>>,
    refused: Mutex<HashSet<String>>,
    page_delays: Mutex<HashMap<u32, u64>>,
    search_delays: Mutex<HashMap<String, u64>>,
    detail_delays: Mutex<HashMap<String, u64>>,
    cleared_on_edit: Mutex<Vec<String>>,
    expired: AtomicBool,
    stalled: AtomicBool,
    broken: AtomicBool,
    silent_edits: AtomicBool,
    oversized_pages: AtomicBool,
    created: AtomicUsize,
}

fn collection_key(resource: &str) -> &'static str {
    match resource {
        "users" => "users",
        "businesses" => "businesses",
        "investors" => "investors",
        _ => "tests",
    }
}

impl MockApi {
    pub fn seed(&self, resource: &str, records: Vec<Value>) {
        self.inner
            .records
            .lock()
            .unwrap()
            .insert(resource.to_string(), records);
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.inner
            .records
            .lock()
            .unwrap()
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn record(&self, resource: &str, id: &str) -> Option<Value> {
        self.records(resource).into_iter().find(|r| r["_id"] == id)
    }

    /// Every request seen, as `"METHOD /path"`.
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, suffix: &str) -> usize {
        self.calls().iter().filter(|c| c.ends_with(suffix)).count()
    }

    /// Answer `action` (e.g. `"delete"`, `"verify-business"`) with
    /// `success: false`.
    pub fn refuse(&self, action: &str) {
        self.inner.refused.lock().unwrap().insert(action.to_string());
    }

    pub fn delay_page(&self, page: u32, ms: u64) {
        self.inner.page_delays.lock().unwrap().insert(page, ms);
    }

    pub fn delay_search(&self, query: &str, ms: u64) {
        self.inner
            .search_delays
            .lock()
            .unwrap()
            .insert(query.to_string(), ms);
    }

    pub fn delay_detail(&self, id: &str, ms: u64) {
        self.inner
            .detail_delays
            .lock()
            .unwrap()
            .insert(id.to_string(), ms);
    }

    /// Answer every request with 401.
    pub fn expire_tokens(&self) {
        self.inner.expired.store(true, Ordering::SeqCst);
    }

    /// Hold every request well past the client timeout.
    pub fn stall(&self) {
        self.inner.stalled.store(true, Ordering::SeqCst);
    }

    /// Answer every request with 500.
    pub fn break_down(&self) {
        self.inner.broken.store(true, Ordering::SeqCst);
    }

    /// Confirm edits without echoing the record back.
    pub fn silent_edits(&self) {
        self.inner.silent_edits.store(true, Ordering::SeqCst);
    }

    /// Null out `field` on every edited record, as a server-side
    /// normalisation would.
    pub fn clear_on_edit(&self, field: &str) {
        self.inner
            .cleared_on_edit
            .lock()
            .unwrap()
            .push(field.to_string());
    }

    /// Ignore `limit` and return every record on each page.
    pub fn oversized_pages(&self) {
        self.inner.oversized_pages.store(true, Ordering::SeqCst);
    }

    fn log(&self, call: String) {
        self.inner.calls.lock().unwrap().push(call);
    }

    fn is_refused(&self, action: &str) -> bool {
        self.inner.refused.lock().unwrap().contains(action)
    }

    async fn hold_if_stalled(&self) {
        if self.inner.stalled.load(Ordering::SeqCst) {
            tokio::time::sleep(STALL).await;
        }
    }

    fn gate(&self) -> Option<Response> {
        if self.inner.expired.load(Ordering::SeqCst) {
            return Some(reply(
                StatusCode::UNAUTHORIZED,
                json!({"success": false, "message": "Token expired"}),
            ));
        }
        if self.inner.broken.load(Ordering::SeqCst) {
            return Some(reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"success": false, "message": "Database down"}),
            ));
        }
        None
    }

    fn update(&self, resource: &str, id: &str, apply: impl FnOnce(&mut Value)) -> Option<Value> {
        let mut records = self.inner.records.lock().unwrap();
        let record = records
            .get_mut(resource)?
            .iter_mut()
            .find(|r| r["_id"] == id)?;
        apply(record);
        Some(record.clone())
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn ok(message: &str, data: Value) -> Response {
    reply(
        StatusCode::OK,
        json!({"success": true, "message": message, "data": data}),
    )
}

fn refused(message: String) -> Response {
    reply(StatusCode::OK, json!({"success": false, "message": message}))
}

fn not_found(resource: &str) -> Response {
    reply(
        StatusCode::NOT_FOUND,
        json!({"success": false, "message": format!("No {resource} record with that id")}),
    )
}

async fn pause(ms: Option<u64>) {
    if let Some(ms) = ms {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

async fn list(
    State(api): State<MockApi>,
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    api.log(format!("GET /api/{resource}"));
    api.hold_if_stalled().await;
    if let Some(response) = api.gate() {
        return response;
    }
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: u32 = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let delay = api.inner.page_delays.lock().unwrap().get(&page).copied();
    pause(delay).await;

    let records = api.records(&resource);
    let total = records.len() as u32;
    let items: Vec<Value> = if api.inner.oversized_pages.load(Ordering::SeqCst) {
        records
    } else {
        records
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect()
    };
    let mut data = serde_json::Map::new();
    data.insert(collection_key(&resource).to_string(), Value::Array(items));
    data.insert(
        "metadata".into(),
        json!({"total": total, "page": page, "limit": limit, "totalPages": total.div_ceil(limit)}),
    );
    ok("Fetched", Value::Object(data))
}

async fn detail(
    State(api): State<MockApi>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    api.log(format!("GET /api/{resource}/{id}"));
    api.hold_if_stalled().await;
    if let Some(response) = api.gate() {
        return response;
    }
    if id == "dashboard" {
        let records = api.records(&resource);
        let suspended = records.iter().filter(|r| r["isSuspended"] == true).count();
        let verified = records.iter().filter(|r| r["isVerified"] == true).count();
        return ok(
            "Dashboard",
            json!({
                "total": records.len(),
                "active": records.len() - suspended,
                "suspended": suspended,
                "verified": verified
            }),
        );
    }
    let delay = api.inner.detail_delays.lock().unwrap().get(&id).copied();
    pause(delay).await;
    match api.record(&resource, &id) {
        Some(record) => ok("Fetched", record),
        None => not_found(&resource),
    }
}

async fn action(
    State(api): State<MockApi>,
    Path((resource, action)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    api.log(format!("POST /api/{resource}/{action}"));
    api.hold_if_stalled().await;
    if let Some(response) = api.gate() {
        return response;
    }
    if api.is_refused(&action) {
        return refused(format!("Cannot {action} this record"));
    }

    if action == "search" {
        let query = body["query"].as_str().unwrap_or_default().to_lowercase();
        let delay = api.inner.search_delays.lock().unwrap().get(&query).copied();
        pause(delay).await;
        let matches: Vec<Value> = api
            .records(&resource)
            .into_iter()
            .filter(|r| r.to_string().to_lowercase().contains(&query))
            .collect();
        return ok("Search complete", Value::Array(matches));
    }

    let id = body["id"].as_str().unwrap_or_default().to_string();
    let updated = match action.as_str() {
        "suspend" => api.update(&resource, &id, |r| r["isSuspended"] = json!(true)),
        "unsuspend" => api.update(&resource, &id, |r| r["isSuspended"] = json!(false)),
        "verify" | "verify-business" => api.update(&resource, &id, |r| r["isVerified"] = json!(true)),
        _ => return reply(StatusCode::NOT_FOUND, json!({"success": false})),
    };
    match updated {
        Some(_) => reply(StatusCode::OK, json!({"success": true, "message": format!("Record {action} done")})),
        None => not_found(&resource),
    }
}

async fn create(
    State(api): State<MockApi>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    api.log(format!("POST /api/{resource}"));
    api.hold_if_stalled().await;
    if let Some(response) = api.gate() {
        return response;
    }
    if api.is_refused("create") {
        return refused("Email already registered".into());
    }
    let n = api.inner.created.fetch_add(1, Ordering::SeqCst) + 1;
    body["_id"] = json!(format!("new-{n}"));
    api.inner
        .records
        .lock()
        .unwrap()
        .entry(resource)
        .or_default()
        .insert(0, body.clone());
    ok("Created", body)
}

async fn edit(
    State(api): State<MockApi>,
    Path((resource, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Response {
    api.log(format!("PUT /api/{resource}/edit/{id}"));
    api.hold_if_stalled().await;
    if let Some(response) = api.gate() {
        return response;
    }
    if api.is_refused("edit") {
        return refused("Validation failed".into());
    }
    let cleared = api.inner.cleared_on_edit.lock().unwrap().clone();
    let updated = api.update(&resource, &id, |record| {
        if let (Some(target), Some(fields)) = (record.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
            for key in cleared {
                target.insert(key, Value::Null);
            }
        }
    });
    match updated {
        Some(_) if api.inner.silent_edits.load(Ordering::SeqCst) => {
            reply(StatusCode::OK, json!({"success": true, "message": "Updated"}))
        }
        Some(record) => ok("Updated", record),
        None => not_found(&resource),
    }
}

async fn remove(
    State(api): State<MockApi>,
    Path((resource, segment)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    api.log(format!("DELETE /api/{resource}/{segment}"));
    api.hold_if_stalled().await;
    if let Some(response) = api.gate() {
        return response;
    }
    if api.is_refused("delete") {
        return refused("Record is referenced by an open deal room".into());
    }
    let id = body["id"].as_str().unwrap_or_default();
    let mut records = api.inner.records.lock().unwrap();
    let Some(list) = records.get_mut(&resource) else {
        return not_found(&resource);
    };
    let before = list.len();
    list.retain(|r| r["_id"] != id);
    if list.len() == before {
        return not_found(&resource);
    }
    reply(StatusCode::OK, json!({"success": true, "message": "Deleted"}))
}

pub fn router(api: MockApi) -> Router {
    Router::new()
        .route("/api/{resource}", get(list).post(create))
        .route(
            "/api/{resource}/{id}",
            get(detail).post(action).delete(remove),
        )
        .route("/api/{resource}/edit/{id}", put(edit))
        .with_state(api)
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock api");
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub fn users(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "_id": format!("u{i}"),
                "firstName": format!("User{i}"),
                "lastName": "Okafor",
                "email": format!("user{i}@example.com"),
                "isSuspended": false
            })
        })
        .collect()
}

pub fn businesses() -> Vec<Value> {
    vec![
        json!({
            "_id": "biz-1",
            "businessName": "Acme Farms",
            "industry": "agriculture",
            "isVerified": false,
            "dealRoomDetails": {
                "_id": "dr-1",
                "status": "open",
                "proposals": [{"_id": "p1", "investorId": "inv-1", "amount": 50000.0, "status": "pending"}]
            }
        }),
        json!({"_id": "biz-2", "businessName": "Bolt Logistics", "industry": "transport", "isVerified": false}),
        json!({"_id": "biz-3", "businessName": "Cobalt Health", "industry": "health", "isVerified": true}),
    ]
}

pub fn investors() -> Vec<Value> {
    vec![
        json!({"_id": "inv-1", "name": "Seed Partners", "email": "deals@seed.test", "ticketMin": 10000.0, "ticketMax": 100000.0}),
        json!({"_id": "inv-2", "name": "Growth Fund", "email": "hello@growth.test", "isVerified": true}),
    ]
}

pub fn tests() -> Vec<Value> {
    vec![
        json!({"_id": "ft-1", "businessId": "biz-1", "businessName": "Acme Farms", "score": 72.0, "status": "completed"}),
        json!({"_id": "ft-2", "businessId": "biz-2", "businessName": "Bolt Logistics", "score": 41.5, "status": "completed"}),
    ]
}

// ---------------------------------------------------------------------------
// Client fixtures
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub struct Harness {
    pub api: MockApi,
    pub stores: Stores,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub bus: Arc<EventBus>,
}

/// Seeded mock API plus a signed-in set of stores pointed at it.
pub async fn harness() -> Harness {
    let api = MockApi::default();
    api.seed("users", users(25));
    api.seed("businesses", businesses());
    api.seed("investors", investors());
    api.seed("fundability-tests", tests());
    let url = spawn_api(router(api.clone())).await;
    signed_in(api, url).await
}

/// Signed-in stores whose API URL points at a port nobody listens on, so
/// every request fails before a response arrives. `api` is never served.
pub async fn unreachable_harness() -> Harness {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    signed_in(MockApi::default(), format!("http://{addr}")).await
}

async fn signed_in(api: MockApi, url: String) -> Harness {
    let bus = Arc::new(EventBus::default());
    let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new()), bus.clone()));
    session
        .establish(
            "admin-token".into(),
            SessionUser {
                id: "admin-1".into(),
                email: "admin@fundhub.test".into(),
                first_name: None,
                last_name: None,
                role: Some("admin".into()),
            },
        )
        .await
        .expect("establish session");
    let navigator = Arc::new(RecordingNavigator::default());
    let config = GatewayConfig {
        request_timeout: CLIENT_TIMEOUT,
        ..GatewayConfig::for_api(url)
    };
    let gateway = Arc::new(
        HttpGateway::new(&config, session.clone(), navigator.clone()).expect("gateway"),
    );
    let options = StoreOptions {
        page_limit: 10,
        search_debounce: Duration::from_millis(50),
    };
    let stores = Stores::new(gateway, bus.clone(), options);

    Harness {
        api,
        stores,
        session,
        navigator,
        bus,
    }
}
