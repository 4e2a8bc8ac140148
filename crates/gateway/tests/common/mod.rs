#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use fundhub_events::EventBus;
use fundhub_gateway::{HttpGateway, MemoryStorage, Navigator, SessionStore};

// ---------------------------------------------------------------------------
// Mock API
// ---------------------------------------------------------------------------

/// Authorization headers seen by the mock API, keyed by path.
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl Recorder {
    fn record(&self, path: &str, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen.lock().unwrap().push((path.to_string(), auth));
    }

    /// The authorization header recorded for the last call to `path`.
    pub fn last_auth(&self, path: &str) -> Option<Option<String>> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, auth)| auth.clone())
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

async fn list_users(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record("/api/users", &headers);
    Json(json!({
        "success": true,
        "message": "Users fetched",
        "data": {
            "users": [
                {"_id": "u1", "firstName": "Ada", "lastName": "Obi", "email": "ada@example.com"}
            ],
            "metadata": {"total": 1, "page": 1, "limit": 10, "totalPages": 1}
        }
    }))
}

async fn login(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record("/api/auth/login", &headers);
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Welcome back",
                "data": {
                    "token": "fresh-token",
                    "user": {"_id": "admin-1", "email": body["email"], "role": "admin"}
                }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
    }
}

async fn expired(State(rec): State<Recorder>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    rec.record("/api/expired", &headers);
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "jwt expired"})),
    )
}

async fn broken() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "message": "Database down"})),
    )
}

async fn bad_gateway() -> StatusCode {
    StatusCode::BAD_GATEWAY
}

async fn garbage() -> &'static str {
    "not json"
}

/// Router exercising every gateway code path.
pub fn mock_api(recorder: Recorder) -> Router {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/auth/login", post(login))
        .route("/api/expired", get(expired))
        .route("/api/broken", get(broken))
        .route("/api/bad-gateway", get(bad_gateway))
        .route("/api/garbage", get(garbage))
        .with_state(recorder)
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
// Client fixtures
// ---------------------------------------------------------------------------

/// Navigator that records every requested route.
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

pub struct TestClient {
    pub gateway: HttpGateway,
    pub session: Arc<SessionStore>,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub bus: Arc<EventBus>,
}

pub fn test_client(api_url: &str) -> TestClient {
    let bus = Arc::new(EventBus::default());
    let storage = Arc::new(MemoryStorage::new());
    let session = Arc::new(SessionStore::new(storage.clone(), bus.clone()));
    let navigator = Arc::new(RecordingNavigator::default());
    let gateway = HttpGateway::with_client(
        reqwest_client(),
        api_url.to_string(),
        session.clone(),
        navigator.clone(),
    );
    TestClient {
        gateway,
        session,
        storage,
        navigator,
        bus,
    }
}

fn reqwest_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}
