//! In-process stub of the matchday backend.
//!
//! Serves the same envelope shapes as the real API from memory, bound to
//! an ephemeral port on 127.0.0.1. Tests tweak [`StubState`] to script
//! failures and delays.

#![allow(dead_code, missing_docs, clippy::panic)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use matchday::app_state::AppState;
use matchday::config::ClientConfig;
use matchday::session::{MemorySecureStore, SecureStore};

/// Password accepted by the stub's `/login`.
pub const PASSWORD: &str = "secret";
/// Token handed out by the stub's `/login`.
pub const TOKEN: &str = "tok";
/// Account id handed out by the stub's `/login`.
pub const ACCOUNT_ID: i64 = 7;

/// Mutable backend state.
#[derive(Debug, Default)]
pub struct StubState {
    pub events: Vec<Value>,
    pub participants: Vec<Value>,
    pub next_id: i64,
    /// Scripted `GET /events` responses: delay, then this list.
    pub scripted_lists: VecDeque<(Duration, Vec<Value>)>,
    /// When set, `GET /events` answers `success: false` with this message.
    pub list_error: Option<Value>,
    /// When set, `POST /events` answers `success: false` without a message.
    pub reject_event_posts: bool,
    /// When set, `POST /participants` fails with this message.
    pub register_error: Option<Value>,
    /// Delay applied to `POST /participants`.
    pub register_delay: Duration,
    pub participant_posts: usize,
    pub event_posts: Vec<Value>,
    pub auth_headers: Vec<String>,
}

/// Handle to a running stub.
#[derive(Debug, Clone)]
pub struct Stub {
    pub base_url: String,
    state: Arc<Mutex<StubState>>,
}

impl Stub {
    /// Starts a stub on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(StubState {
            next_id: 100,
            ..StubState::default()
        }));

        let app = Router::new()
            .route("/api/v1/events", get(list_events).post(create_event))
            .route("/api/v1/events/{id}", get(get_event).delete(delete_event))
            .route("/api/v1/events/{id}/price", get(get_price))
            .route("/api/v1/categories", get(list_categories).post(create_category))
            .route("/api/v1/login", axum::routing::post(login))
            .route("/api/v1/accounts", get(list_accounts).post(create_account))
            .route("/api/v1/accounts/{id}", get(get_account))
            .route(
                "/api/v1/participants",
                get(list_participants).post(create_participant),
            )
            .with_state(Arc::clone(&state));

        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("stub should bind");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("stub should have an address");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            state,
        }
    }

    /// Locks the backend state for inspection or scripting.
    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Builds an [`AppState`] against this stub with an in-memory session.
    pub fn app(&self) -> (AppState, Arc<MemorySecureStore>) {
        let config = ClientConfig {
            api_url: self.base_url.clone(),
            session_file: "unused.json".into(),
            request_timeout: Some(Duration::from_secs(10)),
            event_bus_capacity: 64,
            log_json: false,
        };
        let secure = Arc::new(MemorySecureStore::new());
        let store: Arc<dyn SecureStore> = Arc::clone(&secure) as Arc<dyn SecureStore>;
        let Ok(app) = AppState::with_store(&config, store) else {
            panic!("app state should build");
        };
        (app, secure)
    }
}

/// Backend-shaped event JSON.
pub fn event_json(id: i64, name: &str, username: &str) -> Value {
    json!({
        "id": id,
        "event_name": name,
        "category_id": 1,
        "Category": { "category_name": "Futsal" },
        "event_start_time": "2025-05-15T19:00:00.000Z",
        "event_end_time": "2025-05-15T21:00:00.000Z",
        "location": "Court A",
        "description": "",
        "number_people": 10,
        "image_url": null,
        "username": username
    })
}

/// Backend-shaped participant JSON.
pub fn participant_json(id: i64, event_id: i64, account_id: i64) -> Value {
    json!({
        "id": id,
        "event_id": event_id,
        "account_id": account_id,
        "participant_name": "someone"
    })
}

type Shared = State<Arc<Mutex<StubState>>>;

fn lock(state: &Arc<Mutex<StubState>>) -> MutexGuard<'_, StubState> {
    state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn ok(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "success": true, "data": data })))
}

fn fail(status: StatusCode, message: Value) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "message": message })))
}

fn bearer(state: &Arc<Mutex<StubState>>, headers: &HeaderMap) -> bool {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let valid = header == format!("Bearer {TOKEN}");
    lock(state).auth_headers.push(header);
    valid
}

fn id_of(value: &Value) -> Option<i64> {
    value.get("id").and_then(Value::as_i64)
}

async fn list_events(State(state): Shared) -> (StatusCode, Json<Value>) {
    let scripted = lock(&state).scripted_lists.pop_front();
    if let Some((delay, events)) = scripted {
        tokio::time::sleep(delay).await;
        return ok(Value::Array(events));
    }
    let guard = lock(&state);
    if let Some(message) = guard.list_error.clone() {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, message);
    }
    let events = guard.events.clone();
    drop(guard);
    ok(Value::Array(events))
}

async fn get_event(State(state): Shared, Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    let found = lock(&state)
        .events
        .iter()
        .find(|e| id_of(e) == Some(id))
        .cloned();
    match found {
        Some(event) => ok(event),
        None => fail(StatusCode::NOT_FOUND, json!("Event not found")),
    }
}

async fn get_price(Path(_id): Path<i64>) -> (StatusCode, Json<Value>) {
    ok(json!({ "price": 25000, "currency": "IDR" }))
}

async fn create_event(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !bearer(&state, &headers) {
        return fail(StatusCode::UNAUTHORIZED, json!("Unauthorized"));
    }
    let mut guard = lock(&state);
    guard.event_posts.push(body.clone());
    if guard.reject_event_posts {
        return (StatusCode::OK, Json(json!({ "success": false })));
    }
    guard.next_id += 1;
    let mut event = body;
    if let Some(obj) = event.as_object_mut() {
        obj.insert("id".to_string(), json!(guard.next_id));
        obj.insert("Category".to_string(), json!({ "category_name": "Futsal" }));
    }
    guard.events.insert(0, event.clone());
    (StatusCode::CREATED, Json(json!({ "success": true, "data": event })))
}

async fn delete_event(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    if !bearer(&state, &headers) {
        return fail(StatusCode::UNAUTHORIZED, json!("Unauthorized"));
    }
    lock(&state).events.retain(|e| id_of(e) != Some(id));
    ok(Value::Null)
}

async fn list_categories() -> (StatusCode, Json<Value>) {
    ok(json!([
        { "id": 1, "category_name": "Futsal" },
        { "id": 2, "category_name": "Badminton" }
    ]))
}

async fn create_category(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !bearer(&state, &headers) {
        return fail(StatusCode::UNAUTHORIZED, json!("Unauthorized"));
    }
    let name = body.get("category_name").cloned().unwrap_or(Value::Null);
    ok(json!({ "id": 3, "category_name": name }))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body.get("password").and_then(Value::as_str) != Some(PASSWORD) {
        return fail(StatusCode::UNAUTHORIZED, json!("Invalid username or password"));
    }
    ok(json!({ "account": { "id": ACCOUNT_ID }, "accessToken": TOKEN }))
}

async fn list_accounts(State(state): Shared, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !bearer(&state, &headers) {
        return fail(StatusCode::UNAUTHORIZED, json!("Unauthorized"));
    }
    ok(json!([{ "id": ACCOUNT_ID, "username": "budi", "email": "budi@example.com" }]))
}

async fn get_account(
    State(state): Shared,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    if !bearer(&state, &headers) {
        return fail(StatusCode::UNAUTHORIZED, json!("Unauthorized"));
    }
    ok(json!({ "id": id, "username": "budi", "email": "budi@example.com", "phone_number": null }))
}

async fn create_account(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let username = body.get("username").cloned().unwrap_or(Value::Null);
    if username == json!("taken") {
        return fail(
            StatusCode::BAD_REQUEST,
            json!(["username already exists", "email already exists"]),
        );
    }
    let email = body.get("email").cloned().unwrap_or(Value::Null);
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": { "id": 8, "username": username, "email": email } })),
    )
}

async fn list_participants(
    State(state): Shared,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !bearer(&state, &headers) {
        return fail(StatusCode::UNAUTHORIZED, json!("Unauthorized"));
    }
    let event_id = query.get("event_id").and_then(|v| v.parse::<i64>().ok());
    let rows: Vec<Value> = lock(&state)
        .participants
        .iter()
        .filter(|p| event_id.is_none() || p.get("event_id").and_then(Value::as_i64) == event_id)
        .cloned()
        .collect();
    ok(Value::Array(rows))
}

async fn create_participant(
    State(state): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !bearer(&state, &headers) {
        return fail(StatusCode::UNAUTHORIZED, json!("Unauthorized"));
    }
    let (delay, error) = {
        let mut guard = lock(&state);
        guard.participant_posts += 1;
        (guard.register_delay, guard.register_error.clone())
    };
    tokio::time::sleep(delay).await;
    if let Some(message) = error {
        return fail(StatusCode::BAD_REQUEST, message);
    }

    let mut guard = lock(&state);
    guard.next_id += 1;
    let mut row = body;
    if let Some(obj) = row.as_object_mut() {
        obj.insert("id".to_string(), json!(guard.next_id));
    }
    guard.participants.push(row.clone());
    (StatusCode::CREATED, Json(json!({ "success": true, "data": row })))
}
