use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

type Shared = Arc<Mutex<ServerState>>;

/// How `DELETE /users/{id}` answers a successful delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteReply {
    /// `200` with `{}`, like json-server
    #[default]
    EmptyObject,
    /// `204` with no body
    NoContent,
    /// `200` with a plain-text body
    Text,
}

#[derive(Debug, Default)]
struct ServerState {
    users: Vec<Value>,
    next_id: u64,
    requests: Vec<(String, Option<String>)>,
    malformed: bool,
    delete_reply: DeleteReply,
}

impl ServerState {
    fn record(&mut self, request: String, headers: &HeaderMap) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.push((request, content_type));
    }
}

/// json-server style `/users` collection on an ephemeral localhost port
///
/// The server is aborted when the value is dropped.
pub struct TestUsersServer {
    addr: SocketAddr,
    state: Shared,
    handle: JoinHandle<()>,
}

impl TestUsersServer {
    /// Start with an empty collection
    pub async fn new() -> Self {
        Self::start(ServerState::default()).await
    }

    /// Start with `users` already stored; new ids continue after the highest numeric id
    pub async fn with_users(users: Vec<Value>) -> Self {
        let next_id = users
            .iter()
            .filter_map(id_of)
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self::start(ServerState {
            users,
            next_id,
            ..Default::default()
        })
        .await
    }

    /// Start a server whose `GET /users` answers with records of the wrong shape
    pub async fn malformed() -> Self {
        Self::start(ServerState {
            malformed: true,
            ..Default::default()
        })
        .await
    }

    /// Start with `users` stored and deletes answered as `reply`
    pub async fn with_delete_reply(users: Vec<Value>, reply: DeleteReply) -> Self {
        let server = Self::with_users(users).await;
        server.state.lock().await.delete_reply = reply;
        server
    }

    async fn start(state: ServerState) -> Self {
        let state = Arc::new(Mutex::new(state));

        let router = Router::new()
            .route("/users", get(list_users).post(create_user))
            .route("/users/{id}", put(update_user).delete(delete_user))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test users server");
        let addr = listener
            .local_addr()
            .expect("Failed to read test users server address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Test users server stopped: {}", e);
            }
        });

        tracing::info!(%addr, "Test users server started");
        Self {
            addr,
            state,
            handle,
        }
    }

    /// Collection URL, e.g. `http://127.0.0.1:49152/users`
    pub fn base_url(&self) -> String {
        format!("http://{}/users", self.addr)
    }

    /// Server-side collection, in insertion order
    pub async fn users(&self) -> Vec<Value> {
        self.state.lock().await.users.clone()
    }

    /// Requests seen so far, as "METHOD /path"
    pub async fn requests(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    /// `Content-Type` header of each request, in order
    pub async fn content_types(&self) -> Vec<Option<String>> {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .map(|(_, content_type)| content_type.clone())
            .collect()
    }
}

impl Drop for TestUsersServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The `id` of a stored record as text (ids may be strings or numbers)
pub fn id_of(user: &Value) -> Option<String> {
    match user.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
}

fn with_id(mut body: Value, id: &str) -> Value {
    if let Value::Object(fields) = &mut body {
        fields.insert("id".to_string(), Value::String(id.to_string()));
    }
    body
}

async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().await;
    state.record("GET /users".to_string(), &headers);

    if state.malformed {
        return Json(json!([{ "id": "1", "firstName": 42 }])).into_response();
    }
    Json(Value::Array(state.users.clone())).into_response()
}

async fn create_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().await;
    state.record("POST /users".to_string(), &headers);

    state.next_id += 1;
    let user = with_id(body, &state.next_id.to_string());
    state.users.push(user.clone());

    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().await;
    state.record(format!("PUT /users/{}", id), &headers);

    let Some(slot) = state
        .users
        .iter_mut()
        .find(|u| id_of(u).as_deref() == Some(id.as_str()))
    else {
        return not_found();
    };

    *slot = with_id(body, &id);
    Json(slot.clone()).into_response()
}

async fn delete_user(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().await;
    state.record(format!("DELETE /users/{}", id), &headers);

    let before = state.users.len();
    state
        .users
        .retain(|u| id_of(u).as_deref() != Some(id.as_str()));

    if state.users.len() == before {
        return not_found();
    }

    match state.delete_reply {
        DeleteReply::EmptyObject => Json(json!({})).into_response(),
        DeleteReply::NoContent => StatusCode::NO_CONTENT.into_response(),
        DeleteReply::Text => "deleted".into_response(),
    }
}
