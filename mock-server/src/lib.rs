//! In-process HTTP server used by the client integration tests.
//!
//! Serves a todo CRUD API in the jsonplaceholder shape (integer ids,
//! `userId` field) plus a few special-purpose endpoints: `/empty` answers
//! with zero body bytes, `/raw` with non-JSON bytes, `/upload` accepts an
//! arbitrary payload, `/delay/{ms}` stalls before answering, and
//! `/headers` echoes the request headers back.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    #[serde(default = "default_user_id")]
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct UploadReceipt {
    pub received: usize,
}

fn default_user_id() -> u64 {
    1
}

/// Todos plus the id counter, behind one lock. Ids are sequential from 1.
#[derive(Default)]
pub struct Store {
    todos: HashMap<u64, Todo>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db = Db::default();
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/empty", get(empty))
        .route("/raw", get(raw))
        .route("/upload", post(upload))
        .route("/delay/{ms}", get(delay))
        .route("/headers", get(echo_headers))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    let mut todos: Vec<Todo> = store.todos.values().cloned().collect();
    todos.sort_by_key(|todo| todo.id);
    Json(todos)
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let todo = Todo {
        user_id: input.user_id,
        id: store.next_id,
        title: input.title,
        completed: input.completed,
    };
    store.todos.insert(todo.id, todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

/// 200 with zero body bytes.
async fn empty() -> StatusCode {
    StatusCode::OK
}

/// Bytes that are valid UTF-8 but not JSON.
async fn raw() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        Bytes::from_static(b"raw bytes, not json"),
    )
}

async fn upload(body: Bytes) -> (StatusCode, Json<UploadReceipt>) {
    (
        StatusCode::CREATED,
        Json(UploadReceipt {
            received: body.len(),
        }),
    )
}

async fn delay(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(serde_json::json!({ "sleptMs": ms }))
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let mut map = serde_json::Map::new();
    for (name, value) in &headers {
        map.insert(
            name.as_str().to_string(),
            Value::from(String::from_utf8_lossy(value.as_bytes()).into_owned()),
        );
    }
    Json(Value::Object(map))
}
