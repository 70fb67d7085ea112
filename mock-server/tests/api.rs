use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Todo, UploadReceipt};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(get_request("/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_sequential_id() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"title":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, 1);
    assert_eq!(todo.user_id, 1);
    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app().oneshot(get_request("/todos/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_todo_non_numeric_id_returns_400() {
    let resp = app()
        .oneshot(get_request("/todos/not-a-number"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- special endpoints ---

#[tokio::test]
async fn empty_endpoint_answers_200_with_no_body() {
    let resp = app().oneshot(get_request("/empty")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn raw_endpoint_returns_non_json_bytes() {
    let resp = app().oneshot(get_request("/raw")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(body_bytes(resp).await.as_ref(), b"raw bytes, not json");
}

#[tokio::test]
async fn upload_reports_received_byte_count() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .body("0123456789".to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let receipt: UploadReceipt = body_json(resp).await;
    assert_eq!(receipt.received, 10);
}

#[tokio::test]
async fn delay_zero_answers_immediately() {
    let resp = app().oneshot(get_request("/delay/0")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: serde_json::Value = body_json(resp).await;
    assert_eq!(echoed["sleptMs"], 0);
}

#[tokio::test]
async fn headers_endpoint_echoes_request_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/headers")
                .header("X-Api-Key", "secret")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: serde_json::Value = body_json(resp).await;
    assert_eq!(echoed["x-api-key"], "secret");
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/todos", r#"{"title":"Walk dog"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    assert_eq!(created.title, "Walk dog");
    assert!(!created.completed);
    let id = created.id;

    // list — should contain the one todo
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/todos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, id);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.title, "Walk dog");

    // update — partial: only completed
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/todos/{id}"),
            r#"{"completed":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Walk dog"); // unchanged
    assert!(updated.completed);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/todos/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
