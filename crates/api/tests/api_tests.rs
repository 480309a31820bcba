use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use taskboard_api::{create_app, AppState};
use taskboard_core::{ApiConfig, DatabaseConfig};
use taskboard_infrastructure::{DatabaseManager, PasswordHasher};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    database: Arc<DatabaseManager>,
}

impl TestApp {
    async fn spawn() -> Self {
        let database = Arc::new(
            DatabaseManager::new(&DatabaseConfig::in_memory(), PasswordHasher::new(4))
                .await
                .expect("in-memory database"),
        );
        database.migrate().await.expect("migrations");
        let router = create_app(AppState::from_database(database.clone()), &ApiConfig::default());
        Self { router, database }
    }

    async fn raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.raw(request).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    async fn create_executor(&self, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/executors",
                json!({ "name": name, "specialization": "backend", "rating": 4.5 }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["executor"]["id"].as_i64().unwrap()
    }

    async fn executor_status(&self, id: i64) -> String {
        let (status, body) = self.get(&format!("/api/executors/{id}")).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["status"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "taskboard");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_database_health_routes() {
    let app = TestApp::spawn().await;

    for uri in ["/health-db", "/api/test-db"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["status"], "OK");
        assert_eq!(body["success"], true);
        assert_eq!(body["database"], "sqlite");
        assert!(body["time"].is_string());
    }
}

#[tokio::test]
async fn test_database_health_reports_failure() {
    let app = TestApp::spawn().await;
    app.database.close().await;

    let (status, body) = app.get("/health-db").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_store_unavailable_is_server_error() {
    let app = TestApp::spawn().await;
    app.database.close().await;

    let (status, body) = app.get("/api/tasks").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database is unavailable");
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::spawn().await;
    let (status, _) = app
        .post(
            "/api/users",
            json!({ "username": "admin", "password": "s3cret", "name": "Admin", "role": "admin" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post("/api/login", json!({ "username": "admin", "password": "s3cret" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let (wrong_password_status, wrong_password) = app
        .post("/api/login", json!({ "username": "admin", "password": "nope" }))
        .await;
    let (unknown_user_status, unknown_user) = app
        .post("/api/login", json!({ "username": "ghost", "password": "s3cret" }))
        .await;
    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = TestApp::spawn().await;

    let (status, body) = app.post("/api/login", json!({ "username": "admin" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app
        .post("/api/login", json!({ "username": "  ", "password": "x" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("username"));
}

#[tokio::test]
async fn test_user_routes() {
    let app = TestApp::spawn().await;
    let new_user = json!({ "username": "bob", "password": "pw", "name": "Bob", "role": "user" });

    let (status, body) = app.post("/api/users", new_user.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["user"]["id"].as_i64().unwrap();
    assert!(body["user"].get("password").is_none());

    let (status, body) = app.post("/api/users", new_user).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Resource already exists");

    let (status, body) = app.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app.put(&format!("/api/users/{id}/role"), json!({ "role": "admin" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = app.get(&format!("/api/users/{id}")).await;
    assert_eq!(body["role"], "admin");

    let (status, _) = app.put("/api/users/999/role", json!({ "role": "admin" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/users/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let (status, body) = app.delete(&format!("/api/users/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }
}

#[tokio::test]
async fn test_executor_rating_formats() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post("/api/executors", json!({ "name": "Carol", "specialization": "qa", "rating": "3.5" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["executor"]["rating"], 3.5);
    assert_eq!(body["executor"]["status"], "free");

    let (status, body) = app
        .post("/api/executors", json!({ "name": "Dan", "rating": "excellent" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("rating"));

    let (status, _) = app.post("/api/executors", json!({ "name": "Erin" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_executor_status_routes() {
    let app = TestApp::spawn().await;
    let id = app.create_executor("Alice").await;

    let (status, _) = app
        .put(&format!("/api/executors/{id}/status"), json!({ "status": "busy" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.executor_status(id).await, "busy");

    let (status, _) = app
        .put(&format!("/api/executors/{id}/status"), json!({ "status": "sleeping" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.executor_status(id).await, "busy");

    let (status, _) = app
        .put("/api/executors/999/status", json!({ "status": "free" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let (status, _) = app.delete(&format!("/api/executors/{id}")).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_alice_end_to_end() {
    let app = TestApp::spawn().await;
    let alice = app.create_executor("Alice").await;
    assert_eq!(app.executor_status(alice).await, "free");

    let (status, body) = app
        .post(
            "/api/tasks",
            json!({
                "title": "Fix bug",
                "description": "Login page crashes",
                "deadline": "2024-12-31",
                "executor_id": alice,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["task"]["status"], "pending");
    assert_eq!(body["task"]["executor_name"], "Alice");
    assert_eq!(body["task"]["deadline"], "2024-12-31");
    let task = body["task"]["id"].as_i64().unwrap();
    assert_eq!(app.executor_status(alice).await, "busy");

    let (status, _) = app
        .put(&format!("/api/tasks/{task}/status"), json!({ "status": "done" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.executor_status(alice).await, "free");

    let (status, _) = app.delete(&format!("/api/tasks/{task}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.executor_status(alice).await, "free");

    let (_, body) = app.get("/api/tasks").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_deleting_in_progress_task_frees_executor() {
    let app = TestApp::spawn().await;
    let alice = app.create_executor("Alice").await;

    let (_, body) = app
        .post(
            "/api/tasks",
            json!({ "title": "Deploy", "executor_id": alice, "status": "in-progress" }),
        )
        .await;
    let task = body["task"]["id"].as_i64().unwrap();
    assert_eq!(app.executor_status(alice).await, "busy");

    let (status, _) = app.delete(&format!("/api/tasks/{task}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.executor_status(alice).await, "free");

    let (status, _) = app.delete(&format!("/api/tasks/{task}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_task_validation_and_missing_ids() {
    let app = TestApp::spawn().await;

    let (status, _) = app.post("/api/tasks", json!({ "title": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/tasks", json!({ "title": "Ship", "status": "finished" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/tasks", json!({ "title": "Ship", "executor_id": 404 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .put("/api/tasks/12345/status", json!({ "status": "done" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");

    let (status, _) = app.get("/api/tasks/12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_deadline_accepts_timestamp() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post(
            "/api/tasks",
            json!({ "title": "Report", "deadline": "2025-03-01T09:00:00+03:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["task"]["deadline"], "2025-03-01");
    assert_eq!(body["task"]["executor_id"], Value::Null);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/executors")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"Alice\","))
        .unwrap();

    let (status, body) = app.raw(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_non_numeric_id_is_json_bad_request() {
    let app = TestApp::spawn().await;

    let (status, body) = app.delete("/api/tasks/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert!(body["details"].as_str().unwrap().contains("abc"));

    let (status, body) = app.get("/api/users/1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");

    let (status, body) = app
        .put("/api/executors/x/status", json!({ "status": "busy" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/api/projects").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found", "path": "/api/projects" }));
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = TestApp::spawn().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/tasks")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_cors_rejects_unlisted_origin() {
    let app = TestApp::spawn().await;
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
