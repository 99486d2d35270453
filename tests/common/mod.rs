//! Shared harness for the API integration tests: an app over in-memory
//! repositories plus small request helpers.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskhub_api::server;
use taskhub_api::state::AppState;

pub fn test_app() -> (Router, AppState) {
    let state = AppState::in_memory();
    (server::app(state.clone()), state)
}

/// Issue one request against the router and decode the JSON response
pub async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json_body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Register a user and return (user, token)
pub async fn register(app: &Router, full_name: &str, email: &str, password: &str) -> (Value, String) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "full_name": full_name,
            "email": email,
            "password": password,
            "password_confirmation": password,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);

    let user = body["data"]["user"].clone();
    let token = body["data"]["token"].as_str().unwrap().to_string();
    (user, token)
}

/// Create a task and return its JSON representation
pub async fn create_task(app: &Router, token: &str, title: &str, body_extra: Value) -> Value {
    let mut payload = json!({ "title": title });
    if let (Value::Object(target), Value::Object(extra)) = (&mut payload, body_extra) {
        target.extend(extra);
    }

    let (status, body) = send(app, "POST", "/tasks", Some(token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "task creation failed: {}", body);

    body["data"]["task"].clone()
}
