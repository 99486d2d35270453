mod common;

use axum::http::StatusCode;
use common::{create_task, register, send, test_app};
use serde_json::json;

#[tokio::test]
async fn create_task_defaults_to_pending() {
    let (app, _) = test_app();
    let (user, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    let task = create_task(&app, &token, "Test Task", json!({ "description": "Test Description" })).await;

    assert_eq!(task["title"], "Test Task");
    assert_eq!(task["description"], "Test Description");
    assert_eq!(task["status"], "pending");
    assert_eq!(task["user_id"], user["id"]);
    assert!(task["id"].is_string());
    assert!(task["created_at"].is_string());
}

#[tokio::test]
async fn create_task_accepts_explicit_status() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    let task = create_task(&app, &token, "Started", json!({ "status": "in_progress" })).await;
    assert_eq!(task["status"], "in_progress");
}

#[tokio::test]
async fn create_task_requires_title() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    let (status, body) = send(
        &app,
        "POST",
        "/tasks",
        Some(&token),
        Some(json!({ "description": "no title" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["title"].is_string());

    // Whitespace-only is still empty
    let (status, _) = send(
        &app,
        "POST",
        "/tasks",
        Some(&token),
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_task_rejects_unknown_status() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    let (status, body) = send(
        &app,
        "POST",
        "/tasks",
        Some(&token),
        Some(json!({ "title": "X", "status": "archived" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["status"].is_string());
}

#[tokio::test]
async fn list_returns_own_tasks_in_creation_order() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    create_task(&app, &token, "Test Task 1", json!({})).await;
    create_task(&app, &token, "Test Task 2", json!({})).await;

    let (status, body) = send(&app, "GET", "/tasks", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let tasks = body["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Test Task 1");
    assert_eq!(tasks[1]["title"], "Test Task 2");
}

#[tokio::test]
async fn show_returns_own_task() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;
    let task = create_task(&app, &token, "Test Task", json!({})).await;

    let path = format!("/tasks/{}", task["id"].as_str().unwrap());
    let (status, body) = send(&app, "GET", &path, Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["task"]["title"], "Test Task");
}

#[tokio::test]
async fn show_unknown_and_malformed_ids_are_404() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    let (status, _) = send(
        &app,
        "GET",
        "/tasks/00000000-0000-0000-0000-000000000000",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/tasks/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_applies_partial_changes() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;
    let task = create_task(&app, &token, "Original Title", json!({})).await;

    let path = format!("/tasks/{}", task["id"].as_str().unwrap());
    let (status, body) = send(
        &app,
        "PUT",
        &path,
        Some(&token),
        Some(json!({ "status": "done" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated successfully");
    // Only the status changed
    assert_eq!(body["data"]["task"]["title"], "Original Title");
    assert_eq!(body["data"]["task"]["status"], "done");
}

#[tokio::test]
async fn update_rejects_invalid_status_and_blank_title() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;
    let task = create_task(&app, &token, "Task", json!({})).await;
    let path = format!("/tasks/{}", task["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        "PUT",
        &path,
        Some(&token),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "PUT", &path, Some(&token), Some(json!({ "title": " " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_removes_the_task() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;
    let task = create_task(&app, &token, "Task", json!({})).await;
    let path = format!("/tasks/{}", task["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted successfully");

    let (status, _) = send(&app, "GET", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again reports not found, not an error
    let (status, _) = send(&app, "DELETE", &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn foreign_tasks_behave_exactly_like_missing_ones() {
    let (app, _) = test_app();
    let (_, owner_token) = register(&app, "Owner", "owner@example.com", "password123").await;
    let (_, other_token) = register(&app, "Other", "other@example.com", "password123").await;

    let task = create_task(&app, &owner_token, "Private", json!({})).await;
    let path = format!("/tasks/{}", task["id"].as_str().unwrap());

    let (status, get_body) = send(&app, "GET", &path, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &path,
        Some(&other_token),
        Some(json!({ "title": "hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &path, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Same body as a genuinely-missing task: no existence leak
    let (_, missing_body) = send(
        &app,
        "GET",
        "/tasks/00000000-0000-0000-0000-000000000000",
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(get_body, missing_body);

    // And the owner's task is untouched
    let (status, body) = send(&app, "GET", &path, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["task"]["title"], "Private");
}

#[tokio::test]
async fn task_routes_require_authentication() {
    let (app, _) = test_app();

    for (method, path) in [
        ("GET", "/tasks"),
        ("POST", "/tasks"),
        ("GET", "/tasks/some-id"),
        ("PUT", "/tasks/some-id"),
        ("DELETE", "/tasks/some-id"),
    ] {
        let (status, body) = send(&app, method, path, None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, path);
        assert_eq!(body["success"], false);
    }
}

/// The end-to-end scenario: register, create, update, isolate.
#[tokio::test]
async fn full_task_lifecycle_scenario() {
    let (app, _) = test_app();

    let (_, u1_token) = register(&app, "User One", "a@x.com", "password123").await;

    let t1 = create_task(&app, &u1_token, "Buy milk", json!({})).await;
    assert_eq!(t1["status"], "pending");

    let (_, body) = send(&app, "GET", "/notifications/unread-count", Some(&u1_token), None).await;
    assert_eq!(body["data"]["unread_count"], 1);

    let path = format!("/tasks/{}", t1["id"].as_str().unwrap());
    let (status, _) = send(
        &app,
        "PUT",
        &path,
        Some(&u1_token),
        Some(json!({ "status": "done" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &path, Some(&u1_token), None).await;
    assert_eq!(body["data"]["task"]["status"], "done");

    let (_, u2_token) = register(&app, "User Two", "b@x.com", "password123").await;
    let (status, _) = send(&app, "GET", &path, Some(&u2_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
