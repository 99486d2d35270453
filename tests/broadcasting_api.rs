mod common;

use anyhow::Context;
use axum::http::StatusCode;
use common::{create_task, register, send, test_app};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

#[tokio::test]
async fn grants_subscription_to_own_channel() {
    let (app, _) = test_app();
    let (user, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    let channel = format!("user.{}", user["id"].as_str().unwrap());
    let (status, body) = send(
        &app,
        "POST",
        "/broadcasting/auth",
        Some(&token),
        Some(json!({ "channel_name": channel })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["granted"], true);
    assert_eq!(body["data"]["channel"], channel);
}

#[tokio::test]
async fn denies_other_users_channel_even_with_a_valid_token() {
    let (app, _) = test_app();
    let (other_user, _) = register(&app, "Other", "other@example.com", "password123").await;
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    let channel = format!("user.{}", other_user["id"].as_str().unwrap());
    let (status, body) = send(
        &app,
        "POST",
        "/broadcasting/auth",
        Some(&token),
        Some(json!({ "channel_name": channel })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn denials_never_reveal_whether_the_channel_exists() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    // A channel for a user id that exists nowhere, and assorted malformed
    // names, all produce the identical denial
    let nonexistent = format!("user.{}", Uuid::new_v4());
    let mut bodies = Vec::new();
    for channel in [nonexistent.as_str(), "user.not-a-uuid", "presence.user.1", ""] {
        let (status, body) = send(
            &app,
            "POST",
            "/broadcasting/auth",
            Some(&token),
            Some(json!({ "channel_name": channel })),
        )
        .await;
        if channel.is_empty() {
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        } else {
            assert_eq!(status, StatusCode::FORBIDDEN, "channel {}", channel);
            bodies.push(body);
        }
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn requires_a_channel_name() {
    let (app, _) = test_app();
    let (_, token) = register(&app, "Jane", "jane@example.com", "password123").await;

    let (status, body) = send(&app, "POST", "/broadcasting/auth", Some(&token), Some(json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["channel_name"].is_string());
}

#[tokio::test]
async fn requires_authentication() {
    let (app, _) = test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/broadcasting/auth",
        None,
        Some(json!({ "channel_name": "user.123" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn live_subscribers_receive_task_created_events() -> anyhow::Result<()> {
    let (app, state) = test_app();
    let (user, token) = register(&app, "Jane", "jane@example.com", "password123").await;
    let user_id: Uuid = user["id"].as_str().context("user id missing")?.parse()?;

    // A connected session: subscribed to the private channel before the task
    // is created
    let mut rx = state.broker.subscribe(user_id).await;

    let task = create_task(&app, &token, "Buy milk", json!({})).await;

    let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .context("no event within timeout")??;

    assert_eq!(event.event, "task.created");
    assert_eq!(event.payload["task"]["id"], task["id"]);
    assert_eq!(event.payload["task"]["title"], "Buy milk");
    assert_eq!(event.payload["task"]["status"], "pending");
    assert_eq!(event.payload["user"]["id"], user["id"]);
    assert_eq!(event.payload["user"]["email"], "jane@example.com");
    assert!(event.payload["message"].as_str().unwrap().contains("Buy milk"));
    assert!(event.payload["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn offline_sessions_fall_back_to_the_persisted_record() {
    let (app, state) = test_app();
    let (user, token) = register(&app, "Jane", "jane@example.com", "password123").await;
    let user_id: Uuid = user["id"].as_str().unwrap().parse().unwrap();

    // Nobody subscribed: the publish is lost by design
    create_task(&app, &token, "Buy milk", json!({})).await;

    // A session connecting afterwards sees nothing on the channel...
    let mut rx = state.broker.subscribe(user_id).await;
    assert!(rx.try_recv().is_err());

    // ...but reconciles through the durable notification record
    let (_, body) = send(&app, "GET", "/notifications/unread-count", Some(&token), None).await;
    assert_eq!(body["data"]["unread_count"], 1);
}
