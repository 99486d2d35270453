use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{auth, broadcasting, notifications, tasks};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Assemble the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (token acquisition)
        .merge(public_auth_routes(state.clone()))
        // Everything behind the authorization guard
        .merge(protected_routes(state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state)
}

fn protected_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth/me", get(auth::me))
        .merge(task_routes())
        .merge(notification_routes())
        .route("/broadcasting/auth", post(broadcasting::authorize))
        // The guard resolves the bearer token to a domain user once per
        // request; handlers only ever see the CurrentUser extension
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .with_state(state)
}

fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(tasks::index).post(tasks::store))
        .route(
            "/tasks/:id",
            get(tasks::show).put(tasks::update).delete(tasks::destroy),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::index))
        .route(
            "/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/notifications/mark-all-read",
            patch(notifications::mark_all_as_read),
        )
        .route("/notifications/:id/read", patch(notifications::mark_as_read))
        .route("/notifications/:id", delete(notifications::destroy))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "TaskHub API",
            "version": version,
            "description": "Multi-user task tracker with real-time notifications (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/register, /auth/login (public), /auth/me (protected)",
                "tasks": "/tasks[/:id] (protected)",
                "notifications": "/notifications, /notifications/unread-count, /notifications/:id/read, /notifications/mark-all-read (protected)",
                "broadcasting": "/broadcasting/auth (protected - private channel authorization)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
