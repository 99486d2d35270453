use axum::{
    extract::{Path, Query, State},
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

fn parse_notification_id(id: &str) -> Result<Uuid, ApiError> {
    id.parse::<Uuid>()
        .map_err(|_| ApiError::not_found("Notification not found"))
}

/// GET /notifications?page=N - The user's notifications, newest first
pub async fn index(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Value> {
    let (notifications, pagination) = state
        .notifications
        .list(&user, query.page.unwrap_or(1))
        .await?;

    Ok(ApiResponse::success(json!({
        "notifications": notifications,
        "pagination": pagination,
    })))
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Value> {
    let count = state.notifications.unread_count(&user).await?;
    Ok(ApiResponse::success(json!({ "unread_count": count })))
}

/// PATCH /notifications/:id/read - Idempotent unread -> read transition
pub async fn mark_as_read(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_notification_id(&id)?;
    let found = state.notifications.mark_read(&user, id).await?;

    if !found {
        return Err(ApiError::not_found("Notification not found"));
    }

    Ok(ApiResponse::<()>::message_only("Notification marked as read"))
}

/// PATCH /notifications/mark-all-read
pub async fn mark_all_as_read(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<()> {
    state.notifications.mark_all_read(&user).await?;
    Ok(ApiResponse::<()>::message_only(
        "All notifications marked as read",
    ))
}

/// DELETE /notifications/:id
pub async fn destroy(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_notification_id(&id)?;
    let deleted = state.notifications.delete(&user, id).await?;

    if !deleted {
        return Err(ApiError::not_found("Notification not found"));
    }

    Ok(ApiResponse::<()>::message_only("Notification deleted"))
}
