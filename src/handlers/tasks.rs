use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use super::validate::{require_string, validate_max_length};
use crate::database::models::TaskStatus;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::{TaskInput, TaskUpdate};
use crate::state::AppState;

/// Task ids are part of the resource path; a non-uuid id can't name any
/// task, so it gets the same 404 as an unknown one
fn parse_task_id(id: &str) -> Result<Uuid, ApiError> {
    id.parse::<Uuid>()
        .map_err(|_| ApiError::not_found("Task not found"))
}

fn parse_status(raw: &Option<String>) -> Result<Option<TaskStatus>, (String, String)> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .parse::<TaskStatus>()
            .map(Some)
            .map_err(|msg| ("status".to_string(), msg)),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl CreateTaskRequest {
    fn validate(self) -> Result<TaskInput, HashMap<String, String>> {
        let mut errors = HashMap::new();

        let title = match require_string(&self.title, "title") {
            Ok(v) => {
                if let Err(msg) = validate_max_length(&v, 255, "title") {
                    errors.insert("title".to_string(), msg);
                }
                v
            }
            Err(msg) => {
                errors.insert("title".to_string(), msg);
                String::new()
            }
        };

        let status = match parse_status(&self.status) {
            Ok(s) => s,
            Err((field, msg)) => {
                errors.insert(field, msg);
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TaskInput {
            title,
            description: self.description,
            status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    fn validate(self) -> Result<TaskUpdate, HashMap<String, String>> {
        let mut errors = HashMap::new();

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                errors.insert(
                    "title".to_string(),
                    "The title field is required".to_string(),
                );
            } else if let Err(msg) = validate_max_length(title, 255, "title") {
                errors.insert("title".to_string(), msg);
            }
        }

        let status = match parse_status(&self.status) {
            Ok(s) => s,
            Err((field, msg)) => {
                errors.insert(field, msg);
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TaskUpdate {
            title: self.title,
            description: self.description,
            status,
        })
    }
}

/// GET /tasks - All tasks owned by the authenticated user
pub async fn index(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Value> {
    let tasks = state.tasks.list(&user).await?;
    Ok(ApiResponse::success(json!({ "tasks": tasks })))
}

/// GET /tasks/:id - One task; foreign tasks are indistinguishable from
/// missing ones
pub async fn show(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_task_id(&id)?;
    let task = state
        .tasks
        .get(&user, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    Ok(ApiResponse::success(json!({ "task": task })))
}

/// POST /tasks - Create a task; kicks off the notification pipeline
pub async fn store(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<Value> {
    let input = payload
        .validate()
        .map_err(|errors| ApiError::unprocessable_entity("Validation errors", errors))?;

    let task = state.tasks.create(&user, input).await?;

    Ok(ApiResponse::created(
        json!({ "task": task }),
        "Task created successfully",
    ))
}

/// PUT /tasks/:id - Partial update of an owned task
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ApiResult<Value> {
    let id = parse_task_id(&id)?;
    let update = payload
        .validate()
        .map_err(|errors| ApiError::unprocessable_entity("Validation errors", errors))?;

    let task = state
        .tasks
        .update(&user, id, update)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    Ok(ApiResponse::with_message(
        json!({ "task": task }),
        "Task updated successfully",
    ))
}

/// DELETE /tasks/:id
pub async fn destroy(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_task_id(&id)?;
    let deleted = state.tasks.delete(&user, id).await?;

    if !deleted {
        return Err(ApiError::not_found("Task not found"));
    }

    Ok(ApiResponse::<()>::message_only("Task deleted successfully"))
}
