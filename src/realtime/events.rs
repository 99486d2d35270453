//! Wire payloads for realtime events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::broker::ChannelEvent;
use crate::database::models::{Task, TaskStatus, User};

/// Broadcast payload for `task.created`, delivered on the owner's private
/// channel. The task and user snapshots are taken at dispatch time.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCreatedEvent {
    pub task: TaskSnapshot,
    pub user: UserSnapshot,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskSnapshot {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserSnapshot {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl TaskCreatedEvent {
    pub const NAME: &'static str = "task.created";

    pub fn new(task: &Task, owner: &User) -> Self {
        Self {
            task: TaskSnapshot {
                id: task.id,
                title: task.title.clone(),
                description: task.description.clone(),
                status: task.status,
                created_at: task.created_at,
            },
            user: UserSnapshot {
                id: owner.id,
                full_name: owner.full_name.clone(),
                email: owner.email.clone(),
            },
            message: format!("New task \"{}\" has been created successfully!", task.title),
            timestamp: Utc::now(),
        }
    }

    pub fn into_channel_event(self) -> ChannelEvent {
        ChannelEvent {
            event: Self::NAME.to_string(),
            // Serialization of this shape cannot fail
            payload: serde_json::to_value(&self).unwrap_or_default(),
        }
    }
}
