use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Task, TaskStatus};

/// Persisted notification record. `read_at` is null while unread; the only
/// permitted transition is unread -> read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Type tag, e.g. "task_created"
    pub kind: String,
    /// Structured payload snapshot taken at dispatch time
    pub data: serde_json::Value,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }
}

/// Payload stored with a "task_created" notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreatedData {
    pub task_id: Uuid,
    pub task_title: String,
    pub task_description: Option<String>,
    pub task_status: TaskStatus,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TaskCreatedData {
    pub const KIND: &'static str = "task_created";

    pub fn new(task: &Task) -> Self {
        Self {
            task_id: task.id,
            task_title: task.title.clone(),
            task_description: task.description.clone(),
            task_status: task.status,
            message: format!("New task \"{}\" has been created successfully!", task.title),
            kind: Self::KIND.to_string(),
        }
    }
}
