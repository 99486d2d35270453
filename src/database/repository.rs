use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::models::{Notification, Task, TaskStatus, User};

/// Errors from the storage boundary
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Duplicate(String),

    #[error("Storage error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Fields accepted when creating a user. The credential arrives pre-hashed;
/// repositories never see plain-text passwords.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: String,
    pub data: serde_json::Value,
}

/// CRUD over user records. Email uniqueness is case-insensitive and
/// enforced here.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// CRUD over task records. Every accessor takes the owning user id; a task
/// belonging to another user is reported exactly like a missing one.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks owned by the user, in creation order
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, RepoError>;
    async fn find_by_id_and_user(&self, id: Uuid, user_id: Uuid)
        -> Result<Option<Task>, RepoError>;
    async fn insert(&self, new_task: NewTask) -> Result<Task, RepoError>;
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, RepoError>;
    /// Returns false (not an error) when the task is absent or foreign
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepoError>;
}

/// Persisted notifications, owner-scoped like tasks.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, new: NewNotification) -> Result<Notification, RepoError>;

    /// One page of the user's notifications, newest first, plus the total
    /// row count for pagination. Pages are 1-based.
    async fn page_by_user(
        &self,
        user_id: Uuid,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<Notification>, u64), RepoError>;

    /// Stamp `read_at` if still unread. Already-read records are returned
    /// unchanged (idempotent); absent or foreign ids yield None.
    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> Result<Option<Notification>, RepoError>;

    /// Stamp every notification unread at the time the update runs. Rows
    /// created concurrently may or may not be included.
    async fn mark_all_read(&self, user_id: Uuid, read_at: DateTime<Utc>)
        -> Result<u64, RepoError>;

    async fn unread_count(&self, user_id: Uuid) -> Result<u64, RepoError>;

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepoError>;
}
