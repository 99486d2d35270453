//! Postgres repositories over sqlx. Queries are bound at runtime so the
//! crate builds without a reachable database.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     full_name TEXT NOT NULL,
//!     email TEXT NOT NULL,
//!     password_hash TEXT NOT NULL,
//!     phone_number TEXT,
//!     address TEXT,
//!     image TEXT,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! CREATE UNIQUE INDEX users_email_lower_idx ON users (lower(email));
//!
//! CREATE TABLE tasks (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     title TEXT NOT NULL,
//!     description TEXT,
//!     status TEXT NOT NULL DEFAULT 'pending',
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//!
//! CREATE TABLE notifications (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     kind TEXT NOT NULL,
//!     data JSONB NOT NULL,
//!     read_at TIMESTAMPTZ,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::models::{Notification, Task, TaskStatus, User};
use super::repository::{
    NewNotification, NewTask, NewUser, NotificationRepository, RepoError, TaskChanges,
    TaskRepository, UserRepository,
};

/// Map a unique-index violation to the domain duplicate error
fn map_insert_error(err: sqlx::Error, duplicate_message: &str) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return RepoError::Duplicate(duplicate_message.to_string());
        }
    }
    err.into()
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, password_hash, phone_number, address, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, email, password_hash, phone_number, address, image,
                      created_at, updated_at
            "#,
        )
        .bind(&new_user.full_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.phone_number)
        .bind(&new_user.address)
        .bind(&new_user.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "User with this email already exists"))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, phone_number, address, image,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, phone_number, address, image,
                   created_at, updated_at
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// Task row with the status column as text, converted on the way out
#[derive(FromRow)]
struct TaskRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> Result<Task, RepoError> {
        let status = self
            .status
            .parse::<TaskStatus>()
            .map_err(RepoError::Database)?;
        Ok(Task {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TASK_COLUMNS: &str = "id, user_id, title, description, status, created_at, updated_at";

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, RepoError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
            TASK_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    async fn find_by_id_and_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Task>, RepoError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskRow::into_task).transpose()
    }

    async fn insert(&self, new_task: NewTask) -> Result<Task, RepoError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            INSERT INTO tasks (user_id, title, description, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(new_task.user_id)
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(new_task.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.into_task()
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, RepoError> {
        // COALESCE keeps absent fields unchanged; the row stays owner-scoped
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskRow::into_task).transpose()
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    data: serde_json::Value,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind,
            data: row.data,
            read_at: row.read_at,
            created_at: row.created_at,
        }
    }
}

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, data, read_at, created_at";

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn insert(&self, new: NewNotification) -> Result<Notification, RepoError> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            INSERT INTO notifications (user_id, kind, data)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(new.user_id)
        .bind(&new.kind)
        .bind(&new.data)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn page_by_user(
        &self,
        user_id: Uuid,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<Notification>, u64), RepoError> {
        let offset = (page.max(1) as i64 - 1) * per_page as i64;

        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            SELECT {}
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .bind(per_page as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((
            rows.into_iter().map(Notification::from).collect(),
            total as u64,
        ))
    }

    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> Result<Option<Notification>, RepoError> {
        // Already-read rows pass through untouched: read_at only moves off null
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            UPDATE notifications
            SET read_at = COALESCE(read_at, $3)
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(read_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Notification::from))
    }

    async fn mark_all_read(
        &self,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> Result<u64, RepoError> {
        let result =
            sqlx::query("UPDATE notifications SET read_at = $2 WHERE user_id = $1 AND read_at IS NULL")
                .bind(user_id)
                .bind(read_at)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count as u64)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
