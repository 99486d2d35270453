use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::config;
use crate::database::models::{Notification, Task, TaskCreatedData, User};
use crate::database::repository::{NewNotification, NotificationRepository, RepoError};
use crate::realtime::{Broker, TaskCreatedEvent};

/// Laravel-style pagination metadata returned alongside a page
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl PaginationMeta {
    fn new(current_page: u32, per_page: u32, total: u64) -> Self {
        let last_page = ((total + per_page as u64 - 1) / per_page as u64).max(1) as u32;
        Self {
            current_page,
            last_page,
            per_page,
            total,
        }
    }
}

/// The notification dispatcher: persists notification records and fans the
/// same payload out to the owner's live sessions.
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    broker: Arc<Broker>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationRepository>, broker: Arc<Broker>) -> Self {
        Self {
            notifications,
            broker,
        }
    }

    /// Dispatch pipeline for a freshly-created task.
    ///
    /// The record is persisted first; the stored row is the durable source
    /// of truth and the only delivery offline sessions get. The broadcast
    /// runs after the write and is best-effort: a failed or unheard publish
    /// is logged and never retried, and no failure in here reaches the
    /// caller.
    pub async fn task_created(&self, task: &Task, owner: &User) {
        let data = TaskCreatedData::new(task);
        let record = NewNotification {
            user_id: owner.id,
            kind: TaskCreatedData::KIND.to_string(),
            data: serde_json::to_value(&data).unwrap_or_default(),
        };

        if let Err(e) = self.notifications.insert(record).await {
            // Without the durable record there is nothing to broadcast;
            // the task creation itself still succeeds
            tracing::error!(task_id = %task.id, user_id = %owner.id, error = %e,
                "failed to persist task_created notification; skipping broadcast");
            return;
        }

        let event = TaskCreatedEvent::new(task, owner);
        let reached = self
            .broker
            .publish(owner.id, event.into_channel_event())
            .await;
        if reached == 0 {
            tracing::debug!(task_id = %task.id, user_id = %owner.id,
                "no live subscribers for task.created; record remains queryable");
        }
    }

    /// One page of the user's notifications, newest first
    pub async fn list(
        &self,
        user: &User,
        page: u32,
    ) -> Result<(Vec<Notification>, PaginationMeta), RepoError> {
        let per_page = config::config().notifications.page_size;
        let page = page.max(1);

        let (items, total) = self.notifications.page_by_user(user.id, page, per_page).await?;
        Ok((items, PaginationMeta::new(page, per_page, total)))
    }

    /// Mark one notification read. Idempotent: an already-read notification
    /// is a success with its original read timestamp. Returns false when the
    /// id is absent or owned by someone else.
    pub async fn mark_read(&self, user: &User, id: Uuid) -> Result<bool, RepoError> {
        let marked = self
            .notifications
            .mark_read(id, user.id, Utc::now())
            .await?;
        Ok(marked.is_some())
    }

    /// Mark everything currently unread as read. Notifications created while
    /// the update runs may or may not be included; callers reconcile via
    /// `unread_count`.
    pub async fn mark_all_read(&self, user: &User) -> Result<u64, RepoError> {
        self.notifications.mark_all_read(user.id, Utc::now()).await
    }

    pub async fn unread_count(&self, user: &User) -> Result<u64, RepoError> {
        self.notifications.unread_count(user.id).await
    }

    pub async fn delete(&self, user: &User, id: Uuid) -> Result<bool, RepoError> {
        self.notifications.delete(id, user.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_rounds_up_and_never_drops_below_one() {
        assert_eq!(PaginationMeta::new(1, 10, 0).last_page, 1);
        assert_eq!(PaginationMeta::new(1, 10, 10).last_page, 1);
        assert_eq!(PaginationMeta::new(1, 10, 11).last_page, 2);
        assert_eq!(PaginationMeta::new(1, 10, 25).last_page, 3);
    }
}
