//! In-memory repositories. The storage engine proper sits behind the
//! repository traits; this implementation backs the test suite and local
//! experimentation without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Notification, Task, User};
use super::repository::{
    NewNotification, NewTask, NewUser, NotificationRepository, RepoError, TaskChanges,
    TaskRepository, UserRepository,
};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        let email_lower = new_user.email.to_lowercase();
        if users.iter().any(|u| u.email.to_lowercase() == email_lower) {
            return Err(RepoError::Duplicate(
                "User with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            full_name: new_user.full_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            phone_number: new_user.phone_number,
            address: new_user.address,
            image: new_user.image,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let email_lower = email.to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.to_lowercase() == email_lower)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryTaskRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, RepoError> {
        let tasks = self.tasks.read().await;
        // Insertion order is creation order
        Ok(tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id_and_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Task>, RepoError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, new_task: NewTask) -> Result<Task, RepoError> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            user_id: new_task.user_id,
            title: new_task.title,
            description: new_task.description,
            status: new_task.status,
            created_at: now,
            updated_at: now,
        };

        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Task>, RepoError> {
        let mut tasks = self.tasks.write().await;

        let task = match tasks.iter_mut().find(|t| t.id == id && t.user_id == user_id) {
            Some(t) => t,
            None => return Ok(None),
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(tasks.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryNotificationRepository {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl MemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn insert(&self, new: NewNotification) -> Result<Notification, RepoError> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            kind: new.kind,
            data: new.data,
            read_at: None,
            created_at: Utc::now(),
        };

        let mut notifications = self.notifications.write().await;
        notifications.push(notification.clone());
        Ok(notification)
    }

    async fn page_by_user(
        &self,
        user_id: Uuid,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<Notification>, u64), RepoError> {
        let notifications = self.notifications.read().await;

        // Newest first: reverse of insertion order
        let owned: Vec<&Notification> = notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .collect();

        let total = owned.len() as u64;
        let offset = (page.max(1) - 1) as usize * per_page as usize;
        let items = owned
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn mark_read(
        &self,
        id: Uuid,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> Result<Option<Notification>, RepoError> {
        let mut notifications = self.notifications.write().await;

        let notification = match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(n) => n,
            None => return Ok(None),
        };

        // Unread -> read is the only transition; repeat marks keep the
        // original timestamp
        if notification.read_at.is_none() {
            notification.read_at = Some(read_at);
        }

        Ok(Some(notification.clone()))
    }

    async fn mark_all_read(
        &self,
        user_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> Result<u64, RepoError> {
        let mut notifications = self.notifications.write().await;

        let mut updated = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && n.read_at.is_none())
        {
            n.read_at = Some(read_at);
            updated += 1;
        }

        Ok(updated)
    }

    async fn unread_count(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .filter(|n| n.user_id == user_id && n.read_at.is_none())
            .count() as u64)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, RepoError> {
        let mut notifications = self.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|n| !(n.id == id && n.user_id == user_id));
        Ok(notifications.len() < before)
    }
}
