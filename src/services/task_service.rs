use std::sync::Arc;
use uuid::Uuid;

use super::notification_service::NotificationService;
use crate::database::models::{Task, TaskStatus, User};
use crate::database::repository::{NewTask, RepoError, TaskChanges, TaskRepository};

/// Fields for a new task, shape-validated at the boundary
#[derive(Debug, Clone)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Partial update; absent fields are left as they are
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Owner-scoped task operations. Every call takes the already-resolved
/// requesting user; tasks belonging to anyone else behave as if absent.
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    notifications: Arc<NotificationService>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, notifications: Arc<NotificationService>) -> Self {
        Self {
            tasks,
            notifications,
        }
    }

    /// Tasks owned by the user, in creation order
    pub async fn list(&self, user: &User) -> Result<Vec<Task>, RepoError> {
        self.tasks.list_by_user(user.id).await
    }

    pub async fn get(&self, user: &User, id: Uuid) -> Result<Option<Task>, RepoError> {
        self.tasks.find_by_id_and_user(id, user.id).await
    }

    /// Create a task owned by the user, then run the notification pipeline.
    /// The dispatch is synchronous but cannot fail the creation: by the time
    /// it runs the task row is already committed.
    pub async fn create(&self, user: &User, input: TaskInput) -> Result<Task, RepoError> {
        let task = self
            .tasks
            .insert(NewTask {
                user_id: user.id,
                title: input.title,
                description: input.description,
                status: input.status.unwrap_or_default(),
            })
            .await?;

        self.notifications.task_created(&task, user).await;

        Ok(task)
    }

    pub async fn update(
        &self,
        user: &User,
        id: Uuid,
        update: TaskUpdate,
    ) -> Result<Option<Task>, RepoError> {
        self.tasks
            .update(
                id,
                user.id,
                TaskChanges {
                    title: update.title,
                    description: update.description,
                    status: update.status,
                },
            )
            .await
    }

    /// Returns false when the task is absent or foreign, true on removal
    pub async fn delete(&self, user: &User, id: Uuid) -> Result<bool, RepoError> {
        self.tasks.delete(id, user.id).await
    }
}
