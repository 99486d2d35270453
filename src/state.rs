use std::sync::Arc;

use crate::config;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::memory::{
    MemoryNotificationRepository, MemoryTaskRepository, MemoryUserRepository,
};
use crate::database::postgres::{PgNotificationRepository, PgTaskRepository, PgUserRepository};
use crate::database::repository::{NotificationRepository, TaskRepository, UserRepository};
use crate::realtime::Broker;
use crate::services::{NotificationService, TaskService, UserService};

/// Shared application state threaded through every handler. The guard and
/// the services hold the repositories; nothing reaches storage directly.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub tasks: Arc<TaskService>,
    pub notifications: Arc<NotificationService>,
    pub broker: Arc<Broker>,
}

impl AppState {
    pub fn build(
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        let broker = Arc::new(Broker::new(config::config().notifications.channel_capacity));
        let notification_service = Arc::new(NotificationService::new(notifications, broker.clone()));
        let task_service = Arc::new(TaskService::new(tasks, notification_service.clone()));
        let user_service = Arc::new(UserService::new(users));

        Self {
            users: user_service,
            tasks: task_service,
            notifications: notification_service,
            broker,
        }
    }

    /// State over in-memory repositories; used by the test suite and for
    /// running without a database
    pub fn in_memory() -> Self {
        Self::build(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryTaskRepository::new()),
            Arc::new(MemoryNotificationRepository::new()),
        )
    }

    /// State over the Postgres repositories, sharing one pool
    pub async fn postgres() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self::build(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTaskRepository::new(pool.clone())),
            Arc::new(PgNotificationRepository::new(pool)),
        ))
    }
}
