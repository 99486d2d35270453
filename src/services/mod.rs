pub mod notification_service;
pub mod task_service;
pub mod user_service;

pub use notification_service::{NotificationService, PaginationMeta};
pub use task_service::{TaskInput, TaskService, TaskUpdate};
pub use user_service::{AuthPayload, RegisterInput, UserService, UserServiceError};
