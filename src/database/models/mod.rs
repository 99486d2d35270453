pub mod notification;
pub mod task;
pub mod user;

pub use notification::{Notification, TaskCreatedData};
pub use task::{Task, TaskStatus};
pub use user::User;
