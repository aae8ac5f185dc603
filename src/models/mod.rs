//! Document models for the collections this tool provisions.

pub mod task;
pub mod user;

pub use task::{Task, TaskPriority, TaskStatus, TASKS_COLLECTION};
pub use user::{User, USERS_COLLECTION};
