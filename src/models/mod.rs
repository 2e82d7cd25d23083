pub mod project;
pub mod task;
pub mod user;

pub use project::{Project, ProjectDetail, ProjectInput, ProjectQuery};
pub use task::{Task, TaskInput, TaskPriority, TaskQuery, TaskStatus};
pub use user::{User, UserQuery, UserResponse};
