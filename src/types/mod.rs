mod developer;
mod role;
mod status;
mod task;
mod task_type;
mod user;

pub use developer::{DeveloperOption, DeveloperTaskCount};
pub use role::Role;
pub use status::TaskStatus;
pub use task::{StatusUpdate, Task, TaskForm, parse_date};
pub use task_type::TaskType;
pub use user::User;
