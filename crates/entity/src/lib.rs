//! # Taskish Entities
//!
//! Sea-ORM entity definitions for the Taskish data model:
//! teams, users, private todos, team tasks, and sub-tasks.

pub mod private_todos;
pub mod sub_tasks;
pub mod team_tasks;
pub mod teams;
pub mod users;

pub use private_todos::TodoStatus;
pub use team_tasks::TaskStatus;
pub use users::UserRole;
