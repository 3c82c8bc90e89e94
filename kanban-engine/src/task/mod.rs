//! Task commands
//!
//! All task commands act on the active board.

mod add;
mod clear;
mod delete;
mod get;
mod mv;
mod update;

pub use add::AddTask;
pub use clear::ClearCompleted;
pub use delete::DeleteTask;
pub use get::GetTask;
pub use mv::MoveTask;
pub use update::UpdateTask;
