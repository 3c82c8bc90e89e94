//! Kanban board state engine
//!
//! This crate keeps boards, columns, tasks and tags consistent across edits,
//! drag-and-drop moves, archival and schema migrations. Persistence goes
//! through a pluggable key-value [`StorageAdapter`]; outcomes are reported to a
//! [`Notifier`]. Rendering is someone else's job.
//!
//! ## Overview
//!
//! - **Operations are values** - every action is a struct whose fields are its
//!   parameters, executed against [`AppState`] or the [`TagRegistry`]
//! - **All or nothing** - an operation validates before it mutates; a failure
//!   leaves state untouched
//! - **Soft not-found** - moving, editing or deleting something that is no
//!   longer there is a silent no-op, since drag-and-drop races make it normal
//! - **Migration on load** - legacy and unversioned blobs are upgraded to the
//!   current schema, and already-current data round-trips byte for byte
//!
//! ## Basic Usage
//!
//! ```rust
//! use kanban_engine::{task::{AddTask, MoveTask}, KanbanContext, MemoryStorage, TracingNotifier};
//!
//! # fn example() -> kanban_engine::Result<()> {
//! let mut ctx = KanbanContext::open(MemoryStorage::new(), TracingNotifier)?;
//!
//! let task = ctx.process(&AddTask::new("todo", "Buy milk"))?;
//! let id = task["id"].as_str().unwrap_or_default().to_string();
//!
//! // Drop it on the "doing" column
//! ctx.process(&MoveTask::new(id, "doing"))?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Storage Keys
//!
//! ```text
//! kanban-boards   # AppState: {schemaVersion, boards, activeBoard}
//! kanban-tags     # [Tag]
//! kanban-tasks    # legacy {todo, doing, done} task map, read once and migrated
//! ```

pub mod auto_color;
mod context;
pub mod dispatch;
mod drag;
mod error;
pub mod migration;
pub mod notify;
pub mod operation;
pub mod storage;
pub mod types;

// Command modules
pub mod board;
pub mod column;
pub mod tag;
pub mod task;

pub use context::KanbanContext;
pub use dispatch::{dispatch, parse_command, parse_input, Command};
pub use drag::DragSession;
pub use error::{KanbanError, Result};
pub use migration::{migrate, Migration, MigrationSource};
pub use notify::{CollectingNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use operation::{Execute, ExecutionResult, Operation};
pub use storage::{FileStorage, MemoryStorage, StorageAdapter};

// Re-export commonly used types
pub use types::{
    ActivityLog, AppState, Board, BoardId, BoardType, Column, ColumnId, Deadline, DeadlineStatus,
    LogEntry, Priority, Tag, TagId, TagRegistry, Task, TaskId,
};
