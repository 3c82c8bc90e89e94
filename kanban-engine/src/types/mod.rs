//! Core types for the kanban engine

mod board;
mod ids;
mod log;
mod state;
mod tag;
mod task;

// Re-export all types
pub use board::{Board, BoardType, Column, DEFAULT_CATEGORY, DONE_COLUMN, FIXED_COLUMN_COUNT};
pub use ids::{BoardId, ColumnId, TagId, TaskId};
pub use log::{ActivityLog, LogEntry};
pub use state::{AppState, CURRENT_SCHEMA_VERSION, DEFAULT_BOARD_ID, DEFAULT_BOARD_TITLE};
pub use tag::{Tag, TagRegistry};
pub use task::{Deadline, DeadlineStatus, Priority, Task};
