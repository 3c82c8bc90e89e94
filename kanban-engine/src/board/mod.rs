//! Board commands

mod archive;
mod create;
mod delete;
mod get;
mod list;
mod select;
mod unarchive;
mod update;

pub use archive::ArchiveBoard;
pub use create::CreateBoard;
pub use delete::DeleteBoard;
pub use get::GetBoard;
pub use list::ListBoards;
pub use select::SelectBoard;
pub use unarchive::UnarchiveBoard;
pub use update::UpdateBoard;

use crate::types::{Board, ColumnId, DONE_COLUMN};
use serde_json::{json, Value};

/// Per-column task counts and totals, as shown on the home screen
pub(crate) fn board_stats(board: &Board) -> Value {
    let columns: Vec<Value> = board
        .columns
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "title": c.title,
                "color": c.color,
                "taskCount": board.tasks_in(&c.id).len(),
            })
        })
        .collect();
    json!({
        "columns": columns,
        "total": board.task_count(),
        "completed": board.tasks_in(&ColumnId::from(DONE_COLUMN)).len(),
    })
}
