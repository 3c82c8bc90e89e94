//! Column commands
//!
//! Only advanced boards have editable columns; on a standard board every
//! column command fails with `ColumnsLocked`.

mod add;
mod delete;
mod update;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use update::UpdateColumn;

use crate::error::{KanbanError, Result};
use crate::types::Board;

fn ensure_unlocked(board: &Board) -> Result<()> {
    if board.is_standard() {
        return Err(KanbanError::ColumnsLocked {
            id: board.id.to_string(),
        });
    }
    Ok(())
}
