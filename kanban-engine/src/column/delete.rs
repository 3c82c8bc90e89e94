//! DeleteColumn command

use super::ensure_unlocked;
use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId, ColumnId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Remove a column together with every task in it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteColumn {
    pub board_id: BoardId,
    pub column_id: ColumnId,
}

operation!(
    DeleteColumn,
    verb = "delete",
    noun = "column",
    description = "Delete a column and its tasks",
    notice = "Column deleted"
);

impl DeleteColumn {
    pub fn new(board_id: impl Into<BoardId>, column_id: impl Into<ColumnId>) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
        }
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let Some(board) = state.find_board_mut(&self.board_id) else {
            return Ok(Outcome::ignored("delete column", format!("no board '{}'", self.board_id)));
        };
        ensure_unlocked(board)?;
        let Some((column, tasks)) = board.remove_column(&self.column_id) else {
            return Ok(Outcome::ignored("delete column", format!("no column '{}'", self.column_id)));
        };
        Ok(Outcome::Changed(json!({
            "deleted": true,
            "id": column.id,
            "tasksRemoved": tasks.len(),
        })))
    }
}

impl Execute<AppState, KanbanError> for DeleteColumn {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
