//! ClearCompleted command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, ColumnId, DONE_COLUMN};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Empty a column of the active board, `done` by default
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCompleted {
    #[serde(default = "done_column")]
    pub column_id: ColumnId,
}

fn done_column() -> ColumnId {
    ColumnId::from(DONE_COLUMN)
}

impl Default for ClearCompleted {
    fn default() -> Self {
        Self {
            column_id: done_column(),
        }
    }
}

operation!(
    ClearCompleted,
    verb = "clear",
    noun = "tasks",
    description = "Remove every task from a column",
    notice = "Completed tasks cleared"
);

impl ClearCompleted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_column(column_id: impl Into<ColumnId>) -> Self {
        Self {
            column_id: column_id.into(),
        }
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let board = state.active_board_mut().ok_or(KanbanError::NoActiveBoard)?;
        let Some(list) = board.tasks.get_mut(&self.column_id) else {
            return Ok(Outcome::ignored("clear tasks", format!("no column '{}'", self.column_id)));
        };
        if list.is_empty() {
            return Ok(Outcome::ignored("clear tasks", "nothing to clear"));
        }
        let cleared = std::mem::take(list);
        Ok(Outcome::Changed(json!({
            "cleared": cleared.len(),
            "column": self.column_id,
        })))
    }
}

impl Execute<AppState, KanbanError> for ClearCompleted {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
