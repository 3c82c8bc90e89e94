//! DeleteBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Delete a board and everything on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBoard {
    pub id: BoardId,
}

operation!(
    DeleteBoard,
    verb = "delete",
    noun = "board",
    description = "Delete a board with its columns and tasks",
    notice = "Board deleted"
);

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let Some(idx) = state.boards.iter().position(|b| b.id == self.id) else {
            return Ok(Outcome::ignored("delete board", format!("no board '{}'", self.id)));
        };
        if !state.boards[idx].archived && state.unarchived_count() <= 1 {
            return Err(KanbanError::last_active_board(self.id.as_str(), "delete"));
        }

        let removed = state.boards.remove(idx);
        if state.active_board.as_ref() == Some(&self.id) {
            state.active_board = state.fallback_active(None);
        }
        Ok(Outcome::Changed(json!({
            "deleted": true,
            "id": removed.id,
            "tasksRemoved": removed.task_count(),
            "activeBoard": state.active_board,
        })))
    }
}

impl Execute<AppState, KanbanError> for DeleteBoard {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
