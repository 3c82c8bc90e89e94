//! ArchiveBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Hide a board without deleting it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveBoard {
    pub id: BoardId,
}

operation!(
    ArchiveBoard,
    verb = "archive",
    noun = "board",
    description = "Archive a board",
    notice = "Board archived"
);

impl ArchiveBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let Some(board) = state.find_board(&self.id) else {
            return Ok(Outcome::ignored("archive board", format!("no board '{}'", self.id)));
        };
        if board.archived {
            return Ok(Outcome::ignored("archive board", "already archived"));
        }
        if state.unarchived_count() <= 1 {
            return Err(KanbanError::last_active_board(self.id.as_str(), "archive"));
        }

        if let Some(board) = state.find_board_mut(&self.id) {
            board.archived = true;
        }
        if state.active_board.as_ref() == Some(&self.id) {
            state.active_board = state.fallback_active(Some(&self.id));
        }
        Ok(Outcome::Changed(json!({
            "archived": true,
            "id": self.id,
            "activeBoard": state.active_board,
        })))
    }
}

impl Execute<AppState, KanbanError> for ArchiveBoard {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
