//! SelectBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Point the active-board pointer at a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectBoard {
    pub id: BoardId,
}

operation!(SelectBoard, verb = "select", noun = "board", description = "Make a board the active board");

impl SelectBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        if state.find_board(&self.id).is_none() {
            return Ok(Outcome::ignored("select board", format!("no board '{}'", self.id)));
        }
        if state.active_board.as_ref() == Some(&self.id) {
            return Ok(Outcome::Unchanged(json!({ "activeBoard": self.id })));
        }
        state.active_board = Some(self.id.clone());
        Ok(Outcome::Changed(json!({ "activeBoard": self.id })))
    }
}

impl Execute<AppState, KanbanError> for SelectBoard {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
