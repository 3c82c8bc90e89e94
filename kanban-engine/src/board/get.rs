//! GetBoard command

use super::board_stats;
use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Get a board with its columns, tasks and counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBoard {
    /// Board to read; the active board when omitted
    pub id: Option<BoardId>,
}

operation!(GetBoard, verb = "get", noun = "board", description = "Get a board with its tasks and counts");

impl GetBoard {
    /// Read the active board
    pub fn active() -> Self {
        Self { id: None }
    }

    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: Some(id.into()) }
    }

    fn apply(&self, state: &AppState) -> Result<Outcome> {
        let board = match &self.id {
            Some(id) => state
                .find_board(id)
                .ok_or_else(|| KanbanError::BoardNotFound { id: id.to_string() })?,
            None => state.active_board().ok_or(KanbanError::NoActiveBoard)?,
        };

        let mut value = serde_json::to_value(board)?;
        value["active"] = Value::Bool(state.active_board.as_ref() == Some(&board.id));
        value["stats"] = board_stats(board);
        Ok(Outcome::Unchanged(value))
    }
}

impl Execute<AppState, KanbanError> for GetBoard {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
