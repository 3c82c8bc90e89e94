//! ListBoards command

use super::board_stats;
use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::AppState;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// List boards with their task counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBoards {
    /// Only archived (`true`) or only unarchived (`false`) boards
    pub archived: Option<bool>,
}

operation!(ListBoards, verb = "list", noun = "boards", description = "List boards with task counts");

impl ListBoards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    fn apply(&self, state: &AppState) -> Result<Outcome> {
        let boards: Vec<Value> = state
            .boards
            .iter()
            .filter(|b| self.archived.is_none_or(|archived| b.archived == archived))
            .map(|b| {
                json!({
                    "id": b.id,
                    "title": b.title,
                    "description": b.description,
                    "type": b.board_type,
                    "category": b.category,
                    "archived": b.archived,
                    "active": state.active_board.as_ref() == Some(&b.id),
                    "stats": board_stats(b),
                })
            })
            .collect();
        let count = boards.len();
        Ok(Outcome::Unchanged(json!({
            "boards": boards,
            "count": count,
        })))
    }
}

impl Execute<AppState, KanbanError> for ListBoards {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
