//! UpdateColumn command

use super::ensure_unlocked;
use crate::error::{KanbanError, Result};
use crate::operation::{finish, non_blank, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId, ColumnId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Rename or recolor a column. The color is kept when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumn {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    pub color: Option<String>,
}

operation!(UpdateColumn, verb = "update", noun = "column", description = "Rename or recolor a column");

impl UpdateColumn {
    pub fn new(
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
            title: title.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let Some(board) = state.find_board_mut(&self.board_id) else {
            return Ok(Outcome::ignored("update column", format!("no board '{}'", self.board_id)));
        };
        ensure_unlocked(board)?;
        let title = non_blank("title", &self.title)?;
        let Some(column) = board.find_column_mut(&self.column_id) else {
            return Ok(Outcome::ignored("update column", format!("no column '{}'", self.column_id)));
        };

        let color = match self.color.as_deref().map(str::trim) {
            Some(color) if !color.is_empty() => color.to_string(),
            _ => column.color.clone(),
        };
        if column.title == title && column.color == color {
            return Ok(Outcome::ignored("update column", "nothing to change"));
        }
        column.title = title;
        column.color = color;
        Ok(Outcome::Changed(serde_json::to_value(&*column)?))
    }
}

impl Execute<AppState, KanbanError> for UpdateColumn {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
