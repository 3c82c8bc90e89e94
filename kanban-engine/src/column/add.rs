//! AddColumn command

use super::ensure_unlocked;
use crate::auto_color::default_column_color;
use crate::error::{KanbanError, Result};
use crate::operation::{finish, non_blank, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId, Column, ColumnId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Append a column (with an empty task list) to an advanced board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddColumn {
    pub board_id: BoardId,
    /// The column display title
    pub title: String,
    /// Defaults to indigo
    pub color: Option<String>,
}

operation!(AddColumn, verb = "add", noun = "column", description = "Add a new column to an advanced board");

impl AddColumn {
    pub fn new(board_id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
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
            return Ok(Outcome::ignored("add column", format!("no board '{}'", self.board_id)));
        };
        ensure_unlocked(board)?;
        let title = non_blank("title", &self.title)?;
        let color = self
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_column_color());

        let column = Column::new(ColumnId::new(), title, color);
        let value = serde_json::to_value(&column)?;
        board.push_column(column);
        Ok(Outcome::Changed(value))
    }
}

impl Execute<AppState, KanbanError> for AddColumn {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, BoardType, DEFAULT_BOARD_ID};

    #[test]
    fn test_add_column() {
        let mut state = AppState::default();
        let value = AddColumn::new(DEFAULT_BOARD_ID, "Review")
            .with_color("sky")
            .execute(&mut state)
            .into_result()
            .unwrap();

        let board = &state.boards[0];
        assert_eq!(board.columns.len(), 4);
        let column = &board.columns[3];
        assert_eq!(column.title, "Review");
        assert_eq!(column.color, "sky");
        assert_eq!(value["id"], column.id.as_str());
        assert!(board.tasks_in(&column.id).is_empty());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_add_column_default_color() {
        let mut state = AppState::default();
        AddColumn::new(DEFAULT_BOARD_ID, "Backlog")
            .execute(&mut state)
            .into_result()
            .unwrap();
        assert_eq!(state.boards[0].columns[3].color, "indigo");
    }

    #[test]
    fn test_add_column_to_standard_board_refused() {
        let mut state = AppState::with_board(Board::new("std", "Std", BoardType::Standard));
        let before = state.clone();
        let result = AddColumn::new("std", "Review").execute(&mut state);
        assert!(matches!(
            result.into_result(),
            Err(KanbanError::ColumnsLocked { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_column_blank_title() {
        let mut state = AppState::default();
        let result = AddColumn::new(DEFAULT_BOARD_ID, "").execute(&mut state);
        assert!(matches!(result.into_result(), Err(KanbanError::InvalidValue { .. })));
    }

    #[test]
    fn test_add_column_unknown_board_is_noop() {
        let mut state = AppState::default();
        assert!(!AddColumn::new("ghost", "X").execute(&mut state).is_change());
        assert_eq!(state, AppState::default());
    }
}
