//! UpdateBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, non_blank, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId, BoardType, FIXED_COLUMN_COUNT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Merge new metadata into a board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBoard {
    pub id: BoardId,
    pub title: Option<String>,
    /// An empty string clears the description
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub board_type: Option<BoardType>,
    pub category: Option<String>,
}

operation!(UpdateBoard, verb = "update", noun = "board", description = "Update board title, description, type or category");

impl UpdateBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, board_type: BoardType) -> Self {
        self.board_type = Some(board_type);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let Some(board) = state.find_board_mut(&self.id) else {
            return Ok(Outcome::ignored("update board", format!("no board '{}'", self.id)));
        };

        let mut updated = board.clone();
        if let Some(title) = &self.title {
            updated.title = non_blank("title", title)?;
        }
        if let Some(description) = &self.description {
            let description = description.trim();
            updated.description = (!description.is_empty()).then(|| description.to_string());
        }
        if let Some(category) = &self.category {
            updated.category = non_blank("category", category)?;
        }
        if let Some(board_type) = self.board_type {
            if board_type == BoardType::Standard && updated.columns.len() > FIXED_COLUMN_COUNT {
                return Err(KanbanError::TypeSwitch {
                    id: self.id.to_string(),
                    columns: updated.columns.len(),
                });
            }
            updated.board_type = board_type;
        }

        if updated == *board {
            return Ok(Outcome::ignored("update board", "nothing to change"));
        }
        let value = serde_json::to_value(&updated)?;
        *board = updated;
        Ok(Outcome::Changed(value))
    }
}

impl Execute<AppState, KanbanError> for UpdateBoard {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, DEFAULT_BOARD_ID};

    #[test]
    fn test_update_board_fields() {
        let mut state = AppState::default();
        UpdateBoard::new(DEFAULT_BOARD_ID)
            .with_title("Home")
            .with_description("chores")
            .with_category("Personal")
            .execute(&mut state)
            .into_result()
            .unwrap();

        let board = &state.boards[0];
        assert_eq!(board.title, "Home");
        assert_eq!(board.description.as_deref(), Some("chores"));
        assert_eq!(board.category, "Personal");
    }

    #[test]
    fn test_clear_description() {
        let mut state = AppState::default();
        state.boards[0].description = Some("old".into());
        UpdateBoard::new(DEFAULT_BOARD_ID)
            .with_description("")
            .execute(&mut state)
            .into_result()
            .unwrap();
        assert!(state.boards[0].description.is_none());
    }

    #[test]
    fn test_switch_to_standard_with_four_columns_refused() {
        let mut state = AppState::default();
        state.boards[0].push_column(Column::new("review", "Review", "sky"));
        let before = state.clone();

        let result = UpdateBoard::new(DEFAULT_BOARD_ID)
            .with_title("Renamed")
            .with_type(BoardType::Standard)
            .execute(&mut state);
        assert!(matches!(
            result.into_result(),
            Err(KanbanError::TypeSwitch { columns: 4, .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_switch_to_standard_with_three_columns() {
        let mut state = AppState::default();
        UpdateBoard::new(DEFAULT_BOARD_ID)
            .with_type(BoardType::Standard)
            .execute(&mut state)
            .into_result()
            .unwrap();
        assert!(state.boards[0].is_standard());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut state = AppState::default();
        let result = UpdateBoard::new(DEFAULT_BOARD_ID).with_title(" ").execute(&mut state);
        assert!(matches!(result.into_result(), Err(KanbanError::InvalidValue { .. })));
    }

    #[test]
    fn test_unknown_or_empty_update_is_noop() {
        let mut state = AppState::default();
        assert!(!UpdateBoard::new("ghost").with_title("x").execute(&mut state).is_change());
        assert!(!UpdateBoard::new(DEFAULT_BOARD_ID).execute(&mut state).is_change());
    }
}
