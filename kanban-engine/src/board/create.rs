//! CreateBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, non_blank, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, Board, BoardId, BoardType, DEFAULT_CATEGORY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Create a board with the three fixed columns and make it active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoard {
    /// Board title (required)
    pub title: String,
    pub description: Option<String>,
    /// Standard unless stated otherwise
    #[serde(rename = "type", default = "standard")]
    pub board_type: BoardType,
    /// Defaults to "Work"
    pub category: Option<String>,
}

fn standard() -> BoardType {
    BoardType::Standard
}

operation!(CreateBoard, verb = "create", noun = "board", description = "Create a new board and make it active");

impl CreateBoard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            board_type: BoardType::Standard,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, board_type: BoardType) -> Self {
        self.board_type = board_type;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let title = non_blank("title", &self.title)?;
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);

        let mut board = Board::new(BoardId::new(), title, self.board_type).with_category(category);
        if let Some(description) = self.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            board = board.with_description(description);
        }

        let value = serde_json::to_value(&board)?;
        state.active_board = Some(board.id.clone());
        state.boards.push(board);
        Ok(Outcome::Changed(value))
    }
}

impl Execute<AppState, KanbanError> for CreateBoard {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
