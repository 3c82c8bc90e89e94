//! UnarchiveBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, BoardId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Bring an archived board back. The active board does not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnarchiveBoard {
    pub id: BoardId,
}

operation!(UnarchiveBoard, verb = "unarchive", noun = "board", description = "Restore an archived board");

impl UnarchiveBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let Some(board) = state.find_board_mut(&self.id) else {
            return Ok(Outcome::ignored("unarchive board", format!("no board '{}'", self.id)));
        };
        if !board.archived {
            return Ok(Outcome::ignored("unarchive board", "not archived"));
        }
        board.archived = false;
        Ok(Outcome::Changed(json!({ "archived": false, "id": self.id })))
    }
}

impl Execute<AppState, KanbanError> for UnarchiveBoard {
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
    fn test_unarchive_keeps_active_pointer() {
        let mut state = AppState::default();
        let mut old = Board::new("old", "Old", BoardType::Advanced);
        old.archived = true;
        state.boards.push(old);

        UnarchiveBoard::new("old").execute(&mut state).into_result().unwrap();
        assert!(!state.boards[1].archived);
        assert_eq!(state.active_board, Some(BoardId::from(DEFAULT_BOARD_ID)));
    }

    #[test]
    fn test_unarchive_unarchived_is_noop() {
        let mut state = AppState::default();
        assert!(!UnarchiveBoard::new(DEFAULT_BOARD_ID).execute(&mut state).is_change());
        assert!(!UnarchiveBoard::new("ghost").execute(&mut state).is_change());
    }
}
