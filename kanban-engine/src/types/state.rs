//! The whole persisted board state

use super::board::{Board, BoardType};
use super::ids::BoardId;
use serde::{Deserialize, Serialize};

/// Schema version written by this engine
pub const CURRENT_SCHEMA_VERSION: u64 = 2;

/// Id of the board synthesized for fresh or legacy state
pub const DEFAULT_BOARD_ID: &str = "board-1";

/// Title of the board synthesized for fresh or legacy state
pub const DEFAULT_BOARD_TITLE: &str = "Personal Board";

/// All boards plus the active-board pointer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub schema_version: u64,
    pub boards: Vec<Board>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_board: Option<BoardId>,
}

impl Default for AppState {
    /// A single empty "Personal Board", active
    fn default() -> Self {
        Self::with_board(Board::new(
            DEFAULT_BOARD_ID,
            DEFAULT_BOARD_TITLE,
            BoardType::Advanced,
        ))
    }
}

impl AppState {
    /// State holding exactly one board, which is active
    pub fn with_board(board: Board) -> Self {
        let active = board.id.clone();
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            boards: vec![board],
            active_board: Some(active),
        }
    }

    pub fn find_board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }

    pub fn find_board_mut(&mut self, id: &BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| &b.id == id)
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.active_board.as_ref().and_then(|id| self.find_board(id))
    }

    pub fn active_board_mut(&mut self) -> Option<&mut Board> {
        let id = self.active_board.clone()?;
        self.find_board_mut(&id)
    }

    /// Number of boards that are not archived
    pub fn unarchived_count(&self) -> usize {
        self.boards.iter().filter(|b| !b.archived).count()
    }

    /// Where the active pointer should go when the current target disappears
    /// or is archived: first non-archived board, else first board, else none.
    pub fn fallback_active(&self, excluding: Option<&BoardId>) -> Option<BoardId> {
        let candidates = || self.boards.iter().filter(|b| Some(&b.id) != excluding);
        candidates()
            .find(|b| !b.archived)
            .or_else(|| candidates().next())
            .map(|b| b.id.clone())
    }

    /// Point `active_board` at an existing board if it is missing or dangling.
    ///
    /// Returns true when the pointer changed.
    pub fn repair_active(&mut self) -> bool {
        let valid = self
            .active_board
            .as_ref()
            .is_some_and(|id| self.find_board(id).is_some());
        if valid {
            return false;
        }
        let repaired = self.fallback_active(None);
        let changed = repaired != self.active_board;
        self.active_board = repaired;
        changed
    }

    /// All reachable-state invariants: every board is consistent and the active
    /// pointer references an existing board whenever there are boards.
    pub fn is_consistent(&self) -> bool {
        let active_ok = match &self.active_board {
            Some(id) => self.find_board(id).is_some(),
            None => self.boards.is_empty(),
        };
        active_ok && self.boards.iter().all(Board::is_consistent)
    }
}
