//! Error types for the kanban engine

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Deleting or archiving would leave no non-archived board
    #[error("cannot {action} board '{id}': it is the last active board")]
    LastActiveBoard { id: String, action: String },

    /// Board type change is not allowed for the current column layout
    #[error("cannot switch board '{id}' to standard: it has {columns} columns (at most 3 allowed)")]
    TypeSwitch { id: String, columns: usize },

    /// Columns of a standard board cannot be changed
    #[error("board '{id}' is a standard board; its columns are fixed")]
    ColumnsLocked { id: String },

    /// Task operations need an active board
    #[error("no active board")]
    NoActiveBoard,

    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Tag not found
    #[error("tag not found: {id}")]
    TagNotFound { id: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Persisted state was written by a newer engine
    #[error("unsupported schema version {found} (newest supported is {supported})")]
    UnsupportedSchema { found: u64, supported: u64 },

    /// Storage backend failure
    #[error("storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a last-active-board error for the given action ("delete", "archive")
    pub fn last_active_board(id: impl Into<String>, action: impl Into<String>) -> Self {
        Self::LastActiveBoard {
            id: id.into(),
            action: action.into(),
        }
    }

    /// Whether the error is a guard refusal rather than a fault.
    ///
    /// Guard refusals leave state untouched and are expected during normal use.
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            Self::LastActiveBoard { .. } | Self::TypeSwitch { .. } | Self::ColumnsLocked { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::TaskNotFound {
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "task not found: abc123");
    }

    #[test]
    fn test_last_active_board_message() {
        let err = KanbanError::last_active_board("board-1", "archive");
        assert_eq!(
            err.to_string(),
            "cannot archive board 'board-1': it is the last active board"
        );
    }

    #[test]
    fn test_guard_classification() {
        assert!(KanbanError::last_active_board("b", "delete").is_guard());
        assert!(KanbanError::TypeSwitch {
            id: "b".into(),
            columns: 4
        }
        .is_guard());
        assert!(!KanbanError::NoActiveBoard.is_guard());
        assert!(!KanbanError::invalid_value("title", "empty").is_guard());
    }
}
