//! Operations are structs where the fields ARE the parameters.
//!
//! Each operation implements [`Operation`] for its metadata and
//! [`Execute`] against the state it transforms (`AppState` for boards,
//! columns and tasks; `TagRegistry` for tags).
//!
//! ```ignore
//! operation!(AddTask, verb = "add", noun = "task", description = "Create a new task");
//!
//! impl Execute<AppState, KanbanError> for AddTask {
//!     fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
//!         // validate, then mutate, then report an Outcome
//!     }
//! }
//! ```
//!
//! Operations validate everything before they mutate, so a failed operation
//! leaves state exactly as it found it.

mod execution_result;

pub use execution_result::ExecutionResult;

use crate::error::{KanbanError, Result};
use crate::types::LogEntry;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Metadata shared by every operation
pub trait Operation {
    /// Action word, e.g. "move"
    fn verb(&self) -> &'static str;

    /// Entity kind, e.g. "task"
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Canonical op string (e.g., "add task", "move task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }

    /// Message announced with `success` severity after a destructive change
    fn notice(&self) -> Option<&'static str> {
        None
    }
}

/// Apply an operation to a state
pub trait Execute<S, E> {
    fn execute(&self, state: &mut S) -> ExecutionResult<Value, E>;
}

/// What a successful operation did
#[derive(Debug)]
pub enum Outcome {
    /// State changed; the value describes the change
    Changed(Value),
    /// State untouched (reads and soft no-ops)
    Unchanged(Value),
}

impl Outcome {
    /// A soft no-op: the request referenced something that is not there, or
    /// asked for something already true. Drag-and-drop races make these normal.
    pub fn ignored(op: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(op, %reason, "operation ignored");
        Self::Unchanged(serde_json::json!({ "ignored": true, "reason": reason }))
    }
}

/// Wrap an operation's outcome into an [`ExecutionResult`] with its log entry
pub(crate) fn finish<O>(op: &O, start: Instant, result: Result<Outcome>) -> ExecutionResult<Value, KanbanError>
where
    O: Operation + Serialize,
{
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(Outcome::Unchanged(value)) => ExecutionResult::Unlogged { value },
        Ok(Outcome::Changed(value)) => {
            let input = serde_json::to_value(op).unwrap_or(Value::Null);
            ExecutionResult::Logged {
                log_entry: LogEntry::new(op.op_string(), input, value.clone(), duration_ms),
                value,
            }
        }
        Err(error) => {
            let input = serde_json::to_value(op).unwrap_or(Value::Null);
            let error_msg = error.to_string();
            ExecutionResult::Failed {
                log_entry: Some(LogEntry::failure(op.op_string(), input, &error_msg, duration_ms)),
                error,
            }
        }
    }
}

/// Trimmed `value`, or `InvalidValue` when nothing but whitespace is left
pub(crate) fn non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(KanbanError::invalid_value(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Implement [`Operation`] for an operation struct
macro_rules! operation {
    ($ty:ident, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
    ($ty:ident, verb = $verb:literal, noun = $noun:literal, description = $desc:literal, notice = $notice:literal) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }

            fn notice(&self) -> Option<&'static str> {
                Some($notice)
            }
        }
    };
}

pub(crate) use operation;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        value: u32,
    }

    operation!(Sample, verb = "sample", noun = "thing", description = "Sample operation");

    #[test]
    fn test_operation_metadata() {
        let op = Sample { value: 1 };
        assert_eq!(op.verb(), "sample");
        assert_eq!(op.noun(), "thing");
        assert_eq!(op.description(), "Sample operation");
        assert_eq!(op.op_string(), "sample thing");
        assert_eq!(op.notice(), None);
    }

    #[derive(Serialize)]
    struct Wipe;

    operation!(Wipe, verb = "wipe", noun = "thing", description = "Test wipe", notice = "Thing wiped");

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("title", "  Work  ").unwrap(), "Work");
        assert!(matches!(
            non_blank("title", " \t "),
            Err(KanbanError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_operation_notice() {
        assert_eq!(Wipe.notice(), Some("Thing wiped"));
    }

    #[test]
    fn test_finish_changed_is_logged() {
        let op = Sample { value: 7 };
        let result = finish(&op, Instant::now(), Ok(Outcome::Changed(serde_json::json!({"ok": true}))));
        let (value, entry) = result.split();
        assert_eq!(value.unwrap()["ok"], true);
        let entry = entry.unwrap();
        assert_eq!(entry.op, "sample thing");
        assert_eq!(entry.input["value"], 7);
    }

    #[test]
    fn test_finish_ignored_is_unlogged() {
        let op = Sample { value: 7 };
        let result = finish(&op, Instant::now(), Ok(Outcome::ignored("sample thing", "missing")));
        assert!(!result.should_log());
        assert_eq!(result.into_result().unwrap()["ignored"], true);
    }

    #[test]
    fn test_finish_error_carries_log_entry() {
        let op = Sample { value: 7 };
        let result = finish(&op, Instant::now(), Err(KanbanError::NoActiveBoard));
        assert!(result.should_log());
        assert!(matches!(result.into_result(), Err(KanbanError::NoActiveBoard)));
    }
}
