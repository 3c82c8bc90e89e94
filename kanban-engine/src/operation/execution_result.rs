//! Execution result types for operations

use crate::types::LogEntry;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: Operations that changed state and should be persisted and audited
/// - Unlogged: Reads, and mutations that resolved to a no-op
/// - Failed: Errors (optionally logged)
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and changed state
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded without changing state
    Unlogged { value: T },
    /// Operation failed; state is unchanged
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Whether the operation changed state
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Logged { .. })
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_into_result() {
        let ok: ExecutionResult<i32, String> = ExecutionResult::Unlogged { value: 3 };
        assert_eq!(ok.into_result(), Ok(3));

        let err: ExecutionResult<i32, String> = ExecutionResult::Failed {
            error: "bad".into(),
            log_entry: None,
        };
        assert_eq!(err.into_result(), Err("bad".to_string()));
    }

    #[test]
    fn test_should_log() {
        let logged: ExecutionResult<i32, String> = ExecutionResult::Logged {
            value: 1,
            log_entry: LogEntry::new("add task", Value::Null, Value::Null, 0),
        };
        assert!(logged.should_log());
        assert!(logged.is_change());

        let unlogged: ExecutionResult<i32, String> = ExecutionResult::Unlogged { value: 1 };
        assert!(!unlogged.should_log());
        assert!(!unlogged.is_change());
    }
}
