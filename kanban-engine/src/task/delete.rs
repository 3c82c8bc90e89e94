//! DeleteTask command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Remove a task from a column of the active board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTask {
    pub column_id: ColumnId,
    pub id: TaskId,
}

operation!(
    DeleteTask,
    verb = "delete",
    noun = "task",
    description = "Delete a task",
    notice = "Task deleted"
);

impl DeleteTask {
    pub fn new(column_id: impl Into<ColumnId>, id: impl Into<TaskId>) -> Self {
        Self {
            column_id: column_id.into(),
            id: id.into(),
        }
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let board = state.active_board_mut().ok_or(KanbanError::NoActiveBoard)?;
        let Some(list) = board.tasks.get_mut(&self.column_id) else {
            return Ok(Outcome::ignored("delete task", format!("no column '{}'", self.column_id)));
        };
        let Some(idx) = list.iter().position(|t| t.id == self.id) else {
            return Ok(Outcome::ignored("delete task", format!("no task '{}'", self.id)));
        };
        let removed = list.remove(idx);
        Ok(Outcome::Changed(json!({
            "deleted": true,
            "id": removed.id,
            "column": self.column_id,
        })))
    }
}

impl Execute<AppState, KanbanError> for DeleteTask {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Task;

    #[test]
    fn test_delete_task() {
        let mut state = AppState::default();
        let task = Task::new("x", "todo");
        let id = task.id.clone();
        let board = state.active_board_mut().unwrap();
        board.push_task(&ColumnId::from("todo"), task).unwrap();
        board.push_task(&ColumnId::from("todo"), Task::new("y", "todo")).unwrap();

        DeleteTask::new("todo", id.clone())
            .execute(&mut state)
            .into_result()
            .unwrap();
        let board = state.active_board().unwrap();
        assert!(board.find_task(&id).is_none());
        assert_eq!(board.task_count(), 1);
    }

    #[test]
    fn test_delete_unknown_task_is_noop() {
        let mut state = AppState::default();
        assert!(!DeleteTask::new("todo", "ghost").execute(&mut state).is_change());
        assert!(!DeleteTask::new("ghost", "ghost").execute(&mut state).is_change());
        assert_eq!(state, AppState::default());
    }
}
