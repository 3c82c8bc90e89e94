//! GetTask command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, TaskId};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Get a task from the active board, with its deadline status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTask {
    pub id: TaskId,
    /// Day the deadline is judged against; today (local time) when omitted
    pub today: Option<NaiveDate>,
}

operation!(GetTask, verb = "get", noun = "task", description = "Get a task by id");

impl GetTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            today: None,
        }
    }

    pub fn on(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn apply(&self, state: &AppState) -> Result<Outcome> {
        let board = state.active_board().ok_or(KanbanError::NoActiveBoard)?;
        let task = board.find_task(&self.id).ok_or_else(|| KanbanError::TaskNotFound {
            id: self.id.to_string(),
        })?;

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let mut value = serde_json::to_value(task)?;
        value["deadlineStatus"] = serde_json::to_value(task.deadline_status(today))?;
        Ok(Outcome::Unchanged(value))
    }
}

impl Execute<AppState, KanbanError> for GetTask {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnId, Task};

    fn state_with(task: Task) -> AppState {
        let mut state = AppState::default();
        state
            .active_board_mut()
            .unwrap()
            .push_task(&ColumnId::from("todo"), task)
            .unwrap();
        state
    }

    #[test]
    fn test_get_task_with_overdue_deadline() {
        let task = Task::new("Report", "todo").with_deadline("2024-05-01");
        let id = task.id.clone();
        let mut state = state_with(task);

        let today = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let value = GetTask::new(id).on(today).execute(&mut state).into_result().unwrap();
        assert_eq!(value["text"], "Report");
        assert_eq!(value["deadlineStatus"]["status"], "overdue");
        assert_eq!(value["deadlineStatus"]["days_late"], 2);
    }

    #[test]
    fn test_get_task_without_deadline() {
        let task = Task::new("Report", "todo");
        let id = task.id.clone();
        let mut state = state_with(task);
        let result = GetTask::new(id).execute(&mut state);
        assert!(!result.should_log());
        assert!(result.into_result().unwrap()["deadlineStatus"].is_null());
    }

    #[test]
    fn test_get_missing_task() {
        let mut state = AppState::default();
        let result = GetTask::new("ghost").execute(&mut state).into_result();
        assert!(matches!(result, Err(KanbanError::TaskNotFound { .. })));
    }
}
