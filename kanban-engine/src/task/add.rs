//! AddTask command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, non_blank, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, ColumnId, Deadline, Priority, TagId, Task, DONE_COLUMN};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Append a new task to a column of the active board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTask {
    pub column_id: ColumnId,
    /// The task text (required)
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    pub deadline: Option<Deadline>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagId>,
}

operation!(AddTask, verb = "add", noun = "task", description = "Create a new task at the end of a column");

impl AddTask {
    pub fn new(column_id: impl Into<ColumnId>, text: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            text: text.into(),
            priority: Priority::default(),
            deadline: None,
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<Deadline>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = tags;
        self
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let board = state.active_board_mut().ok_or(KanbanError::NoActiveBoard)?;
        let text = non_blank("text", &self.text)?;

        let mut task = Task::new(text, self.column_id.clone())
            .with_priority(self.priority)
            .with_tags(self.tags.clone());
        if let Some(deadline) = self.deadline.as_ref().filter(|d| !d.as_str().trim().is_empty()) {
            task = task.with_deadline(deadline.clone());
        }
        if let Some(description) = self.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            task = task.with_description(description);
        }
        if self.column_id == DONE_COLUMN {
            task.completed_at = Some(Utc::now());
        }

        let task = board.push_task(&self.column_id, task)?;
        Ok(Outcome::Changed(serde_json::to_value(task)?))
    }
}

impl Execute<AppState, KanbanError> for AddTask {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
