//! UpdateTask command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, non_blank, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, ColumnId, Deadline, Priority, TagId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Edit a task in place.
///
/// The task is looked up in `column_id` only and never leaves it; use
/// [`MoveTask`](super::MoveTask) to relocate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub column_id: ColumnId,
    pub id: TaskId,
    pub text: Option<String>,
    pub priority: Option<Priority>,
    /// An empty string clears the deadline
    pub deadline: Option<String>,
    /// An empty string clears the description
    pub description: Option<String>,
    /// Replaces the tag list
    pub tags: Option<Vec<TagId>>,
    /// `null` clears the completion time, a missing field leaves it alone
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

/// Deserialize a field that was present in the input, `null` included
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

operation!(UpdateTask, verb = "update", noun = "task", description = "Edit a task's fields in place");

impl UpdateTask {
    pub fn new(column_id: impl Into<ColumnId>, id: impl Into<TaskId>) -> Self {
        Self {
            column_id: column_id.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(Some(completed_at));
        self
    }

    pub fn clear_completed_at(mut self) -> Self {
        self.completed_at = Some(None);
        self
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let board = state.active_board_mut().ok_or(KanbanError::NoActiveBoard)?;
        let Some(task) = board
            .tasks
            .get_mut(&self.column_id)
            .and_then(|list| list.iter_mut().find(|t| t.id == self.id))
        else {
            return Ok(Outcome::ignored(
                "update task",
                format!("no task '{}' in column '{}'", self.id, self.column_id),
            ));
        };

        let mut updated = task.clone();
        if let Some(text) = &self.text {
            updated.text = non_blank("text", text)?;
        }
        if let Some(priority) = self.priority {
            updated.priority = priority;
        }
        if let Some(deadline) = &self.deadline {
            let deadline = deadline.trim();
            updated.deadline = (!deadline.is_empty()).then(|| Deadline::new(deadline));
        }
        if let Some(description) = &self.description {
            let description = description.trim();
            updated.description = (!description.is_empty()).then(|| description.to_string());
        }
        if let Some(tags) = &self.tags {
            updated.tags = tags.clone();
        }
        if let Some(completed_at) = self.completed_at {
            updated.completed_at = completed_at;
        }

        if updated == *task {
            return Ok(Outcome::ignored("update task", "nothing to change"));
        }
        let value = serde_json::to_value(&updated)?;
        *task = updated;
        Ok(Outcome::Changed(value))
    }
}

impl Execute<AppState, KanbanError> for UpdateTask {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}
