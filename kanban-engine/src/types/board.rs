//! Board-level types: Board, Column, BoardType

use super::ids::{BoardId, ColumnId, TaskId};
use super::task::Task;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of columns a standard board is pinned to
pub const FIXED_COLUMN_COUNT: usize = 3;

/// Category given to boards that never had one
pub const DEFAULT_CATEGORY: &str = "Work";

/// Id of the fixed column that holds finished work
pub const DONE_COLUMN: &str = "done";

/// Whether a board's columns are fixed or user-defined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    /// Exactly the three fixed columns
    Standard,
    /// Arbitrary, mutable columns
    #[default]
    Advanced,
}

impl BoardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Advanced => "advanced",
        }
    }
}

impl std::str::FromStr for BoardType {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "std" => Ok(Self::Standard),
            "advanced" | "adv" => Ok(Self::Advanced),
            other => Err(KanbanError::invalid_value(
                "type",
                format!("'{other}' is not one of standard, advanced"),
            )),
        }
    }
}

/// A column defines a workflow stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color: String,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: color.into(),
        }
    }

    /// The three fixed columns every board starts with
    pub fn fixed_columns() -> Vec<Column> {
        vec![
            Column::new("todo", "To Do", "indigo"),
            Column::new("doing", "Doing", "amber"),
            Column::new(DONE_COLUMN, "Done", "teal"),
        ]
    }
}

/// A kanban board: metadata, ordered columns and one ordered task list per column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub board_type: BoardType,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default = "Column::fixed_columns")]
    pub columns: Vec<Column>,
    /// Keys are exactly the ids in `columns`
    #[serde(default)]
    pub tasks: BTreeMap<ColumnId, Vec<Task>>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Board {
    /// Create a board with the fixed columns and empty task lists
    pub fn new(id: impl Into<BoardId>, title: impl Into<String>, board_type: BoardType) -> Self {
        let columns = Column::fixed_columns();
        let tasks = columns.iter().map(|c| (c.id.clone(), Vec::new())).collect();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            board_type,
            category: default_category(),
            archived: false,
            columns,
            tasks,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn is_standard(&self) -> bool {
        self.board_type == BoardType::Standard
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn find_column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    /// Tasks of a column in display order (empty for unknown columns)
    pub fn tasks_in(&self, column: &ColumnId) -> &[Task] {
        self.tasks.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The column whose list currently holds the task
    pub fn column_of_task(&self, id: &TaskId) -> Option<&ColumnId> {
        self.tasks
            .iter()
            .find(|(_, list)| list.iter().any(|t| &t.id == id))
            .map(|(column, _)| column)
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.values().flatten().find(|t| &t.id == id)
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    // =========================================================================
    // Task list mutation
    //
    // Every path that places a task in a list goes through these helpers so the
    // task's `column_id` always matches the list holding it.
    // =========================================================================

    /// Append a task to the end of a column, rewriting its `column_id`
    pub fn push_task(&mut self, column: &ColumnId, mut task: Task) -> Result<&Task> {
        let list = self
            .tasks
            .get_mut(column)
            .ok_or_else(|| KanbanError::ColumnNotFound {
                id: column.to_string(),
            })?;
        task.column_id = column.clone();
        list.push(task);
        Ok(&list[list.len() - 1])
    }

    /// Remove a task from whichever column holds it
    pub fn take_task(&mut self, id: &TaskId) -> Option<Task> {
        self.tasks.values_mut().find_map(|list| {
            let idx = list.iter().position(|t| &t.id == id)?;
            Some(list.remove(idx))
        })
    }

    /// Move one element of a column from `from` to `to`, shifting the ones between
    ///
    /// Returns false when either index is out of range.
    pub fn reorder_task(&mut self, column: &ColumnId, from: usize, to: usize) -> bool {
        let Some(list) = self.tasks.get_mut(column) else {
            return false;
        };
        if from >= list.len() || to >= list.len() {
            return false;
        }
        let task = list.remove(from);
        list.insert(to, task);
        true
    }

    /// Append a column together with its empty task list
    pub fn push_column(&mut self, column: Column) {
        self.tasks.insert(column.id.clone(), Vec::new());
        self.columns.push(column);
    }

    /// Remove a column and the task list stored under it
    pub fn remove_column(&mut self, id: &ColumnId) -> Option<(Column, Vec<Task>)> {
        let idx = self.columns.iter().position(|c| &c.id == id)?;
        let column = self.columns.remove(idx);
        let tasks = self.tasks.remove(id).unwrap_or_default();
        Some((column, tasks))
    }

    /// Check the structural invariants: task-list keys equal column ids, and
    /// every task's `column_id` equals the key it is stored under.
    pub fn is_consistent(&self) -> bool {
        let keys_match = self.tasks.len() == self.columns.len()
            && self.columns.iter().all(|c| self.tasks.contains_key(&c.id));
        let ids_match = self
            .tasks
            .iter()
            .all(|(column, list)| list.iter().all(|t| &t.column_id == column));
        keys_match && ids_match
    }
}
