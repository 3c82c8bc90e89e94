//! MoveTask command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{AppState, ColumnId, TaskId, DONE_COLUMN};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Drop a task over a column or another task on the active board.
///
/// Within one column this is a reorder: the task is lifted out and inserted
/// at the drop target's index. Across columns it is a transfer: the task is
/// appended to the end of the target column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTask {
    /// The dragged task
    pub id: TaskId,
    /// The drop target: a column id, or the id of a task in the target column
    pub over: String,
}

operation!(MoveTask, verb = "move", noun = "task", description = "Move a task to another position or column");

impl MoveTask {
    pub fn new(id: impl Into<TaskId>, over: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            over: over.into(),
        }
    }

    fn apply(&self, state: &mut AppState) -> Result<Outcome> {
        let board = state.active_board_mut().ok_or(KanbanError::NoActiveBoard)?;

        let Some(source) = board.column_of_task(&self.id).cloned() else {
            return Ok(Outcome::ignored("move task", format!("no task '{}'", self.id)));
        };

        // Columns win over tasks when an id names both
        let over_column = ColumnId::from(self.over.as_str());
        let over_task = TaskId::from(self.over.as_str());
        let (target, over_is_column) = if board.find_column(&over_column).is_some() {
            (over_column, true)
        } else if let Some(column) = board.column_of_task(&over_task) {
            (column.clone(), false)
        } else {
            return Ok(Outcome::ignored("move task", format!("no drop target '{}'", self.over)));
        };

        if source == target {
            let list = board.tasks_in(&source);
            let Some(from) = list.iter().position(|t| t.id == self.id) else {
                return Ok(Outcome::ignored("move task", "task vanished"));
            };
            let to = if over_is_column {
                list.len() - 1
            } else {
                match list.iter().position(|t| t.id == over_task) {
                    Some(idx) => idx,
                    None => return Ok(Outcome::ignored("move task", "drop target vanished")),
                }
            };
            if from == to {
                return Ok(Outcome::ignored("move task", "already in place"));
            }
            board.reorder_task(&source, from, to);
            return Ok(Outcome::Changed(json!({
                "id": self.id,
                "column": source,
                "from": from,
                "to": to,
                "transferred": false,
            })));
        }

        // Check the target list exists before lifting the task out
        if !board.tasks.contains_key(&target) {
            return Err(KanbanError::ColumnNotFound {
                id: target.to_string(),
            });
        }
        let Some(mut task) = board.take_task(&self.id) else {
            return Ok(Outcome::ignored("move task", "task vanished"));
        };
        if target == DONE_COLUMN {
            task.completed_at.get_or_insert_with(Utc::now);
        } else if source == DONE_COLUMN {
            task.completed_at = None;
        }
        let task = board.push_task(&target, task)?;
        Ok(Outcome::Changed(json!({
            "id": self.id,
            "from": source,
            "to": target,
            "transferred": true,
            "task": task,
        })))
    }
}

impl Execute<AppState, KanbanError> for MoveTask {
    fn execute(&self, state: &mut AppState) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Task};

    /// Active board with tasks a, b, c, d in todo and x in doing
    fn state() -> AppState {
        let mut state = AppState::default();
        let board = state.active_board_mut().unwrap();
        for id in ["a", "b", "c", "d"] {
            let mut task = Task::new(id, "todo");
            task.id = TaskId::from(id);
            board.push_task(&ColumnId::from("todo"), task).unwrap();
        }
        let mut x = Task::new("x", "doing");
        x.id = TaskId::from("x");
        board.push_task(&ColumnId::from("doing"), x).unwrap();
        state
    }

    fn order(board: &Board, column: &str) -> Vec<String> {
        board
            .tasks_in(&ColumnId::from(column))
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    fn board(state: &AppState) -> &Board {
        state.active_board().unwrap()
    }

    #[test]
    fn test_reorder_is_array_move_not_swap() {
        let mut state = state();
        MoveTask::new("a", "c").execute(&mut state).into_result().unwrap();
        assert_eq!(order(board(&state), "todo"), vec!["b", "c", "a", "d"]);

        MoveTask::new("d", "b").execute(&mut state).into_result().unwrap();
        assert_eq!(order(board(&state), "todo"), vec!["d", "b", "c", "a"]);
        assert_eq!(board(&state).task_count(), 5);
    }

    #[test]
    fn test_reorder_onto_itself_is_noop() {
        let mut state = state();
        let before = state.clone();
        let result = MoveTask::new("b", "b").execute(&mut state);
        assert!(!result.is_change());
        assert_eq!(state, before);
    }

    #[test]
    fn test_drop_on_own_column_moves_to_end() {
        let mut state = state();
        MoveTask::new("a", "todo").execute(&mut state).into_result().unwrap();
        assert_eq!(order(board(&state), "todo"), vec!["b", "c", "d", "a"]);

        let result = MoveTask::new("a", "todo").execute(&mut state);
        assert!(!result.is_change());
    }

    #[test]
    fn test_transfer_appends_and_updates_column_id() {
        let mut state = state();
        MoveTask::new("b", "doing").execute(&mut state).into_result().unwrap();
        let board = board(&state);
        assert_eq!(order(board, "todo"), vec!["a", "c", "d"]);
        assert_eq!(order(board, "doing"), vec!["x", "b"]);
        assert_eq!(board.tasks_in(&ColumnId::from("doing"))[1].column_id, "doing");
        assert!(board.is_consistent());
    }

    #[test]
    fn test_transfer_over_task_appends_to_its_column() {
        let mut state = state();
        MoveTask::new("x", "a").execute(&mut state).into_result().unwrap();
        let board = board(&state);
        assert_eq!(order(board, "todo"), vec!["a", "b", "c", "d", "x"]);
        assert!(order(board, "doing").is_empty());
    }

    #[test]
    fn test_completed_at_follows_done_column() {
        let mut state = state();
        MoveTask::new("a", "done").execute(&mut state).into_result().unwrap();
        let done = board(&state).tasks_in(&ColumnId::from("done"))[0].clone();
        assert!(done.completed_at.is_some());

        MoveTask::new("a", "todo").execute(&mut state).into_result().unwrap();
        let task = board(&state).find_task(&TaskId::from("a")).unwrap();
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut state = state();
        let before = state.clone();
        assert!(!MoveTask::new("ghost", "doing").execute(&mut state).is_change());
        assert!(!MoveTask::new("a", "nowhere").execute(&mut state).is_change());
        assert_eq!(state, before);
    }

    #[test]
    fn test_exactly_one_copy_after_moves() {
        let mut state = state();
        for (id, over) in [("a", "doing"), ("a", "x"), ("x", "done"), ("a", "todo"), ("c", "a")] {
            MoveTask::new(id, over).execute(&mut state).into_result().unwrap();
        }
        let board = board(&state);
        for id in ["a", "b", "c", "d", "x"] {
            let copies = board.tasks.values().flatten().filter(|t| t.id == id).count();
            assert_eq!(copies, 1, "task {id}");
        }
        assert_eq!(board.task_count(), 5);
        assert!(board.is_consistent());
    }
}
