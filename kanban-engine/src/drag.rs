//! Drag-and-drop session tracking

use crate::task::MoveTask;
use crate::types::TaskId;

/// At most one task is being dragged at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging { active_id: TaskId },
}

impl DragSession {
    /// Begin dragging a task; an unfinished drag is abandoned
    pub fn start(&mut self, id: impl Into<TaskId>) {
        let id = id.into();
        if let Self::Dragging { active_id } = self {
            tracing::debug!(abandoned = %active_id, "drag restarted");
        }
        *self = Self::Dragging { active_id: id };
    }

    /// Finish the drag over `over` (a column or task id).
    ///
    /// Always returns to idle. Yields the move to perform, if any.
    pub fn end(&mut self, over: Option<&str>) -> Option<MoveTask> {
        let Self::Dragging { active_id } = std::mem::take(self) else {
            return None;
        };
        over.map(|over| MoveTask::new(active_id, over))
    }

    /// Abandon the drag without moving anything
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn active_id(&self) -> Option<&TaskId> {
        match self {
            Self::Idle => None,
            Self::Dragging { active_id } => Some(active_id),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
