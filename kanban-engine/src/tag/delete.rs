//! DeleteTag command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{TagId, TagRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Delete a tag from the registry. Tasks are not rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTag {
    /// The tag ID to delete
    pub id: TagId,
}

operation!(
    DeleteTag,
    verb = "delete",
    noun = "tag",
    description = "Delete a tag",
    notice = "Tag deleted"
);

impl DeleteTag {
    pub fn new(id: impl Into<TagId>) -> Self {
        Self { id: id.into() }
    }

    fn apply(&self, tags: &mut TagRegistry) -> Result<Outcome> {
        match tags.remove(&self.id) {
            Some(tag) => Ok(Outcome::Changed(json!({
                "deleted": true,
                "id": tag.id,
                "label": tag.label,
            }))),
            None => Ok(Outcome::ignored("delete tag", format!("no tag '{}'", self.id))),
        }
    }
}

impl Execute<TagRegistry, KanbanError> for DeleteTag {
    fn execute(&self, tags: &mut TagRegistry) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(tags))
    }
}
