//! UpdateTag command

use super::color_arg;
use crate::error::{KanbanError, Result};
use crate::operation::{finish, non_blank, operation, Execute, ExecutionResult, Outcome};
use crate::types::{TagId, TagRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Relabel or recolor a tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTag {
    pub id: TagId,
    pub label: Option<String>,
    pub color: Option<String>,
}

operation!(UpdateTag, verb = "update", noun = "tag", description = "Change a tag's label or color");

impl UpdateTag {
    pub fn new(id: impl Into<TagId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn apply(&self, tags: &mut TagRegistry) -> Result<Outcome> {
        let Some(tag) = tags.get_mut(&self.id) else {
            return Ok(Outcome::ignored("update tag", format!("no tag '{}'", self.id)));
        };

        let mut updated = tag.clone();
        if let Some(label) = &self.label {
            updated.label = non_blank("label", label)?;
        }
        if let Some(color) = color_arg(self.color.as_deref()) {
            updated.color = color;
        }
        if updated == *tag {
            return Ok(Outcome::ignored("update tag", "nothing to change"));
        }
        let value = serde_json::to_value(&updated)?;
        *tag = updated;
        Ok(Outcome::Changed(value))
    }
}

impl Execute<TagRegistry, KanbanError> for UpdateTag {
    fn execute(&self, tags: &mut TagRegistry) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(tags))
    }
}
