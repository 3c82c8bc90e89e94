//! ListTags command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{Tag, TagRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// List all tags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTags {
    /// Only tags whose label contains this text (case-insensitive)
    pub filter: Option<String>,
}

operation!(ListTags, verb = "list", noun = "tags", description = "List all tags");

impl ListTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn apply(&self, tags: &TagRegistry) -> Result<Outcome> {
        let needle = self.filter.as_deref().map(|f| f.trim().to_lowercase());
        let matching: Vec<&Tag> = tags
            .tags()
            .iter()
            .filter(|t| {
                needle
                    .as_deref()
                    .is_none_or(|n| t.label.to_lowercase().contains(n))
            })
            .collect();
        Ok(Outcome::Unchanged(json!({
            "tags": matching,
            "count": matching.len(),
        })))
    }
}

impl Execute<TagRegistry, KanbanError> for ListTags {
    fn execute(&self, tags: &mut TagRegistry) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(tags))
    }
}
