//! GetTag command

use crate::error::{KanbanError, Result};
use crate::operation::{finish, operation, Execute, ExecutionResult, Outcome};
use crate::types::{TagId, TagRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Get a tag by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTag {
    pub id: TagId,
}

operation!(GetTag, verb = "get", noun = "tag", description = "Get a tag by id");

impl GetTag {
    pub fn new(id: impl Into<TagId>) -> Self {
        Self { id: id.into() }
    }

    fn apply(&self, tags: &TagRegistry) -> Result<Outcome> {
        let tag = tags.get(&self.id).ok_or_else(|| KanbanError::TagNotFound {
            id: self.id.to_string(),
        })?;
        Ok(Outcome::Unchanged(serde_json::to_value(tag)?))
    }
}

impl Execute<TagRegistry, KanbanError> for GetTag {
    fn execute(&self, tags: &mut TagRegistry) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tag;

    #[test]
    fn test_get_tag() {
        let tag = Tag::new("bug");
        let id = tag.id.clone();
        let mut tags = TagRegistry::from(vec![tag]);
        let value = GetTag::new(id).execute(&mut tags).into_result().unwrap();
        assert_eq!(value["label"], "bug");
    }

    #[test]
    fn test_get_missing_tag() {
        let mut tags = TagRegistry::new();
        let result = GetTag::new("ghost").execute(&mut tags).into_result();
        assert!(matches!(result, Err(KanbanError::TagNotFound { .. })));
    }
}
