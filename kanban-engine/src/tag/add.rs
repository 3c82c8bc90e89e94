//! AddTag command

use super::color_arg;
use crate::error::{KanbanError, Result};
use crate::operation::{finish, non_blank, operation, Execute, ExecutionResult, Outcome};
use crate::types::{Tag, TagRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Create a tag in the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTag {
    pub label: String,
    /// Picked from the tag palette by label when omitted
    pub color: Option<String>,
}

operation!(AddTag, verb = "add", noun = "tag", description = "Create a reusable tag");

impl AddTag {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn apply(&self, tags: &mut TagRegistry) -> Result<Outcome> {
        let mut tag = Tag::new(non_blank("label", &self.label)?);
        if let Some(color) = color_arg(self.color.as_deref()) {
            tag = tag.with_color(color);
        }
        let value = serde_json::to_value(&tag)?;
        tags.insert(tag);
        Ok(Outcome::Changed(value))
    }
}

impl Execute<TagRegistry, KanbanError> for AddTag {
    fn execute(&self, tags: &mut TagRegistry) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        finish(self, start, self.apply(tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auto_color::{auto_color, TAG_PALETTE};

    #[test]
    fn test_add_tag() {
        let mut tags = TagRegistry::new();
        let value = AddTag::new("urgent")
            .with_color("rose")
            .execute(&mut tags)
            .into_result()
            .unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.tags()[0].label, "urgent");
        assert_eq!(tags.tags()[0].color, "rose");
        assert_eq!(value["id"], tags.tags()[0].id.as_str());
    }

    #[test]
    fn test_add_tag_auto_color() {
        let mut tags = TagRegistry::new();
        AddTag::new(" bug ").execute(&mut tags).into_result().unwrap();
        let tag = &tags.tags()[0];
        assert_eq!(tag.label, "bug");
        assert_eq!(tag.color, auto_color("bug"));
        assert!(TAG_PALETTE.contains(&tag.color.as_str()));
    }

    #[test]
    fn test_add_tag_ids_unique_and_labels_may_repeat() {
        let mut tags = TagRegistry::new();
        AddTag::new("x").execute(&mut tags).into_result().unwrap();
        AddTag::new("x").execute(&mut tags).into_result().unwrap();
        assert_eq!(tags.len(), 2);
        assert_ne!(tags.tags()[0].id, tags.tags()[1].id);
    }

    #[test]
    fn test_blank_label_rejected() {
        let mut tags = TagRegistry::new();
        let result = AddTag::new("  ").execute(&mut tags);
        assert!(matches!(result.into_result(), Err(KanbanError::InvalidValue { .. })));
        assert!(tags.is_empty());
    }
}
