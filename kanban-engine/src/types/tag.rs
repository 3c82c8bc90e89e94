//! Tags and the global tag registry

use super::ids::TagId;
use serde::{Deserialize, Serialize};

/// A reusable label, referenced by id from tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
    pub color: String,
}

impl Tag {
    /// Create a new tag with a fresh id and an auto-color based on the label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let color = crate::auto_color::auto_color(&label).to_string();
        Self {
            id: TagId::new(),
            label,
            color,
        }
    }

    /// Create a new tag with an explicit color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// The app-wide list of tags, persisted separately from boards.
///
/// Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagRegistry {
    tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, id: &TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| &t.id == id)
    }

    pub fn get_mut(&mut self, id: &TagId) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.get(id).is_some()
    }

    /// Append a tag. Returns false (and leaves the registry alone) on a duplicate id.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(&tag.id) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove(&mut self, id: &TagId) -> Option<Tag> {
        let idx = self.tags.iter().position(|t| &t.id == id)?;
        Some(self.tags.remove(idx))
    }

    /// Resolve tag ids to tags, in the given order.
    ///
    /// Ids without a tag (deleted tags still referenced by tasks) are skipped.
    pub fn resolve<'a>(&'a self, ids: &'a [TagId]) -> impl Iterator<Item = &'a Tag> + 'a {
        ids.iter().filter_map(move |id| self.get(id))
    }
}

impl From<Vec<Tag>> for TagRegistry {
    fn from(tags: Vec<Tag>) -> Self {
        Self { tags }
    }
}
