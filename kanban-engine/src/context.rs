//! KanbanContext - owns the board state and everything around it
//!
//! Operations do the work; the context loads state through the migrator,
//! runs operations against it, then persists, records activity and notifies.

use crate::drag::DragSession;
use crate::error::{KanbanError, Result};
use crate::migration::{self, MigrationSource};
use crate::notify::{Notifier, Severity};
use crate::operation::{Execute, ExecutionResult, Operation};
use crate::storage::{StorageAdapter, BOARDS_KEY, LEGACY_TASKS_KEY, TAGS_KEY};
use crate::types::{ActivityLog, AppState, LogEntry, Tag, TagId, TagRegistry, Task, TaskId};
use serde_json::{json, Value};

/// Owns board state, the tag registry, the drag session and their persistence
pub struct KanbanContext {
    state: AppState,
    tags: TagRegistry,
    drag: DragSession,
    activity: ActivityLog,
    storage: Box<dyn StorageAdapter>,
    notifier: Box<dyn Notifier>,
}

impl std::fmt::Debug for KanbanContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanContext")
            .field("state", &self.state)
            .field("tags", &self.tags)
            .field("drag", &self.drag)
            .field("activity", &self.activity.len())
            .finish_non_exhaustive()
    }
}

impl KanbanContext {
    /// Load and migrate persisted state.
    ///
    /// Unparseable blobs are logged and replaced by defaults in memory; storage
    /// is left alone until the next change. Blobs from a newer schema and
    /// storage read failures are returned as errors so nothing gets overwritten.
    pub fn open(
        storage: impl StorageAdapter + 'static,
        notifier: impl Notifier + 'static,
    ) -> Result<Self> {
        let mut ctx = Self {
            state: AppState::default(),
            tags: TagRegistry::new(),
            drag: DragSession::default(),
            activity: ActivityLog::default(),
            storage: Box::new(storage),
            notifier: Box::new(notifier),
        };
        ctx.load()?;
        Ok(ctx)
    }

    /// Keep at most `limit` activity entries
    pub fn with_activity_limit(mut self, limit: usize) -> Self {
        self.activity = ActivityLog::new(limit);
        self
    }

    fn load(&mut self) -> Result<()> {
        let current = self.storage.load(BOARDS_KEY)?;
        let legacy = match current {
            Some(_) => None,
            None => self.storage.load(LEGACY_TASKS_KEY)?,
        };

        match migration::migrate(current.as_deref(), legacy.as_deref()) {
            Ok(migrated) => {
                tracing::debug!(source = ?migrated.source, rewritten = migrated.rewritten, "loaded board state");
                self.state = migrated.state;
                if migrated.rewritten && migrated.source != MigrationSource::Fresh {
                    self.persist_state();
                }
            }
            Err(error @ KanbanError::UnsupportedSchema { .. }) => return Err(error),
            Err(error) => {
                tracing::error!(%error, "stored board state is unreadable, starting fresh");
                self.notifier
                    .notify("Saved boards could not be read", Severity::Warning);
            }
        }

        let raw_tags = self.storage.load(TAGS_KEY)?;
        match migration::migrate_tags(raw_tags.as_deref()) {
            Ok(tags) => self.tags = tags,
            Err(error) => {
                tracing::error!(%error, "stored tags are unreadable, starting empty");
                self.notifier
                    .notify("Saved tags could not be read", Severity::Warning);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn storage(&self) -> &dyn StorageAdapter {
        self.storage.as_ref()
    }

    /// Recorded activity, newest first
    pub fn activity(&self, limit: Option<usize>) -> Vec<&LogEntry> {
        self.activity.entries(limit)
    }

    // =========================================================================
    // Processing
    // =========================================================================

    /// Run a board, column or task operation.
    ///
    /// Read results carry `resolvedTags` on every task: the tags that still
    /// exist in the registry, with dangling ids dropped from `tags`.
    pub fn process<O>(&mut self, op: &O) -> Result<Value>
    where
        O: Operation + Execute<AppState, KanbanError>,
    {
        let result = op.execute(&mut self.state);
        let changed = result.is_change();
        if changed {
            self.persist_state();
        }
        let value = self.settle(op, result)?;
        Ok(if changed { value } else { self.resolve_tags(value) })
    }

    /// Run a tag registry operation
    pub fn process_tags<O>(&mut self, op: &O) -> Result<Value>
    where
        O: Operation + Execute<TagRegistry, KanbanError>,
    {
        let result = op.execute(&mut self.tags);
        if result.is_change() {
            self.persist_tags();
        }
        self.settle(op, result)
    }

    fn settle(&mut self, op: &dyn Operation, result: ExecutionResult<Value, KanbanError>) -> Result<Value> {
        let (result, log_entry) = result.split();
        if let Some(entry) = log_entry {
            tracing::info!(op = %entry.op, duration_ms = entry.duration_ms, failed = entry.is_failure(), "operation settled");
            self.activity.record(entry);
        }
        match &result {
            Ok(_) => {
                if let Some(notice) = op.notice() {
                    self.notifier.notify(notice, Severity::Success);
                }
            }
            Err(error) => {
                tracing::debug!(op = %op.op_string(), guard = error.is_guard(), %error, "operation declined");
                self.notifier.notify(&error.to_string(), Severity::Error);
            }
        }
        result
    }

    fn resolve_tags(&self, mut value: Value) -> Value {
        let single_task = value.get("columnId").is_some();
        if let Some(columns) = value.get_mut("tasks").and_then(Value::as_object_mut) {
            columns
                .values_mut()
                .filter_map(Value::as_array_mut)
                .flatten()
                .for_each(|task| self.resolve_task_tags(task));
        } else if single_task {
            self.resolve_task_tags(&mut value);
        }
        value
    }

    fn resolve_task_tags(&self, task: &mut Value) {
        let ids: Vec<TagId> = task
            .get("tags")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_str).map(TagId::from).collect())
            .unwrap_or_default();
        let live: Vec<&Tag> = self.tags.resolve(&ids).collect();
        task["tags"] = json!(live.iter().map(|tag| &tag.id).collect::<Vec<_>>());
        task["resolvedTags"] = json!(live);
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    /// Start dragging a task
    pub fn drag_start(&mut self, id: impl Into<TaskId>) {
        self.drag.start(id);
    }

    /// Drop the dragged task over a column or task id.
    ///
    /// Returns `None` when nothing was being dragged or there was no drop target.
    pub fn drag_end(&mut self, over: Option<&str>) -> Result<Option<Value>> {
        match self.drag.end(over) {
            Some(mv) => self.process(&mv).map(Some),
            None => Ok(None),
        }
    }

    /// Abandon the drag without moving anything
    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    /// The task currently being dragged, if it exists on the active board
    pub fn active_task(&self) -> Option<&Task> {
        let id = self.drag.active_id()?;
        self.state.active_board()?.find_task(id)
    }

    // =========================================================================
    // Persistence (fire and forget)
    // =========================================================================

    fn persist_state(&mut self) {
        let blob = migration::serialize_state(&self.state);
        self.save(BOARDS_KEY, blob);
    }

    fn persist_tags(&mut self) {
        let blob = serde_json::to_string(&self.tags).map_err(KanbanError::from);
        self.save(TAGS_KEY, blob);
    }

    fn save(&mut self, key: &str, blob: Result<String>) {
        match blob.and_then(|blob| self.storage.save(key, &blob)) {
            Ok(()) => tracing::debug!(key, "persisted"),
            Err(error) => tracing::warn!(key, %error, "failed to persist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ArchiveBoard, CreateBoard};
    use crate::notify::CollectingNotifier;
    use crate::storage::MemoryStorage;
    use crate::board::GetBoard;
    use crate::tag::{AddTag, DeleteTag};
    use crate::task::{AddTask, GetTask};
    use crate::types::{BoardId, ColumnId, DEFAULT_BOARD_ID};
    use std::rc::Rc;

    fn open(storage: MemoryStorage) -> (KanbanContext, Rc<CollectingNotifier>) {
        let notifier = Rc::new(CollectingNotifier::new());
        let ctx = KanbanContext::open(storage, Rc::clone(&notifier)).unwrap();
        (ctx, notifier)
    }

    #[test]
    fn test_fresh_open_does_not_write() {
        let (ctx, _) = open(MemoryStorage::new());
        assert_eq!(ctx.state(), &AppState::default());
        assert_eq!(ctx.storage().load(BOARDS_KEY).unwrap(), None);
    }

    #[test]
    fn test_legacy_open_persists_immediately() {
        let storage = MemoryStorage::new()
            .with_entry(LEGACY_TASKS_KEY, r#"{"todo":[{"id":"1","text":"Buy milk"}],"doing":[],"done":[]}"#);
        let (ctx, _) = open(storage);
        let saved = ctx.storage().load(BOARDS_KEY).unwrap().unwrap();
        assert!(saved.contains("Buy milk"));
        assert!(saved.contains("\"schemaVersion\":2"));
    }

    #[test]
    fn test_mutation_persists_and_records_activity() {
        let (mut ctx, _) = open(MemoryStorage::new());
        ctx.process(&AddTask::new("todo", "Buy milk")).unwrap();

        let saved = ctx.storage().load(BOARDS_KEY).unwrap().unwrap();
        assert!(saved.contains("Buy milk"));
        assert_eq!(ctx.activity(None).len(), 1);
        assert_eq!(ctx.activity(None)[0].op, "add task");
    }

    #[test]
    fn test_guard_failure_notifies_error() {
        let (mut ctx, notifier) = open(MemoryStorage::new());
        let result = ctx.process(&ArchiveBoard::new(DEFAULT_BOARD_ID));
        assert!(matches!(result, Err(KanbanError::LastActiveBoard { .. })));

        let seen = notifier.drain();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Error);
        assert!(!ctx.state().boards[0].archived);
        assert_eq!(ctx.storage().load(BOARDS_KEY).unwrap(), None);
    }

    #[test]
    fn test_destructive_success_notifies() {
        let (mut ctx, notifier) = open(MemoryStorage::new());
        ctx.process(&CreateBoard::new("Second")).unwrap();
        ctx.process(&ArchiveBoard::new(DEFAULT_BOARD_ID)).unwrap();

        let seen = notifier.drain();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Success);
    }

    #[test]
    fn test_unreadable_state_falls_back_without_writing() {
        let storage = MemoryStorage::new().with_entry(BOARDS_KEY, "{not json");
        let (ctx, notifier) = open(storage);
        assert_eq!(ctx.state(), &AppState::default());
        assert_eq!(ctx.storage().load(BOARDS_KEY).unwrap().as_deref(), Some("{not json"));
        assert_eq!(notifier.drain()[0].severity, Severity::Warning);
    }

    #[test]
    fn test_newer_schema_refuses_to_open() {
        let storage = MemoryStorage::new().with_entry(BOARDS_KEY, r#"{"schemaVersion":3,"boards":[]}"#);
        let result = KanbanContext::open(storage, CollectingNotifier::new());
        assert!(matches!(result, Err(KanbanError::UnsupportedSchema { .. })));
    }

    #[test]
    fn test_drag_moves_task() {
        let (mut ctx, _) = open(MemoryStorage::new());
        let added = ctx.process(&AddTask::new("todo", "Buy milk")).unwrap();
        let id = added["id"].as_str().unwrap().to_string();

        ctx.drag_start(id.as_str());
        assert_eq!(ctx.active_task().unwrap().text, "Buy milk");
        ctx.drag_end(Some("doing")).unwrap().unwrap();

        let board = ctx.state().active_board().unwrap();
        assert_eq!(board.tasks_in(&ColumnId::from("doing"))[0].id, id.as_str());
        assert!(ctx.drag().active_id().is_none());
        assert!(ctx.active_task().is_none());
    }

    #[test]
    fn test_drag_cancel_leaves_state() {
        let (mut ctx, _) = open(MemoryStorage::new());
        ctx.process(&AddTask::new("todo", "x")).unwrap();
        let before = ctx.state().clone();
        ctx.drag_start("anything");
        ctx.drag_cancel();
        assert!(ctx.drag_end(Some("doing")).unwrap().is_none());
        assert_eq!(ctx.state(), &before);
    }

    #[test]
    fn test_tag_ops_persist_registry() {
        let (mut ctx, _) = open(MemoryStorage::new());
        ctx.process_tags(&AddTag::new("urgent")).unwrap();
        let saved = ctx.storage().load(TAGS_KEY).unwrap().unwrap();
        assert!(saved.contains("urgent"));
        assert_eq!(ctx.tags().len(), 1);
    }

    #[test]
    fn test_activity_limit() {
        let (ctx, _) = open(MemoryStorage::new());
        let mut ctx = ctx.with_activity_limit(2);
        for text in ["a", "b", "c"] {
            ctx.process(&AddTask::new("todo", text)).unwrap();
        }
        let entries = ctx.activity(None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].output["text"], "c");
        assert_eq!(ctx.state().active_board, Some(BoardId::from(DEFAULT_BOARD_ID)));
    }

    #[test]
    fn test_reads_resolve_tags_and_drop_deleted_ones() {
        let (mut ctx, _) = open(MemoryStorage::new());
        let tag = ctx.process_tags(&AddTag::new("bug")).unwrap();
        let tag_id = TagId::from(tag["id"].as_str().unwrap());
        let task = ctx
            .process(&AddTask::new("todo", "Fix login").with_tags(vec![tag_id.clone(), TagId::from("ghost")]))
            .unwrap();
        let task_id = task["id"].as_str().unwrap().to_string();

        let shown = ctx.process(&GetTask::new(task_id.as_str())).unwrap();
        assert_eq!(shown["tags"], json!([tag_id.as_str()]));
        assert_eq!(shown["resolvedTags"][0]["label"], "bug");
        assert_eq!(shown["resolvedTags"].as_array().unwrap().len(), 1);

        ctx.process_tags(&DeleteTag::new(tag_id.clone())).unwrap();

        let shown = ctx.process(&GetTask::new(task_id.as_str())).unwrap();
        assert_eq!(shown["tags"], json!([]));
        assert_eq!(shown["resolvedTags"], json!([]));
        let board = ctx.process(&GetBoard::active()).unwrap();
        assert_eq!(board["tasks"]["todo"][0]["resolvedTags"], json!([]));
        assert_eq!(board["tasks"]["todo"][0]["tags"], json!([]));
        // stored task keeps the raw ids
        assert_eq!(ctx.state().active_board().unwrap().tasks[&ColumnId::from("todo")][0].tags.len(), 2);
    }
}
