//! Schema migration for persisted board state.
//!
//! Persisted blobs come in three shapes:
//!
//! 1. **Legacy flat map** under `kanban-tasks`: `{"todo": [...], "doing": [...], "done": [...]}`.
//! 2. **Unversioned multi-board** under `kanban-boards`: boards that may lack
//!    `type`, `category`, `archived` or `columns`.
//! 3. **Current** (`schemaVersion: 2`): everything explicit.
//!
//! Migration works on `serde_json::Value` so that missing or malformed fields
//! can be repaired before the typed model sees them. Each step is a pure
//! transform, and migrating already-current data reproduces it byte for byte.

use crate::auto_color::{auto_color, FALLBACK_COLUMN_COLOR};
use crate::error::{KanbanError, Result};
use crate::types::{
    AppState, BoardType, Column, TagRegistry, CURRENT_SCHEMA_VERSION, DEFAULT_BOARD_ID,
    DEFAULT_BOARD_TITLE, DEFAULT_CATEGORY, FIXED_COLUMN_COUNT,
};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Where migrated state came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationSource {
    /// The current-format blob (possibly unversioned)
    Current,
    /// The legacy flat task map, wrapped into a default board
    Legacy,
    /// Nothing stored; default state synthesized
    Fresh,
}

/// Result of migrating persisted state
#[derive(Debug, Clone)]
pub struct Migration {
    pub state: AppState,
    pub source: MigrationSource,
    /// Whether the serialized state differs from what was stored under the
    /// current key (and so should be written back)
    pub rewritten: bool,
}

/// Serialize board state exactly the way it is persisted
pub fn serialize_state(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Produce a valid current-version state from the stored blobs.
///
/// `current` is the blob under `kanban-boards`, `legacy` the one under
/// `kanban-tasks`. The legacy blob is only consulted when there is no current one.
pub fn migrate(current: Option<&str>, legacy: Option<&str>) -> Result<Migration> {
    if let Some(raw) = current {
        let mut root: Value = serde_json::from_str(raw)?;
        upgrade_state(&mut root)?;
        let state = into_state(root)?;
        let rewritten = serialize_state(&state)? != raw;
        tracing::debug!(rewritten, boards = state.boards.len(), "migrated current state");
        return Ok(Migration {
            state,
            source: MigrationSource::Current,
            rewritten,
        });
    }

    if let Some(raw) = legacy {
        let tasks: Value = serde_json::from_str(raw)?;
        let mut root = wrap_legacy(tasks)?;
        upgrade_state(&mut root)?;
        let state = into_state(root)?;
        tracing::info!(
            tasks = state.boards[0].task_count(),
            "migrated legacy task map into '{}'",
            DEFAULT_BOARD_TITLE
        );
        return Ok(Migration {
            state,
            source: MigrationSource::Legacy,
            rewritten: true,
        });
    }

    Ok(Migration {
        state: AppState::default(),
        source: MigrationSource::Fresh,
        rewritten: true,
    })
}

/// Parse the tag registry blob, backfilling missing colors
pub fn migrate_tags(raw: Option<&str>) -> Result<TagRegistry> {
    let Some(raw) = raw else {
        return Ok(TagRegistry::new());
    };
    let mut tags: Value = serde_json::from_str(raw)?;
    let Some(list) = tags.as_array_mut() else {
        return Err(KanbanError::invalid_value("tags", "expected an array"));
    };
    list.retain(Value::is_object);
    for tag in list.iter_mut().filter_map(Value::as_object_mut) {
        let label = tag
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if !tag.get("id").is_some_and(Value::is_string) {
            tag.insert("id".into(), json!(ulid::Ulid::new().to_string()));
        }
        if !tag.get("color").is_some_and(Value::is_string) {
            tag.insert("color".into(), json!(auto_color(&label)));
        }
        tag.insert("label".into(), json!(label));
    }
    Ok(serde_json::from_value(tags)?)
}

/// Rule 1: wrap a flat `{column: [task]}` map into a single default board
fn wrap_legacy(tasks: Value) -> Result<Value> {
    if !tasks.is_object() {
        return Err(KanbanError::invalid_value(
            "kanban-tasks",
            "expected an object of task lists",
        ));
    }
    Ok(json!({
        "boards": [{
            "id": DEFAULT_BOARD_ID,
            "title": DEFAULT_BOARD_TITLE,
            "tasks": tasks,
        }],
        "activeBoard": DEFAULT_BOARD_ID,
    }))
}

/// Rule 2: backfill and repair a multi-board state in place
fn upgrade_state(root: &mut Value) -> Result<()> {
    let Some(obj) = root.as_object_mut() else {
        return Err(KanbanError::invalid_value("kanban-boards", "expected an object"));
    };

    let version = obj
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .unwrap_or(1);
    if version > CURRENT_SCHEMA_VERSION {
        return Err(KanbanError::UnsupportedSchema {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    if !obj.get("boards").is_some_and(Value::is_array) {
        obj.insert("boards".into(), json!([]));
    }
    if let Some(boards) = obj.get_mut("boards").and_then(Value::as_array_mut) {
        boards.retain(Value::is_object);
        for board in boards.iter_mut().filter_map(Value::as_object_mut) {
            upgrade_board(board);
        }
        // Rule 3 also covers a blob that exists but holds no boards
        if boards.is_empty() {
            boards.push(serde_json::to_value(AppState::default().boards.remove(0))?);
        }
    }

    // Repointed by repair_active once the state is typed
    if !obj.get("activeBoard").is_none_or(Value::is_string) {
        obj.remove("activeBoard");
    }
    obj.insert("schemaVersion".into(), json!(CURRENT_SCHEMA_VERSION));
    Ok(())
}

fn upgrade_board(board: &mut Map<String, Value>) {
    if !board.get("id").is_some_and(Value::is_string) {
        board.insert("id".into(), json!(ulid::Ulid::new().to_string()));
    }
    if !board.get("title").is_some_and(Value::is_string) {
        board.insert("title".into(), json!("Untitled Board"));
    }
    if !board.get("description").is_none_or(Value::is_string) {
        board.remove("description");
    }
    if !matches!(board.get("type").and_then(Value::as_str), Some("standard" | "advanced")) {
        board.insert("type".into(), json!(BoardType::Advanced.as_str()));
    }
    if !board.get("category").is_some_and(Value::is_string) {
        board.insert("category".into(), json!(DEFAULT_CATEGORY));
    }
    if !board.get("archived").is_some_and(Value::is_boolean) {
        board.insert("archived".into(), json!(false));
    }
    if !board.get("columns").is_some_and(Value::is_array) {
        let fixed = Column::fixed_columns()
            .into_iter()
            .map(|c| json!({ "id": c.id, "title": c.title, "color": c.color }))
            .collect();
        board.insert("columns".into(), Value::Array(fixed));
    }
    if !board.get("tasks").is_some_and(Value::is_object) {
        board.insert("tasks".into(), json!({}));
    }

    let mut columns = match board.remove("columns") {
        Some(Value::Array(columns)) => columns,
        _ => Vec::new(),
    };
    let mut tasks = match board.remove("tasks") {
        Some(Value::Object(tasks)) => tasks,
        _ => Map::new(),
    };

    upgrade_columns(&mut columns);
    let mut known: HashSet<String> = columns
        .iter()
        .filter_map(|c| c.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    // Task lists with no column get one, so no task is dropped
    for key in tasks.keys() {
        if known.insert(key.clone()) {
            columns.push(json!({ "id": key, "title": key, "color": FALLBACK_COLUMN_COLOR }));
        }
    }
    for id in &known {
        tasks.entry(id.clone()).or_insert_with(|| json!([]));
    }
    for (column, list) in tasks.iter_mut() {
        upgrade_task_list(column, list);
    }

    let standard = board.get("type").and_then(Value::as_str) == Some("standard");
    if standard && columns.len() > FIXED_COLUMN_COUNT {
        board.insert("type".into(), json!(BoardType::Advanced.as_str()));
    }

    board.insert("columns".into(), Value::Array(columns));
    board.insert("tasks".into(), Value::Object(tasks));
}

fn upgrade_columns(columns: &mut Vec<Value>) {
    let mut seen = HashSet::new();
    columns.retain(|c| {
        c.get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| seen.insert(id.to_string()))
    });
    for column in columns.iter_mut().filter_map(Value::as_object_mut) {
        if !column.get("title").is_some_and(Value::is_string) {
            let id = column.get("id").cloned().unwrap_or(Value::Null);
            column.insert("title".into(), id);
        }
        if !column.get("color").is_some_and(Value::is_string) {
            column.insert("color".into(), json!(FALLBACK_COLUMN_COLOR));
        }
    }
}

fn upgrade_task_list(column: &str, list: &mut Value) {
    let Some(items) = list.as_array_mut() else {
        *list = json!([]);
        return;
    };
    items.retain(Value::is_object);
    for task in items.iter_mut().filter_map(Value::as_object_mut) {
        task.insert("columnId".into(), json!(column));
        match task.get("id") {
            Some(Value::String(_)) => {}
            // The original app used numeric timestamps in places
            Some(Value::Number(n)) => {
                let id = n.to_string();
                task.insert("id".into(), json!(id));
            }
            _ => {
                task.insert("id".into(), json!(ulid::Ulid::new().to_string()));
            }
        }
        if !task.get("text").is_some_and(Value::is_string) {
            task.insert("text".into(), json!(""));
        }
        if !matches!(
            task.get("priority").and_then(Value::as_str),
            Some("low" | "medium" | "high")
        ) {
            task.insert("priority".into(), json!("medium"));
        }
        if !task.get("tags").is_some_and(Value::is_array) {
            task.insert("tags".into(), json!([]));
        }
        if let Some(Value::Array(tags)) = task.get_mut("tags") {
            tags.retain(Value::is_string);
        }
        for optional in ["deadline", "description"] {
            if !task.get(optional).is_none_or(Value::is_string) {
                task.remove(optional);
            }
        }
        let completed_ok = task
            .get("completedAt")
            .and_then(Value::as_str)
            .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok());
        if !completed_ok {
            task.remove("completedAt");
        }
    }
}

fn into_state(root: Value) -> Result<AppState> {
    let mut state: AppState = serde_json::from_value(root)?;
    state.repair_active();
    debug_assert!(state.is_consistent());
    Ok(state)
}
