//! Rendering of operation results
//!
//! Engine results are JSON values. JSON and YAML print them as they are; the
//! table format recognizes the common shapes (a board, board and tag lists, a
//! task, activity) and falls back to a field/value table for anything else.

use crate::cli::OutputFormat;
use anyhow::Result;
use chrono::{DateTime, Local};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::{Map, Value};

/// Render a result in the requested format
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
        OutputFormat::Table => render_table(value),
    })
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) if items.iter().all(|item| item.get("op").is_some()) => {
            activity_table(items).to_string()
        }
        Value::Array(items) => items
            .iter()
            .map(render_table)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(fields) => {
            if let Some(reason) = fields.get("reason").filter(|_| is_ignored(fields)) {
                return format!("Nothing to do: {}", text(reason));
            }
            if let Some(Value::Array(boards)) = fields.get("boards") {
                return with_count(boards_table(boards), boards.len(), "board");
            }
            if let Some(Value::Array(tags)) = fields.get("tags") {
                return with_count(tags_table(tags), tags.len(), "tag");
            }
            if fields.contains_key("columns") && fields.contains_key("tasks") {
                return board_view(fields);
            }
            fields_table(fields).to_string()
        }
        other => text(other),
    }
}

fn is_ignored(fields: &Map<String, Value>) -> bool {
    fields.get("ignored").and_then(Value::as_bool).unwrap_or(false)
}

fn with_count(table: Table, count: usize, noun: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{table}\n{count} {noun}{plural}")
}

fn new_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Plain text for a JSON scalar, compact JSON for anything nested
fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Array(items) if items.iter().all(|item| item.get("label").is_some()) => items
            .iter()
            .map(|item| field(item, "label"))
            .collect::<Vec<_>>()
            .join(", "),
        nested => nested.to_string(),
    }
}

fn field(value: &Value, key: &str) -> String {
    value.get(key).map(text).unwrap_or_default()
}

fn boards_table(boards: &[Value]) -> Table {
    let mut table = new_table(vec!["Id", "Title", "Type", "Category", "Archived"]);
    for board in boards {
        table.add_row(vec![
            field(board, "id"),
            field(board, "title"),
            field(board, "type"),
            field(board, "category"),
            field(board, "archived"),
        ]);
    }
    table
}

fn tags_table(tags: &[Value]) -> Table {
    let mut table = new_table(vec!["Id", "Label", "Color"]);
    for tag in tags {
        table.add_row(vec![field(tag, "id"), field(tag, "label"), field(tag, "color")]);
    }
    table
}

fn activity_table(entries: &[Value]) -> Table {
    let mut table = new_table(vec!["When", "Operation", "Result", "Duration (ms)"]);
    for entry in entries {
        let when = entry
            .get("timestamp")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| field(entry, "timestamp"));
        let result = match entry.get("output").and_then(|out| out.get("error")) {
            Some(error) => format!("failed: {}", text(error)),
            None => "ok".to_string(),
        };
        table.add_row(vec![when, field(entry, "op"), result, field(entry, "durationMs")]);
    }
    table
}

fn fields_table(fields: &Map<String, Value>) -> Table {
    let mut table = new_table(vec!["Field", "Value"]);
    for (key, value) in fields {
        table.add_row(vec![key.clone(), text(value)]);
    }
    table
}

/// Columns side by side, one task per cell, with the board's header above
fn board_view(board: &Map<String, Value>) -> String {
    let columns = board
        .get("columns")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let tasks = board.get("tasks").and_then(Value::as_object);

    let lists: Vec<Vec<Value>> = columns
        .iter()
        .map(|column| {
            let id = field(column, "id");
            tasks
                .and_then(|tasks| tasks.get(&id))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        })
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            columns
                .iter()
                .zip(&lists)
                .map(|(column, list)| Cell::new(format!("{} ({})", field(column, "title"), list.len())))
                .collect::<Vec<_>>(),
        );

    let depth = lists.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            lists
                .iter()
                .map(|list| list.get(row).map(task_cell).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }

    let mut header = board.get("title").map(text).unwrap_or_default();
    if let Some(category) = board.get("category").map(text).filter(|c| !c.is_empty()) {
        header.push_str(&format!(" [{category}]"));
    }
    if board.get("archived").and_then(Value::as_bool).unwrap_or(false) {
        header.push_str(" (archived)");
    }
    format!("{header}\n{table}")
}

fn task_cell(task: &Value) -> String {
    let mut cell = format!("{}\n{} · {}", field(task, "text"), field(task, "priority"), field(task, "id"));
    let deadline = field(task, "deadline");
    if !deadline.is_empty() {
        cell.push_str(&format!("\ndue {deadline}"));
    }
    let labels = field(task, "resolvedTags");
    if !labels.is_empty() {
        cell.push_str(&format!("\n[{labels}]"));
    }
    cell
}
