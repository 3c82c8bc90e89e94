//! Forgiving JSON input for kanban operations
//!
//! Accepts several shapes and normalizes them to a [`Command`]:
//!
//! - `{"op": "move task", "id": "...", "over": "doing"}`
//! - `{"verb": "move", "noun": "task", ...}`
//! - `{"move": "task", ...}`
//!
//! Verbs and nouns have aliases (`create` = `add`, `card` = `task`, ...),
//! keys may be snake_case, and a few parameter aliases are resolved.

use crate::board::{
    ArchiveBoard, CreateBoard, DeleteBoard, GetBoard, ListBoards, SelectBoard, UnarchiveBoard,
    UpdateBoard,
};
use crate::column::{AddColumn, DeleteColumn, UpdateColumn};
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::tag::{AddTag, DeleteTag, GetTag, ListTags, UpdateTag};
use crate::task::{AddTask, ClearCompleted, DeleteTask, GetTask, MoveTask, UpdateTask};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Any operation the engine understands
#[derive(Debug, Clone)]
pub enum Command {
    SelectBoard(SelectBoard),
    CreateBoard(CreateBoard),
    DeleteBoard(DeleteBoard),
    ArchiveBoard(ArchiveBoard),
    UnarchiveBoard(UnarchiveBoard),
    UpdateBoard(UpdateBoard),
    GetBoard(GetBoard),
    ListBoards(ListBoards),
    AddColumn(AddColumn),
    UpdateColumn(UpdateColumn),
    DeleteColumn(DeleteColumn),
    AddTask(AddTask),
    UpdateTask(UpdateTask),
    DeleteTask(DeleteTask),
    ClearCompleted(ClearCompleted),
    MoveTask(MoveTask),
    GetTask(GetTask),
    AddTag(AddTag),
    UpdateTag(UpdateTag),
    DeleteTag(DeleteTag),
    GetTag(GetTag),
    ListTags(ListTags),
}

impl Command {
    /// Run the command against a context
    pub fn run(&self, ctx: &mut KanbanContext) -> Result<Value> {
        match self {
            Self::SelectBoard(op) => ctx.process(op),
            Self::CreateBoard(op) => ctx.process(op),
            Self::DeleteBoard(op) => ctx.process(op),
            Self::ArchiveBoard(op) => ctx.process(op),
            Self::UnarchiveBoard(op) => ctx.process(op),
            Self::UpdateBoard(op) => ctx.process(op),
            Self::GetBoard(op) => ctx.process(op),
            Self::ListBoards(op) => ctx.process(op),
            Self::AddColumn(op) => ctx.process(op),
            Self::UpdateColumn(op) => ctx.process(op),
            Self::DeleteColumn(op) => ctx.process(op),
            Self::AddTask(op) => ctx.process(op),
            Self::UpdateTask(op) => ctx.process(op),
            Self::DeleteTask(op) => ctx.process(op),
            Self::ClearCompleted(op) => ctx.process(op),
            Self::MoveTask(op) => ctx.process(op),
            Self::GetTask(op) => ctx.process(op),
            Self::AddTag(op) => ctx.process_tags(op),
            Self::UpdateTag(op) => ctx.process_tags(op),
            Self::DeleteTag(op) => ctx.process_tags(op),
            Self::GetTag(op) => ctx.process_tags(op),
            Self::ListTags(op) => ctx.process_tags(op),
        }
    }
}

/// Parse input JSON into one command, or a batch from an array
pub fn parse_input(input: Value) -> Result<Vec<Command>> {
    match input {
        Value::Array(items) => items.into_iter().map(parse_command).collect(),
        Value::Object(_) => Ok(vec![parse_command(input)?]),
        _ => Err(KanbanError::invalid_value("input", "must be an object or array")),
    }
}

/// Parse a single command object
pub fn parse_command(input: Value) -> Result<Command> {
    let Value::Object(obj) = input else {
        return Err(KanbanError::invalid_value("input", "operation must be an object"));
    };
    let (verb, noun, mut params) = extract_operation(&obj)?;
    normalize_params(&mut params);
    build(verb, noun, params)
}

/// Parse and run everything in `input`, stopping at the first failure
pub fn dispatch(ctx: &mut KanbanContext, input: Value) -> Result<Value> {
    let batch = input.is_array();
    let commands = parse_input(input)?;
    let mut results = Vec::with_capacity(commands.len());
    for command in &commands {
        results.push(command.run(ctx)?);
    }
    if batch {
        Ok(Value::Array(results))
    } else {
        Ok(results.pop().unwrap_or(Value::Null))
    }
}

fn canonical_verb(s: &str) -> Option<&'static str> {
    Some(match s.trim().to_lowercase().as_str() {
        "add" | "create" | "new" => "add",
        "update" | "edit" | "set" | "rename" => "update",
        "delete" | "remove" | "rm" => "delete",
        "get" | "show" | "read" => "get",
        "list" | "ls" => "list",
        "move" | "mv" | "drop" => "move",
        "select" | "switch" | "open" => "select",
        "archive" => "archive",
        "unarchive" | "restore" => "unarchive",
        "clear" => "clear",
        _ => return None,
    })
}

fn canonical_noun(s: &str) -> Option<&'static str> {
    Some(match s.trim().to_lowercase().as_str() {
        "board" | "boards" => "board",
        "column" | "columns" | "col" => "column",
        "task" | "tasks" | "card" | "cards" => "task",
        "tag" | "tags" => "tag",
        _ => return None,
    })
}

type Extracted = (&'static str, &'static str, Map<String, Value>);

fn extract_operation(obj: &Map<String, Value>) -> Result<Extracted> {
    let without = |skip: &[&str]| -> Map<String, Value> {
        obj.iter()
            .filter(|(k, _)| !skip.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    };

    // "op": "verb noun"
    if let Some(op) = obj.get("op").or_else(|| obj.get("operation")).and_then(Value::as_str) {
        let mut parts = op.split_whitespace();
        if let (Some(verb), Some(noun), None) = (parts.next(), parts.next(), parts.next()) {
            if let (Some(verb), Some(noun)) = (canonical_verb(verb), canonical_noun(noun)) {
                return Ok((verb, noun, without(&["op", "operation"])));
            }
        }
        return Err(KanbanError::invalid_value("op", format!("unknown operation '{op}'")));
    }

    // "verb" + "noun"
    let verb = obj.get("verb").and_then(Value::as_str).and_then(canonical_verb);
    let noun = obj.get("noun").and_then(Value::as_str).and_then(canonical_noun);
    if let (Some(verb), Some(noun)) = (verb, noun) {
        return Ok((verb, noun, without(&["verb", "noun"])));
    }

    // {"add": "task", ...}
    for (key, value) in obj {
        let noun = value.as_str().and_then(canonical_noun);
        if let (Some(verb), Some(noun)) = (canonical_verb(key), noun) {
            return Ok((verb, noun, without(&[key.as_str()])));
        }
    }

    Err(KanbanError::invalid_value("op", "cannot determine operation from input"))
}

/// Resolve key aliases and convert snake_case keys to camelCase
fn normalize_params(params: &mut Map<String, Value>) {
    let keys: Vec<String> = params.keys().cloned().collect();
    for key in keys {
        let camel = to_camel_case(&key);
        if camel != key && !params.contains_key(&camel) {
            if let Some(value) = params.remove(&key) {
                params.insert(camel, value);
            }
        }
    }

    let aliases: &[(&[&str], &str)] = &[
        (&["taskId", "tagId"], "id"),
        (&["column", "col"], "columnId"),
        (&["board"], "boardId"),
        (&["desc", "body"], "description"),
        (&["to", "target"], "over"),
    ];
    for (from_keys, to_key) in aliases {
        for from_key in *from_keys {
            if params.contains_key(*to_key) {
                break;
            }
            if let Some(value) = params.remove(*from_key) {
                params.insert(to_key.to_string(), value);
            }
        }
    }
}

fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper = false;
    for c in s.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn from_params<T: DeserializeOwned>(params: Map<String, Value>) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(params))?)
}

fn build(verb: &str, noun: &str, params: Map<String, Value>) -> Result<Command> {
    Ok(match (verb, noun) {
        ("select", "board") => Command::SelectBoard(from_params(params)?),
        ("add", "board") => Command::CreateBoard(from_params(params)?),
        ("delete", "board") => Command::DeleteBoard(from_params(params)?),
        ("archive", "board") => Command::ArchiveBoard(from_params(params)?),
        ("unarchive", "board") => Command::UnarchiveBoard(from_params(params)?),
        ("update", "board") => Command::UpdateBoard(from_params(params)?),
        ("get", "board") => Command::GetBoard(from_params(params)?),
        ("list", "board") => Command::ListBoards(from_params(params)?),
        ("add", "column") => Command::AddColumn(from_params(params)?),
        ("update", "column") => Command::UpdateColumn(from_params(params)?),
        ("delete", "column") => Command::DeleteColumn(from_params(params)?),
        ("add", "task") => Command::AddTask(from_params(params)?),
        ("update", "task") => Command::UpdateTask(from_params(params)?),
        ("delete", "task") => Command::DeleteTask(from_params(params)?),
        ("clear", "task") => Command::ClearCompleted(from_params(params)?),
        ("move", "task") => Command::MoveTask(from_params(params)?),
        ("get", "task") => Command::GetTask(from_params(params)?),
        ("add", "tag") => Command::AddTag(from_params(params)?),
        ("update", "tag") => Command::UpdateTag(from_params(params)?),
        ("delete", "tag") => Command::DeleteTag(from_params(params)?),
        ("get", "tag") => Command::GetTag(from_params(params)?),
        ("list", "tag") => Command::ListTags(from_params(params)?),
        (verb, noun) => {
            return Err(KanbanError::invalid_value(
                "op",
                format!("'{verb} {noun}' is not supported"),
            ))
        }
    })
}
