//! Translate parsed command lines into engine operations and run them

use crate::cli::{BoardCommand, BoardSelector, ColumnCommand, Commands, TagCommand, TaskCommand};
use crate::config::KanbanConfig;
use anyhow::{bail, Context, Result};
use kanban_engine::{
    board::{
        ArchiveBoard, CreateBoard, DeleteBoard, GetBoard, ListBoards, SelectBoard, UnarchiveBoard,
        UpdateBoard,
    },
    column::{AddColumn, DeleteColumn, UpdateColumn},
    dispatch,
    tag::{AddTag, DeleteTag, GetTag, ListTags, UpdateTag},
    task::{AddTask, ClearCompleted, DeleteTask, GetTask, MoveTask, UpdateTask},
    BoardId, BoardType, ColumnId, Command, FileStorage, KanbanContext, Priority, TagId, TaskId,
    TracingNotifier,
};
use serde_json::Value;
use std::io::Read;

/// Open the store named by the configuration
pub fn open_context(config: &KanbanConfig) -> Result<KanbanContext> {
    tracing::debug!(data_dir = %config.data_dir.display(), "opening board store");
    let ctx = KanbanContext::open(FileStorage::new(&config.data_dir), TracingNotifier)
        .with_context(|| format!("Failed to open boards in {}", config.data_dir.display()))?;
    Ok(ctx.with_activity_limit(config.activity_limit))
}

/// Run a command and return the value to print
pub fn execute(command: &Commands, ctx: &mut KanbanContext, config: &KanbanConfig) -> Result<Value> {
    match command {
        Commands::Apply { input, activity } => {
            let raw = read_input(input)?;
            let parsed: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
            let results = dispatch(ctx, parsed)?;
            if *activity {
                let entries = ctx
                    .activity(None)
                    .into_iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(entries))
            } else {
                Ok(results)
            }
        }
        other => {
            let op = to_engine_command(other, ctx, config)?;
            Ok(op.run(ctx)?)
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

/// Build the engine command for everything except `apply`
pub fn to_engine_command(
    command: &Commands,
    ctx: &KanbanContext,
    config: &KanbanConfig,
) -> Result<Command> {
    Ok(match command {
        Commands::Show => Command::GetBoard(GetBoard::active()),
        Commands::Board { action } => board_command(action, config)?,
        Commands::Column { action } => column_command(action, ctx)?,
        Commands::Task { action } => task_command(action, ctx)?,
        Commands::Tag { action } => tag_command(action),
        Commands::Apply { .. } => bail!("apply is not a single operation"),
    })
}

fn board_command(action: &BoardCommand, config: &KanbanConfig) -> Result<Command> {
    Ok(match action {
        BoardCommand::Create {
            title,
            description,
            board_type,
            category,
        } => {
            let mut op = CreateBoard::new(title.as_str())
                .with_category(category.as_deref().unwrap_or(&config.default_category));
            if let Some(description) = description {
                op = op.with_description(description.as_str());
            }
            if let Some(board_type) = board_type {
                op = op.with_type(board_type.parse::<BoardType>()?);
            }
            Command::CreateBoard(op)
        }
        BoardCommand::List { archived, active } => {
            let mut op = ListBoards::new();
            if *archived {
                op = op.with_archived(true);
            } else if *active {
                op = op.with_archived(false);
            }
            Command::ListBoards(op)
        }
        BoardCommand::Show { id } => Command::GetBoard(match id {
            Some(id) => GetBoard::new(id.as_str()),
            None => GetBoard::active(),
        }),
        BoardCommand::Select { id } => Command::SelectBoard(SelectBoard::new(id.as_str())),
        BoardCommand::Edit {
            id,
            title,
            description,
            board_type,
            category,
        } => {
            let mut op = UpdateBoard::new(id.as_str());
            if let Some(title) = title {
                op = op.with_title(title.as_str());
            }
            if let Some(description) = description {
                op = op.with_description(description.as_str());
            }
            if let Some(board_type) = board_type {
                op = op.with_type(board_type.parse::<BoardType>()?);
            }
            if let Some(category) = category {
                op = op.with_category(category.as_str());
            }
            Command::UpdateBoard(op)
        }
        BoardCommand::Archive { id } => Command::ArchiveBoard(ArchiveBoard::new(id.as_str())),
        BoardCommand::Unarchive { id } => Command::UnarchiveBoard(UnarchiveBoard::new(id.as_str())),
        BoardCommand::Delete { id } => Command::DeleteBoard(DeleteBoard::new(id.as_str())),
    })
}

/// The board named with `--board`, else the active one
fn target_board(selector: &BoardSelector, ctx: &KanbanContext) -> Result<BoardId> {
    match (&selector.board, &ctx.state().active_board) {
        (Some(id), _) => Ok(BoardId::from(id.as_str())),
        (None, Some(active)) => Ok(active.clone()),
        (None, None) => bail!("No active board; pass --board"),
    }
}

fn column_command(action: &ColumnCommand, ctx: &KanbanContext) -> Result<Command> {
    Ok(match action {
        ColumnCommand::Add { title, color, board } => {
            let mut op = AddColumn::new(target_board(board, ctx)?, title.as_str());
            if let Some(color) = color {
                op = op.with_color(color.as_str());
            }
            Command::AddColumn(op)
        }
        ColumnCommand::Edit {
            id,
            title,
            color,
            board,
        } => {
            let mut op = UpdateColumn::new(target_board(board, ctx)?, id.as_str(), title.as_str());
            if let Some(color) = color {
                op = op.with_color(color.as_str());
            }
            Command::UpdateColumn(op)
        }
        ColumnCommand::Delete { id, board } => {
            Command::DeleteColumn(DeleteColumn::new(target_board(board, ctx)?, id.as_str()))
        }
    })
}

/// The column holding a task on the active board.
///
/// An unknown task resolves to an empty column id, which the engine treats as
/// a stale reference and ignores.
fn column_of(id: &str, given: Option<&str>, ctx: &KanbanContext) -> ColumnId {
    if let Some(column) = given {
        return ColumnId::from(column);
    }
    ctx.state()
        .active_board()
        .and_then(|board| board.column_of_task(&TaskId::from(id)))
        .cloned()
        .unwrap_or_else(|| ColumnId::from(""))
}

fn tag_ids(tags: &[String]) -> Vec<TagId> {
    tags.iter().map(|tag| TagId::from(tag.as_str())).collect()
}

fn task_command(action: &TaskCommand, ctx: &KanbanContext) -> Result<Command> {
    Ok(match action {
        TaskCommand::Add {
            text,
            column,
            priority,
            deadline,
            description,
            tags,
        } => {
            let mut op = AddTask::new(column.as_str(), text.as_str()).with_tags(tag_ids(tags));
            if let Some(priority) = priority {
                op = op.with_priority(priority.parse::<Priority>()?);
            }
            if let Some(deadline) = deadline {
                op = op.with_deadline(deadline.as_str());
            }
            if let Some(description) = description {
                op = op.with_description(description.as_str());
            }
            Command::AddTask(op)
        }
        TaskCommand::Edit {
            id,
            column,
            text,
            priority,
            deadline,
            description,
            tags,
            clear_completed,
        } => {
            let mut op = UpdateTask::new(column_of(id, column.as_deref(), ctx), id.as_str());
            if let Some(text) = text {
                op = op.with_text(text.as_str());
            }
            if let Some(priority) = priority {
                op = op.with_priority(priority.parse::<Priority>()?);
            }
            if let Some(deadline) = deadline {
                op = op.with_deadline(deadline.as_str());
            }
            if let Some(description) = description {
                op = op.with_description(description.as_str());
            }
            if let Some(tags) = tags {
                op = op.with_tags(tag_ids(tags));
            }
            if *clear_completed {
                op = op.clear_completed_at();
            }
            Command::UpdateTask(op)
        }
        TaskCommand::Delete { id, column } => {
            Command::DeleteTask(DeleteTask::new(column_of(id, column.as_deref(), ctx), id.as_str()))
        }
        TaskCommand::Move { id, over } => Command::MoveTask(MoveTask::new(id.as_str(), over.as_str())),
        TaskCommand::Show { id } => Command::GetTask(GetTask::new(id.as_str())),
        TaskCommand::Clear { column } => {
            Command::ClearCompleted(ClearCompleted::in_column(column.as_str()))
        }
    })
}

fn tag_command(action: &TagCommand) -> Command {
    match action {
        TagCommand::Add { label, color } => {
            let mut op = AddTag::new(label.as_str());
            if let Some(color) = color {
                op = op.with_color(color.as_str());
            }
            Command::AddTag(op)
        }
        TagCommand::Edit { id, label, color } => {
            let mut op = UpdateTag::new(id.as_str());
            if let Some(label) = label {
                op = op.with_label(label.as_str());
            }
            if let Some(color) = color {
                op = op.with_color(color.as_str());
            }
            Command::UpdateTag(op)
        }
        TagCommand::Delete { id } => Command::DeleteTag(DeleteTag::new(id.as_str())),
        TagCommand::Show { id } => Command::GetTag(GetTag::new(id.as_str())),
        TagCommand::List { filter } => Command::ListTags(match filter {
            Some(filter) => ListTags::new().with_filter(filter.as_str()),
            None => ListTags::new(),
        }),
    }
}
