use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(version)]
#[command(about = "Manage kanban boards, columns, tasks and tags from the terminal")]
#[command(long_about = "
kanban keeps boards, columns, tasks and tags in a small file-backed store.
Every change goes through the same operations a graphical front end would
use, so guards and migrations behave the same way.

Global arguments can be used with any command to control output and behavior:
  --verbose     Show detailed information and trace output
  --format      Set output format (table, json, yaml)
  --debug       Enable debug logging
  --quiet       Suppress all output except errors
  --data-dir    Use a different store directory

Example usage:
  kanban show                                  # Show the active board
  kanban task add \"Buy milk\"                   # Add a task to todo
  kanban task move <TASK_ID> doing             # Drop a task on a column
  kanban --format=json board list              # List boards as JSON
  kanban apply ops.json                        # Apply JSON operations
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Global output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Directory holding the board and tag files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the active board with its columns and tasks
    Show,
    /// Manage boards
    Board {
        #[command(subcommand)]
        action: BoardCommand,
    },
    /// Manage the columns of a board
    Column {
        #[command(subcommand)]
        action: ColumnCommand,
    },
    /// Manage tasks on the active board
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Manage the global tag registry
    Tag {
        #[command(subcommand)]
        action: TagCommand,
    },
    /// Apply JSON operations from a file or stdin
    #[command(long_about = "
Apply one operation or an array of operations written as JSON.

Operations can name themselves with an op string, a verb and noun pair, or a
shorthand key:
  {\"op\": \"add task\", \"column\": \"todo\", \"text\": \"Buy milk\"}
  {\"verb\": \"move\", \"noun\": \"task\", \"id\": \"...\", \"over\": \"doing\"}
  {\"add\": \"tag\", \"label\": \"bug\"}

An array runs in order and prints an array of results.
")]
    Apply {
        /// JSON file to read, or '-' for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Print the activity recorded while applying instead of the results
        #[arg(long)]
        activity: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum BoardCommand {
    /// Create a board and make it active
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// standard (three fixed columns) or advanced
        #[arg(long = "type", value_name = "TYPE")]
        board_type: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List boards
    List {
        /// Only archived boards
        #[arg(long, conflicts_with = "active")]
        archived: bool,
        /// Only boards that are not archived
        #[arg(long)]
        active: bool,
    },
    /// Show a board (the active one by default)
    Show { id: Option<String> },
    /// Make a board active
    Select { id: String },
    /// Change title, description, type or category
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// An empty string clears the description
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type", value_name = "TYPE")]
        board_type: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Archive a board
    Archive { id: String },
    /// Restore an archived board
    Unarchive { id: String },
    /// Delete a board with all of its tasks
    Delete { id: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct BoardSelector {
    /// Board to act on (the active board by default)
    #[arg(long)]
    pub board: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommand {
    /// Add a column to an advanced board
    Add {
        title: String,
        #[arg(long)]
        color: Option<String>,
        #[command(flatten)]
        board: BoardSelector,
    },
    /// Rename or recolor a column
    Edit {
        id: String,
        title: String,
        #[arg(long)]
        color: Option<String>,
        #[command(flatten)]
        board: BoardSelector,
    },
    /// Delete a column and every task in it
    Delete {
        id: String,
        #[command(flatten)]
        board: BoardSelector,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task to a column
    Add {
        text: String,
        /// Column to add to
        #[arg(long, default_value = "todo")]
        column: String,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Tag id, repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Edit a task in place
    Edit {
        id: String,
        /// Column holding the task (looked up when omitted)
        #[arg(long)]
        column: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Due date, YYYY-MM-DD; an empty string clears it
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replace the tags, repeatable
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        /// Forget when the task was completed
        #[arg(long)]
        clear_completed: bool,
    },
    /// Delete a task
    Delete {
        id: String,
        #[arg(long)]
        column: Option<String>,
    },
    /// Drop a task on a column or on another task
    Move {
        id: String,
        /// Column id or task id to drop onto
        over: String,
    },
    /// Show a task with its deadline status
    Show { id: String },
    /// Remove every task from a column
    Clear {
        #[arg(long, default_value = "done")]
        column: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Define a tag
    Add {
        label: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// Relabel or recolor a tag
    Edit {
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a tag
    Delete { id: String },
    /// Show one tag
    Show { id: String },
    /// List tags
    List {
        /// Only labels containing this text
        #[arg(long)]
        filter: Option<String>,
    },
}
