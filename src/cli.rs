use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::helpers::SortKey;
use crate::model::TaskId;

#[derive(Parser)]
#[command(name = "taskmaster")]
#[command(about = "Task Master: a small task list kept in a JSON file")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: ~/.config/taskmaster/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Task file to use instead of the configured one
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the interactive TUI (default in terminal)
    Tui,

    /// List tasks to stdout (default when piped)
    List {
        #[arg(value_enum, default_value = "all")]
        filter: ListFilter,

        /// Order of the listing (default: general.default_sort)
        #[arg(short, long, value_enum)]
        sort: Option<SortKey>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Add a task
    Add {
        /// Task title
        #[arg(required = true)]
        title: Vec<String>,

        /// Critical, High, Medium or Low
        #[arg(short, long, default_value = "Low")]
        priority: String,

        /// YYYY-MM-DD, today or tomorrow
        #[arg(short, long)]
        due: Option<String>,

        /// Free-text label, e.g. Work, School, Personal
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Change fields of an existing task
    Edit {
        id: TaskId,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        #[arg(short, long, conflicts_with = "clear_due")]
        due: Option<String>,

        #[arg(short, long, conflicts_with = "clear_tag")]
        tag: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// Remove the tag
        #[arg(long)]
        clear_tag: bool,
    },

    /// Mark a task complete, or pending again if it already is
    Toggle { id: TaskId },

    /// Delete a task
    Delete { id: TaskId },

    /// Print the active config (resolved, with defaults)
    Config,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFilter {
    All,
    Pending,
    Done,
    Overdue,
}
