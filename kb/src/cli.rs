//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kanban - terminal kanban board
#[derive(Parser)]
#[command(
    name = "kb",
    version,
    about = "Terminal kanban board - boards, tasks, keyboard-driven reorder and move"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (none launches the TUI)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List boards and their tasks
    Boards {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Manage boards
    Board {
        #[command(subcommand)]
        command: BoardCommand,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

/// Board management subcommands
#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Add a new board
    Add {
        /// Board title
        title: String,
    },

    /// Rename a board
    Rename {
        /// Board id (or partial match)
        board: String,

        /// New title
        title: String,
    },

    /// Delete a board and all of its tasks
    Delete {
        /// Board id (or partial match)
        board: String,
    },

    /// Move a board to a new position (0-based)
    Move {
        /// Board id (or partial match)
        board: String,

        /// Target position in the board order
        position: usize,
    },
}

/// Task management subcommands
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a task to a board
    Add {
        /// Board id (or partial match)
        board: String,

        /// Task title
        title: String,
    },

    /// Edit a task's title
    Edit {
        /// Board id (or partial match)
        board: String,

        /// Task id (or partial match)
        task: String,

        /// New title
        title: String,
    },

    /// Delete a task
    Delete {
        /// Board id (or partial match)
        board: String,

        /// Task id (or partial match)
        task: String,
    },

    /// Move a task to another board (or reposition it on its own board)
    Move {
        /// Source board id (or partial match)
        board: String,

        /// Task id (or partial match)
        task: String,

        /// Target board id (or partial match)
        target: String,

        /// Insert position in the target board (default: append)
        #[arg(short, long)]
        position: Option<usize>,
    },
}

/// Output format for listing commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
