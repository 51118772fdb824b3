//! Kanban - terminal kanban board
//!
//! CLI entry point: subcommands for scripted board/task management, or the
//! interactive TUI when no subcommand is given.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use boardstore::{Board, IdResolver, TaskStatus};
use kanban::cli::{BoardCommand, Cli, Command, OutputFormat, TaskCommand};
use kanban::config::Config;
use kanban::state::StateManager;
use kanban::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // The TUI owns the terminal, so logs always go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kanban")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("kanban.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    debug!(data_dir = %config.storage.data_dir.display(), "main: config loaded");

    let state = StateManager::spawn(&config.storage.data_dir).context("Failed to spawn StateManager")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Boards { format }) => cmd_boards(&state, format).await,
        Some(Command::Board { command }) => cmd_board(&state, command).await,
        Some(Command::Task { command }) => cmd_task(&state, command).await,
        None => {
            debug!("main: no command specified, launching TUI");
            tui::run_with_state(state, config.ui.tick_rate_ms).await
        }
    }
}

/// List boards and their tasks
async fn cmd_boards(state: &StateManager, format: OutputFormat) -> Result<()> {
    debug!(?format, "cmd_boards: called");
    let boards = state.boards().await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&boards)?);
        }
        OutputFormat::Text => {
            for board in &boards {
                println!(
                    "{} {} {}",
                    board.title.cyan().bold(),
                    format!("({})", board.tasks.len()).dimmed(),
                    board.id.dimmed()
                );
                for task in &board.tasks {
                    let icon = match task.status {
                        TaskStatus::Todo => "○".yellow(),
                        TaskStatus::InProgress => "●".green(),
                        TaskStatus::Done => "✓".green(),
                    };
                    println!("  {} {}  {}", icon, task.title, task.id.dimmed());
                }
            }
        }
    }

    Ok(())
}

/// Handle board management commands
async fn cmd_board(state: &StateManager, command: BoardCommand) -> Result<()> {
    debug!(?command, "cmd_board: called");
    match command {
        BoardCommand::Add { title } => {
            let board = state.add_board(&title).await?;
            println!("{} Added board: {} {}", "✓".green(), board.title.cyan(), board.id.dimmed());
        }
        BoardCommand::Rename { board, title } => {
            let boards = state.boards().await?;
            let id = resolve_board(&boards, &board)?;
            state.rename_board(&id, &title).await?;
            println!("{} Renamed board {} to '{}'", "✓".green(), id.dimmed(), title);
        }
        BoardCommand::Delete { board } => {
            let boards = state.boards().await?;
            let id = resolve_board(&boards, &board)?;
            state.delete_board(&id).await?;
            println!("{} Deleted board: {}", "✓".green(), id);
        }
        BoardCommand::Move { board, position } => {
            let boards = state.boards().await?;
            let id = resolve_board(&boards, &board)?;
            state.move_board(&id, position).await?;
            println!("{} Moved board {} to position {}", "✓".green(), id.dimmed(), position);
        }
    }

    Ok(())
}

/// Handle task management commands
async fn cmd_task(state: &StateManager, command: TaskCommand) -> Result<()> {
    debug!(?command, "cmd_task: called");
    match command {
        TaskCommand::Add { board, title } => {
            let boards = state.boards().await?;
            let board_id = resolve_board(&boards, &board)?;
            let task = state.add_task(&board_id, &title).await?;
            println!(
                "{} Added task: {} [{}] {}",
                "✓".green(),
                task.title,
                task.status,
                task.id.dimmed()
            );
        }
        TaskCommand::Edit { board, task, title } => {
            let boards = state.boards().await?;
            let board_id = resolve_board(&boards, &board)?;
            let task_id = resolve_task(&boards, &board_id, &task)?;
            state.edit_task(&board_id, &task_id, &title).await?;
            println!("{} Edited task {} to '{}'", "✓".green(), task_id.dimmed(), title);
        }
        TaskCommand::Delete { board, task } => {
            let boards = state.boards().await?;
            let board_id = resolve_board(&boards, &board)?;
            let task_id = resolve_task(&boards, &board_id, &task)?;
            state.delete_task(&board_id, &task_id).await?;
            println!("{} Deleted task: {}", "✓".green(), task_id);
        }
        TaskCommand::Move {
            board,
            task,
            target,
            position,
        } => {
            let boards = state.boards().await?;
            let board_id = resolve_board(&boards, &board)?;
            let task_id = resolve_task(&boards, &board_id, &task)?;
            let target_id = resolve_board(&boards, &target)?;
            state.move_task(&task_id, &board_id, &target_id, position).await?;
            println!(
                "{} Moved task {} to board {}",
                "✓".green(),
                task_id.dimmed(),
                target_id.dimmed()
            );
        }
    }

    Ok(())
}

/// Resolve a partial board reference to a full id
fn resolve_board(boards: &[Board], reference: &str) -> Result<String> {
    let resolver = IdResolver::new(boards.iter().map(|b| b.id.as_str()));
    match resolver.resolve(reference) {
        Ok(Some(id)) => Ok(id.to_string()),
        Ok(None) => Err(eyre::eyre!("No board matches '{}'", reference)),
        Err(candidates) => Err(eyre::eyre!(
            "Ambiguous board '{}': {}",
            reference,
            candidates.join(", ")
        )),
    }
}

/// Resolve a partial task reference within the named board
fn resolve_task(boards: &[Board], board_id: &str, reference: &str) -> Result<String> {
    let tasks = boards
        .iter()
        .find(|b| b.id == board_id)
        .map(|b| b.tasks.as_slice())
        .unwrap_or_default();

    let resolver = IdResolver::new(tasks.iter().map(|t| t.id.as_str()));
    match resolver.resolve(reference) {
        Ok(Some(id)) => Ok(id.to_string()),
        Ok(None) => Err(eyre::eyre!("No task matches '{}' on board {}", reference, board_id)),
        Err(candidates) => Err(eyre::eyre!(
            "Ambiguous task '{}': {}",
            reference,
            candidates.join(", ")
        )),
    }
}
