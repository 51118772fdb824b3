//! Kanban - terminal kanban board
//!
//! Boards are columns of tasks. Tasks are created, edited, reordered within
//! a board, and moved between boards - from the interactive TUI or from CLI
//! subcommands. Every mutation flows through boardstore's reducer and the
//! full state is persisted to a single JSON blob after each committed
//! change, so a session can always be resumed where it left off.
//!
//! # Modules
//!
//! - [`cli`] - command-line interface
//! - [`config`] - configuration types and loading
//! - [`state`] - StateManager actor owning the board sequence
//! - [`tui`] - ratatui column view with vim-style keys

pub mod cli;
pub mod config;
pub mod state;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, StorageConfig, UiConfig};
pub use state::{StateCommand, StateError, StateEvent, StateManager, StateResponse};
