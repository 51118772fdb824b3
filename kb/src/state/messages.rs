//! State manager messages
//!
//! Commands and responses for the actor pattern.

use boardstore::{Action, Board, TitleError};
use thiserror::Error;
use tokio::sync::oneshot;

/// Errors from state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Channel error")]
    ChannelError,
}

/// Response from state operations
pub type StateResponse<T> = Result<T, StateError>;

/// Commands sent to the StateManager actor
#[derive(Debug)]
pub enum StateCommand {
    /// Apply an action through the reducer and persist the result
    Dispatch {
        action: Action,
        reply: oneshot::Sender<StateResponse<Vec<Board>>>,
    },

    /// Read the current board sequence
    GetBoards {
        reply: oneshot::Sender<StateResponse<Vec<Board>>>,
    },

    /// Stop the actor
    Shutdown,
}
