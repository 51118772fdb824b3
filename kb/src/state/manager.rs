//! StateManager - actor that owns the board sequence
//!
//! Processes commands via channels for serialized access to the state.
//! Every mutation flows through the reducer and is persisted before the
//! reply is sent; the actor task is the only writer, so in-flight reads
//! always see a consistent snapshot.

use std::path::Path;

use boardstore::{
    Action, Board, BoardStore, MAX_BOARD_TITLE_LEN, MAX_TASK_TITLE_LEN, Task, reduce, seed_default_boards,
    validate_title,
};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use super::messages::{StateCommand, StateError, StateResponse};

/// Event broadcast when state changes that the TUI should react to
#[derive(Debug, Clone)]
pub enum StateEvent {
    /// A committed action replaced the board sequence
    BoardsChanged,
}

/// Handle to send commands to the StateManager
#[derive(Clone)]
pub struct StateManager {
    tx: mpsc::Sender<StateCommand>,
    /// Broadcast sender for state change notifications
    event_tx: broadcast::Sender<StateEvent>,
}

impl StateManager {
    /// Spawn a new StateManager actor.
    ///
    /// Loads the persisted board sequence, seeding the stock three-board
    /// template when nothing (or nothing readable) is stored.
    pub fn spawn(store_path: impl AsRef<Path>) -> eyre::Result<Self> {
        debug!(store_path = %store_path.as_ref().display(), "spawn: called");
        let store = BoardStore::open(store_path.as_ref())?;

        let mut boards = store.load();
        if boards.is_empty() {
            debug!("spawn: nothing persisted, seeding default boards");
            boards = seed_default_boards();
            if let Err(e) = store.save(&boards) {
                warn!(error = %e, "spawn: failed to persist seeded boards");
            }
        }
        info!(count = boards.len(), "Loaded board sequence");

        let (tx, rx) = mpsc::channel(64);

        // Broadcast channel for state change notifications (TUI subscribes)
        let (event_tx, _) = broadcast::channel(16);

        // Spawn the actor task
        tokio::spawn(actor_loop(store, boards, rx, event_tx.clone()));

        info!("StateManager spawned");

        Ok(Self { tx, event_tx })
    }

    /// Subscribe to state change events (for instant TUI updates)
    pub fn subscribe_events(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    /// Current board sequence
    pub async fn boards(&self) -> StateResponse<Vec<Board>> {
        debug!("boards: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::GetBoards { reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Apply an action through the reducer, returning the new sequence.
    ///
    /// This is the raw surface: ids and reorder payloads are trusted exactly
    /// as the reducer documents. The convenience methods below add the
    /// boundary validation (trimmed titles, known ids).
    pub async fn dispatch(&self, action: Action) -> StateResponse<Vec<Board>> {
        debug!(?action, "dispatch: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(StateCommand::Dispatch {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Shutdown the StateManager
    pub async fn shutdown(&self) -> Result<(), StateError> {
        debug!("shutdown: called");
        self.tx
            .send(StateCommand::Shutdown)
            .await
            .map_err(|_| StateError::ChannelError)
    }

    // === Board operations ===

    /// Create a board, returning it
    pub async fn add_board(&self, title: &str) -> StateResponse<Board> {
        debug!(%title, "add_board: called");
        let title = validate_title(title, MAX_BOARD_TITLE_LEN)?;
        let boards = self.dispatch(Action::AddBoard { title }).await?;
        boards
            .last()
            .cloned()
            .ok_or_else(|| StateError::StoreError("state empty after add".to_string()))
    }

    /// Rename a board
    pub async fn rename_board(&self, id: &str, title: &str) -> StateResponse<()> {
        debug!(%id, %title, "rename_board: called");
        let title = validate_title(title, MAX_BOARD_TITLE_LEN)?;
        self.require_board(id).await?;
        self.dispatch(Action::EditBoardTitle {
            id: id.to_string(),
            new_title: title,
        })
        .await?;
        Ok(())
    }

    /// Delete a board and all of its tasks
    pub async fn delete_board(&self, id: &str) -> StateResponse<()> {
        debug!(%id, "delete_board: called");
        self.require_board(id).await?;
        self.dispatch(Action::DeleteBoard { id: id.to_string() }).await?;
        Ok(())
    }

    /// Replace the board order wholesale (trusted permutation)
    pub async fn reorder_boards(&self, boards: Vec<Board>) -> StateResponse<Vec<Board>> {
        debug!(count = boards.len(), "reorder_boards: called");
        self.dispatch(Action::ReorderBoards { boards }).await
    }

    /// Move a board to a new position, preserving the rest of the order
    pub async fn move_board(&self, id: &str, position: usize) -> StateResponse<()> {
        debug!(%id, position, "move_board: called");
        let mut boards = self.boards().await?;
        let Some(from) = boards.iter().position(|b| b.id == id) else {
            return Err(StateError::BoardNotFound(id.to_string()));
        };
        let board = boards.remove(from);
        let at = position.min(boards.len());
        boards.insert(at, board);
        self.dispatch(Action::ReorderBoards { boards }).await?;
        Ok(())
    }

    // === Task operations ===

    /// Create a task on the named board, returning it
    pub async fn add_task(&self, board_id: &str, title: &str) -> StateResponse<Task> {
        debug!(%board_id, %title, "add_task: called");
        let title = validate_title(title, MAX_TASK_TITLE_LEN)?;
        self.require_board(board_id).await?;
        let boards = self
            .dispatch(Action::AddTask {
                board_id: board_id.to_string(),
                title,
            })
            .await?;
        boards
            .iter()
            .find(|b| b.id == board_id)
            .and_then(|b| b.tasks.last())
            .cloned()
            .ok_or_else(|| StateError::BoardNotFound(board_id.to_string()))
    }

    /// Edit a task's title
    pub async fn edit_task(&self, board_id: &str, task_id: &str, title: &str) -> StateResponse<()> {
        debug!(%board_id, %task_id, %title, "edit_task: called");
        let title = validate_title(title, MAX_TASK_TITLE_LEN)?;
        self.require_task(board_id, task_id).await?;
        self.dispatch(Action::EditTask {
            board_id: board_id.to_string(),
            task_id: task_id.to_string(),
            new_title: title,
        })
        .await?;
        Ok(())
    }

    /// Delete a task
    pub async fn delete_task(&self, board_id: &str, task_id: &str) -> StateResponse<()> {
        debug!(%board_id, %task_id, "delete_task: called");
        self.require_task(board_id, task_id).await?;
        self.dispatch(Action::DeleteTask {
            board_id: board_id.to_string(),
            task_id: task_id.to_string(),
        })
        .await?;
        Ok(())
    }

    /// Replace a board's task order wholesale (trusted permutation)
    pub async fn reorder_tasks(&self, board_id: &str, tasks: Vec<Task>) -> StateResponse<Vec<Board>> {
        debug!(%board_id, count = tasks.len(), "reorder_tasks: called");
        self.dispatch(Action::ReorderTasks {
            board_id: board_id.to_string(),
            tasks,
        })
        .await
    }

    /// Move a task to another board (or reposition it on its own board)
    pub async fn move_task(
        &self,
        task_id: &str,
        source_board_id: &str,
        target_board_id: &str,
        position: Option<usize>,
    ) -> StateResponse<()> {
        debug!(%task_id, %source_board_id, %target_board_id, ?position, "move_task: called");
        self.require_task(source_board_id, task_id).await?;
        self.require_board(target_board_id).await?;
        self.dispatch(Action::MoveTask {
            task_id: task_id.to_string(),
            source_board_id: source_board_id.to_string(),
            target_board_id: target_board_id.to_string(),
            position,
        })
        .await?;
        Ok(())
    }

    // === Lookup helpers ===

    async fn require_board(&self, id: &str) -> StateResponse<Board> {
        self.boards()
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| StateError::BoardNotFound(id.to_string()))
    }

    async fn require_task(&self, board_id: &str, task_id: &str) -> StateResponse<Task> {
        let board = self.require_board(board_id).await?;
        board
            .tasks
            .into_iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StateError::TaskNotFound(task_id.to_string()))
    }
}

/// The actor loop that owns the store and the authoritative sequence
async fn actor_loop(
    store: BoardStore,
    mut boards: Vec<Board>,
    mut rx: mpsc::Receiver<StateCommand>,
    event_tx: broadcast::Sender<StateEvent>,
) {
    debug!("StateManager actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StateCommand::Dispatch { action, reply } => {
                debug!(?action, "actor_loop: Dispatch command");
                boards = reduce(&boards, action);

                // Persist every committed transition; a failed write is
                // logged and the in-memory sequence stays authoritative.
                if let Err(e) = store.save(&boards) {
                    warn!(error = %e, "actor_loop: failed to persist boards");
                }

                let _ = reply.send(Ok(boards.clone()));
                let _ = event_tx.send(StateEvent::BoardsChanged);
            }

            StateCommand::GetBoards { reply } => {
                debug!("actor_loop: GetBoards command");
                let _ = reply.send(Ok(boards.clone()));
            }

            StateCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("StateManager shutting down");
                break;
            }
        }
    }

    debug!("StateManager actor stopped");
}
