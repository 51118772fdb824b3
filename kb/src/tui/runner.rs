//! TUI Runner - main loop that owns the terminal and the StateManager handle
//!
//! The TuiRunner is responsible for:
//! - dispatching actions queued by key handling to the StateManager
//! - refreshing the board snapshot on change events (plus a fallback interval)
//! - rendering each tick at the configured rate

use std::time::{Duration, Instant};

use eyre::Result;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::state::{StateEvent, StateManager};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingAction;
use super::views;

/// Fallback refresh interval when no change events arrive
const DATA_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state and key handling
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// StateManager for data
    state_manager: StateManager,
    /// Event handler
    event_handler: EventHandler,
    /// Receiver for instant state change notifications
    state_event_rx: broadcast::Receiver<StateEvent>,
    /// Last data refresh time
    last_refresh: Instant,
}

impl TuiRunner {
    /// Create a new TuiRunner connected to a StateManager
    pub fn new(terminal: Tui, state_manager: StateManager, tick_rate_ms: u64) -> Self {
        debug!(tick_rate_ms, "TuiRunner::new: called");
        let state_event_rx = state_manager.subscribe_events();

        Self {
            app: App::new(),
            terminal,
            state_manager,
            event_handler: EventHandler::new(Duration::from_millis(tick_rate_ms.max(1))),
            state_event_rx,
            // Force an immediate refresh on the first pass
            last_refresh: Instant::now() - DATA_REFRESH_INTERVAL,
        }
    }

    /// Run the event loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: starting");
        self.refresh_boards().await;

        loop {
            // Instant refresh when the StateManager reports a change;
            // a lagged receiver just falls back to the interval refresh.
            let mut changed = false;
            while let Ok(event) = self.state_event_rx.try_recv() {
                trace!(?event, "run: state event");
                changed = true;
            }
            if changed || self.last_refresh.elapsed() >= DATA_REFRESH_INTERVAL {
                self.refresh_boards().await;
            }

            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        debug!("run: force quit");
                        break;
                    }
                }
                Event::Resize(_, _) | Event::Tick => {}
            }

            self.drain_pending_actions().await;

            if self.app.state().should_quit {
                debug!("run: quit requested");
                break;
            }

            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Pull a fresh snapshot from the StateManager
    async fn refresh_boards(&mut self) {
        match self.state_manager.boards().await {
            Ok(boards) => {
                trace!(count = boards.len(), "refresh_boards: snapshot updated");
                self.app.state_mut().set_boards(boards);
            }
            Err(e) => {
                warn!(error = %e, "refresh_boards: failed");
                self.app.state_mut().set_status(format!("State error: {e}"));
            }
        }
        self.last_refresh = Instant::now();
    }

    /// Dispatch everything key handling queued since the last pass
    async fn drain_pending_actions(&mut self) {
        let pending: Vec<PendingAction> = self.app.state_mut().pending_actions.drain(..).collect();
        if pending.is_empty() {
            return;
        }

        for action in pending {
            debug!(?action, "drain_pending_actions: dispatching");
            let result = match action {
                PendingAction::AddBoard { title } => self.state_manager.add_board(&title).await.map(|_| ()),
                PendingAction::RenameBoard { id, title } => self.state_manager.rename_board(&id, &title).await,
                PendingAction::DeleteBoard { id } => self.state_manager.delete_board(&id).await,
                PendingAction::ReorderBoards { boards } => {
                    self.state_manager.reorder_boards(boards).await.map(|_| ())
                }
                PendingAction::AddTask { board_id, title } => {
                    self.state_manager.add_task(&board_id, &title).await.map(|_| ())
                }
                PendingAction::EditTask {
                    board_id,
                    task_id,
                    title,
                } => self.state_manager.edit_task(&board_id, &task_id, &title).await,
                PendingAction::DeleteTask { board_id, task_id } => {
                    self.state_manager.delete_task(&board_id, &task_id).await
                }
                PendingAction::ReorderTasks { board_id, tasks } => {
                    self.state_manager.reorder_tasks(&board_id, tasks).await.map(|_| ())
                }
                PendingAction::MoveTask {
                    task_id,
                    source_board_id,
                    target_board_id,
                    position,
                } => {
                    self.state_manager
                        .move_task(&task_id, &source_board_id, &target_board_id, position)
                        .await
                }
            };

            if let Err(e) = result {
                warn!(error = %e, "drain_pending_actions: action failed");
                self.app.state_mut().set_status(e.to_string());
            }
        }

        self.refresh_boards().await;
    }
}
