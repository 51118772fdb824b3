//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.
//! Mutations are queued as PendingActions; the runner dispatches them.

use boardstore::{MAX_BOARD_TITLE_LEN, MAX_TASK_TITLE_LEN, validate_title};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::{AppState, ConfirmAction, ConfirmDialog, InputKind, InteractionMode, PendingAction};

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self { state: AppState::new() }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit immediately.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Clear any transient message on key press
        self.state.clear_status();

        match &self.state.interaction_mode {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::Input { .. } => self.handle_input_key(key),
            InteractionMode::Confirm(_) => self.handle_confirm_key(key),
            InteractionMode::Help => self.handle_help_key(key),
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                debug!("App::handle_normal_key: Ctrl+C force quit");
                return true;
            }
            (KeyCode::Char('q'), _) => {
                debug!("App::handle_normal_key: quit requested");
                self.state.should_quit = true;
            }

            // === Help ===
            (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => {
                self.state.interaction_mode = InteractionMode::Help;
            }

            // === Navigation ===
            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
                self.state.selected_board = self.state.selected_board.saturating_sub(1);
            }
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
                if self.state.selected_board + 1 < self.state.boards.len() {
                    self.state.selected_board += 1;
                }
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.move_task_cursor(-1);
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.move_task_cursor(1);
            }
            (KeyCode::Char('g'), _) => {
                self.set_task_cursor_edge(true);
            }
            (KeyCode::Char('G'), _) => {
                self.set_task_cursor_edge(false);
            }

            // === Reorder / move ===
            (KeyCode::Char('['), _) => {
                self.move_board(-1);
            }
            (KeyCode::Char(']'), _) => {
                self.move_board(1);
            }
            (KeyCode::Char('K'), _) => {
                self.move_task_in_board(-1);
            }
            (KeyCode::Char('J'), _) => {
                self.move_task_in_board(1);
            }
            (KeyCode::Char('H'), _) => {
                self.move_task_across(-1);
            }
            (KeyCode::Char('L'), _) => {
                self.move_task_across(1);
            }

            // === Board CRUD ===
            (KeyCode::Char('b'), _) => {
                self.state.interaction_mode = InteractionMode::Input {
                    kind: InputKind::NewBoard,
                    buffer: String::new(),
                };
            }
            (KeyCode::Char('r'), _) => {
                self.open_rename_board();
            }
            (KeyCode::Char('D'), _) => {
                self.open_delete_board();
            }

            // === Task CRUD ===
            (KeyCode::Char('n'), _) | (KeyCode::Char('a'), _) => {
                self.open_new_task();
            }
            (KeyCode::Char('e'), _) => {
                self.open_edit_task();
            }
            (KeyCode::Char('d'), _) => {
                self.open_delete_task();
            }

            _ => {}
        }

        false
    }

    /// Handle key while collecting a line of input
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                self.commit_input();
            }
            KeyCode::Backspace => {
                if let InteractionMode::Input { buffer, .. } = &mut self.state.interaction_mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let InteractionMode::Input { buffer, .. } = &mut self.state.interaction_mode {
                    buffer.push(c);
                }
            }
            _ => {}
        }
        false
    }

    /// Handle key in a confirmation dialog
    fn handle_confirm_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                if let InteractionMode::Confirm(dialog) = &mut self.state.interaction_mode {
                    dialog.selected_button = !dialog.selected_button;
                }
            }
            KeyCode::Char('y') => {
                self.confirm_dialog();
            }
            KeyCode::Enter => {
                let confirmed = matches!(
                    &self.state.interaction_mode,
                    InteractionMode::Confirm(dialog) if dialog.selected_button
                );
                if confirmed {
                    self.confirm_dialog();
                } else {
                    self.state.interaction_mode = InteractionMode::Normal;
                }
            }
            _ => {}
        }
        false
    }

    /// Handle key in the help overlay
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
        ) {
            self.state.interaction_mode = InteractionMode::Normal;
        }
        false
    }

    // === Navigation helpers ===

    fn move_task_cursor(&mut self, delta: isize) {
        let index = self.state.selected_board;
        let Some(board) = self.state.boards.get(index) else {
            return;
        };
        let len = board.tasks.len();
        if len == 0 {
            return;
        }
        let cursor = self.state.task_cursors[index] as isize + delta;
        self.state.task_cursors[index] = cursor.clamp(0, len as isize - 1) as usize;
    }

    fn set_task_cursor_edge(&mut self, top: bool) {
        let index = self.state.selected_board;
        let Some(board) = self.state.boards.get(index) else {
            return;
        };
        let len = board.tasks.len();
        if len == 0 {
            return;
        }
        self.state.task_cursors[index] = if top { 0 } else { len - 1 };
    }

    // === Reorder / move helpers ===
    //
    // Each computes the full permuted sequence from the current snapshot
    // and queues a wholesale Reorder/Move action - the same trusted
    // contract the reducer documents.

    fn move_board(&mut self, delta: isize) {
        let len = self.state.boards.len();
        if len < 2 {
            return;
        }
        let from = self.state.selected_board;
        if from >= len {
            return;
        }
        let to = from as isize + delta;
        if to < 0 || to >= len as isize {
            return;
        }
        let to = to as usize;

        let mut boards = self.state.boards.clone();
        boards.swap(from, to);

        debug!(from, to, "App::move_board: queueing reorder");
        self.state.task_cursors.swap(from, to);
        self.state.selected_board = to;
        self.state.pending_actions.push(PendingAction::ReorderBoards { boards });
    }

    fn move_task_in_board(&mut self, delta: isize) {
        let index = self.state.selected_board;
        let Some(board) = self.state.boards.get(index) else {
            return;
        };
        if board.tasks.len() < 2 {
            return;
        }
        let from = self.state.task_cursors[index];
        let to = from as isize + delta;
        if to < 0 || to >= board.tasks.len() as isize {
            return;
        }
        let to = to as usize;

        let board_id = board.id.clone();
        let mut tasks = board.tasks.clone();
        tasks.swap(from, to);

        debug!(%board_id, from, to, "App::move_task_in_board: queueing reorder");
        self.state.task_cursors[index] = to;
        self.state
            .pending_actions
            .push(PendingAction::ReorderTasks { board_id, tasks });
    }

    fn move_task_across(&mut self, delta: isize) {
        let from = self.state.selected_board;
        let to = from as isize + delta;
        if to < 0 || to >= self.state.boards.len() as isize {
            return;
        }
        let to = to as usize;

        let Some(task) = self.state.selected_task_ref() else {
            self.state.set_status("No task selected");
            return;
        };
        let task_id = task.id.clone();
        let source_board_id = self.state.boards[from].id.clone();
        let target_board_id = self.state.boards[to].id.clone();
        let target_len = self.state.boards[to].tasks.len();

        debug!(%task_id, %source_board_id, %target_board_id, "App::move_task_across: queueing move");
        self.state.pending_actions.push(PendingAction::MoveTask {
            task_id,
            source_board_id,
            target_board_id,
            position: None,
        });

        // Follow the task: the appended index survives the post-dispatch clamp
        self.state.selected_board = to;
        self.state.task_cursors[to] = target_len;
    }

    // === Input openers ===

    fn open_rename_board(&mut self) {
        let Some(board) = self.state.selected_board_ref() else {
            self.state.set_status("No board selected");
            return;
        };
        let kind = InputKind::RenameBoard { id: board.id.clone() };
        let buffer = board.title.clone();
        self.state.interaction_mode = InteractionMode::Input { kind, buffer };
    }

    fn open_delete_board(&mut self) {
        let Some(board) = self.state.selected_board_ref() else {
            self.state.set_status("No board selected");
            return;
        };
        let dialog = ConfirmDialog::delete_board(board.id.clone(), &board.title, board.tasks.len());
        self.state.interaction_mode = InteractionMode::Confirm(dialog);
    }

    fn open_new_task(&mut self) {
        let Some(board) = self.state.selected_board_ref() else {
            self.state.set_status("No board selected - press b to create one");
            return;
        };
        let kind = InputKind::NewTask {
            board_id: board.id.clone(),
        };
        self.state.interaction_mode = InteractionMode::Input {
            kind,
            buffer: String::new(),
        };
    }

    fn open_edit_task(&mut self) {
        let Some(task) = self.state.selected_task_ref() else {
            self.state.set_status("No task selected");
            return;
        };
        let kind = InputKind::EditTask {
            board_id: task.board_id.clone(),
            task_id: task.id.clone(),
        };
        let buffer = task.title.clone();
        self.state.interaction_mode = InteractionMode::Input { kind, buffer };
    }

    fn open_delete_task(&mut self) {
        let Some(task) = self.state.selected_task_ref() else {
            self.state.set_status("No task selected");
            return;
        };
        let dialog = ConfirmDialog::delete_task(task.board_id.clone(), task.id.clone(), &task.title);
        self.state.interaction_mode = InteractionMode::Confirm(dialog);
    }

    // === Commit helpers ===

    fn commit_input(&mut self) {
        let InteractionMode::Input { kind, buffer } = std::mem::take(&mut self.state.interaction_mode) else {
            return;
        };

        let max_len = match kind {
            InputKind::NewBoard | InputKind::RenameBoard { .. } => MAX_BOARD_TITLE_LEN,
            InputKind::NewTask { .. } | InputKind::EditTask { .. } => MAX_TASK_TITLE_LEN,
        };

        let title = match validate_title(&buffer, max_len) {
            Ok(title) => title,
            Err(e) => {
                debug!(error = %e, "App::commit_input: invalid title");
                self.state.set_status(e.to_string());
                // Keep the input open so the user can fix it
                self.state.interaction_mode = InteractionMode::Input { kind, buffer };
                return;
            }
        };

        let action = match kind {
            InputKind::NewBoard => {
                // Select the new board once the snapshot refreshes
                self.state.selected_board = self.state.boards.len();
                PendingAction::AddBoard { title }
            }
            InputKind::RenameBoard { id } => PendingAction::RenameBoard { id, title },
            InputKind::NewTask { board_id } => PendingAction::AddTask { board_id, title },
            InputKind::EditTask { board_id, task_id } => PendingAction::EditTask {
                board_id,
                task_id,
                title,
            },
        };

        debug!(?action, "App::commit_input: queueing action");
        self.state.pending_actions.push(action);
    }

    fn confirm_dialog(&mut self) {
        let InteractionMode::Confirm(dialog) = std::mem::take(&mut self.state.interaction_mode) else {
            return;
        };

        let action = match dialog.action {
            ConfirmAction::DeleteBoard(id) => PendingAction::DeleteBoard { id },
            ConfirmAction::DeleteTask { board_id, task_id } => PendingAction::DeleteTask { board_id, task_id },
        };

        debug!(?action, "App::confirm_dialog: queueing action");
        self.state.pending_actions.push(action);
    }
}
