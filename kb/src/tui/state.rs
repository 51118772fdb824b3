//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here; the key
//! handlers in `app` mutate this state and queue [`PendingAction`]s for the
//! runner to dispatch.

use boardstore::{Board, Task};

/// What an open input line is collecting
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    /// Title for a new board
    NewBoard,
    /// New title for an existing board
    RenameBoard { id: String },
    /// Title for a new task on the named board
    NewTask { board_id: String },
    /// New title for an existing task
    EditTask { board_id: String, task_id: String },
}

impl InputKind {
    /// Prompt shown ahead of the input buffer
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::NewBoard => "New board: ",
            Self::RenameBoard { .. } => "Rename board: ",
            Self::NewTask { .. } => "New task: ",
            Self::EditTask { .. } => "Edit task: ",
        }
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Default)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Collecting a line of input in the footer
    Input { kind: InputKind, buffer: String },
    /// Confirmation dialog for destructive actions
    Confirm(ConfirmDialog),
    /// Help overlay
    Help,
}

/// Confirmation dialog for destructive actions
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub message: String,
    pub action: ConfirmAction,
    pub selected_button: bool, // false = No, true = Yes
}

impl ConfirmDialog {
    pub fn new(action: ConfirmAction, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action,
            selected_button: false,
        }
    }

    pub fn delete_board(id: String, title: &str, task_count: usize) -> Self {
        Self::new(
            ConfirmAction::DeleteBoard(id),
            format!("Delete board '{}' and its {} task(s)?", title, task_count),
        )
    }

    pub fn delete_task(board_id: String, task_id: String, title: &str) -> Self {
        Self::new(
            ConfirmAction::DeleteTask { board_id, task_id },
            format!("Delete task '{}'?", title),
        )
    }
}

/// Action to perform on confirm
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteBoard(String),
    DeleteTask { board_id: String, task_id: String },
}

/// Action queued by key handling for the runner to dispatch
#[derive(Debug, Clone)]
pub enum PendingAction {
    AddBoard {
        title: String,
    },
    RenameBoard {
        id: String,
        title: String,
    },
    DeleteBoard {
        id: String,
    },
    ReorderBoards {
        boards: Vec<Board>,
    },
    AddTask {
        board_id: String,
        title: String,
    },
    EditTask {
        board_id: String,
        task_id: String,
        title: String,
    },
    DeleteTask {
        board_id: String,
        task_id: String,
    },
    ReorderTasks {
        board_id: String,
        tasks: Vec<Task>,
    },
    MoveTask {
        task_id: String,
        source_board_id: String,
        target_board_id: String,
        position: Option<usize>,
    },
}

/// Application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Snapshot of the board sequence (authoritative copy lives in the
    /// StateManager)
    pub boards: Vec<Board>,

    /// Index of the selected board
    pub selected_board: usize,

    /// Per-board task cursors, parallel to `boards`
    pub task_cursors: Vec<usize>,

    /// Current interaction mode
    pub interaction_mode: InteractionMode,

    /// Transient status line message (errors, confirmations)
    pub status_message: Option<String>,

    /// Actions queued for the runner to dispatch
    pub pending_actions: Vec<PendingAction>,

    /// Set when the user asked to quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the board snapshot, clamping cursors to the new shape
    pub fn set_boards(&mut self, boards: Vec<Board>) {
        self.boards = boards;

        if self.boards.is_empty() {
            self.selected_board = 0;
        } else if self.selected_board >= self.boards.len() {
            self.selected_board = self.boards.len() - 1;
        }

        self.task_cursors.resize(self.boards.len(), 0);
        for (cursor, board) in self.task_cursors.iter_mut().zip(&self.boards) {
            if board.tasks.is_empty() {
                *cursor = 0;
            } else if *cursor >= board.tasks.len() {
                *cursor = board.tasks.len() - 1;
            }
        }
    }

    /// The selected board, if any exist
    pub fn selected_board_ref(&self) -> Option<&Board> {
        self.boards.get(self.selected_board)
    }

    /// The selected task on the selected board, if any
    pub fn selected_task_ref(&self) -> Option<&Task> {
        let board = self.selected_board_ref()?;
        let cursor = *self.task_cursors.get(self.selected_board)?;
        board.tasks.get(cursor)
    }

    /// Cursor position on the selected board
    pub fn selected_task_index(&self) -> usize {
        self.task_cursors.get(self.selected_board).copied().unwrap_or(0)
    }

    /// Total task count across all boards (header metric)
    pub fn total_tasks(&self) -> usize {
        self.boards.iter().map(|b| b.tasks.len()).sum()
    }

    /// Set a transient status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the transient status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardstore::TaskStatus;

    fn boards_fixture() -> Vec<Board> {
        let mut b1 = Board::with_id("b1", "To do");
        b1.tasks.push(Task::with_id("t1", "b1", "Buy milk", TaskStatus::Todo));
        b1.tasks.push(Task::with_id("t2", "b1", "Walk dog", TaskStatus::Todo));
        vec![b1, Board::with_id("b2", "Done")]
    }

    #[test]
    fn test_set_boards_clamps_board_cursor() {
        let mut state = AppState::new();
        state.set_boards(boards_fixture());
        state.selected_board = 5;

        state.set_boards(boards_fixture());
        assert_eq!(state.selected_board, 1);
    }

    #[test]
    fn test_set_boards_clamps_task_cursors() {
        let mut state = AppState::new();
        state.set_boards(boards_fixture());
        state.task_cursors[0] = 9;

        state.set_boards(boards_fixture());
        assert_eq!(state.task_cursors[0], 1);
        assert_eq!(state.task_cursors[1], 0);
    }

    #[test]
    fn test_selected_refs() {
        let mut state = AppState::new();
        state.set_boards(boards_fixture());

        assert_eq!(state.selected_board_ref().map(|b| b.id.as_str()), Some("b1"));
        assert_eq!(state.selected_task_ref().map(|t| t.id.as_str()), Some("t1"));

        state.selected_board = 1;
        assert!(state.selected_task_ref().is_none());
    }

    #[test]
    fn test_total_tasks() {
        let mut state = AppState::new();
        state.set_boards(boards_fixture());
        assert_eq!(state.total_tasks(), 2);
    }

    #[test]
    fn test_empty_state() {
        let state = AppState::new();
        assert!(state.selected_board_ref().is_none());
        assert!(state.selected_task_ref().is_none());
        assert_eq!(state.total_tasks(), 0);
    }
}
