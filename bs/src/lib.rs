//! BoardStore - kanban board state management
//!
//! Holds the board/task domain model, the pure reducer that computes every
//! state transition, and the persistence adapter that stores the whole board
//! sequence as a single JSON blob.
//!
//! # Architecture
//!
//! ```text
//! <data-dir>/
//! └── kanban-boards.json   # the full board sequence, overwritten on save
//! ```
//!
//! State is an ordered `Vec<Board>`, each board an ordered `Vec<Task>`.
//! Mutations never happen in place: [`reduce`] maps the current sequence and
//! an [`Action`] to a fresh sequence, so readers always see a consistent
//! snapshot. Unknown ids leave the state unchanged rather than erroring.
//!
//! # Example
//!
//! ```ignore
//! use boardstore::{Action, BoardStore, reduce, seed_default_boards};
//!
//! let store = BoardStore::open(".kanban")?;
//! let mut boards = store.load();
//! if boards.is_empty() {
//!     boards = seed_default_boards();
//! }
//! boards = reduce(&boards, Action::AddBoard { title: "Backlog".into() });
//! store.save(&boards)?;
//! ```

pub mod domain;
pub mod reducer;
mod store;

pub use domain::{Board, IdResolver, Task, TaskStatus, TitleError, generate_id, validate_title};
pub use reducer::{Action, reduce};
pub use store::{BoardStore, STORAGE_KEY, seed_default_boards};

/// Maximum length of a board title, in characters
pub const MAX_BOARD_TITLE_LEN: usize = 50;

/// Maximum length of a task title, in characters
pub const MAX_TASK_TITLE_LEN: usize = 100;
