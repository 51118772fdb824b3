//! Board and Task types
//!
//! Serialized field names follow the persisted blob layout: tasks carry a
//! camelCase `boardId`, and `status` tolerates absence on load.

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// Derived classification of a task, inferred from its owning board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Finished
    Done,
}

impl TaskStatus {
    /// Derive the status a task gets when created on or moved to the named
    /// board.
    ///
    /// Only the three stock board titles are recognized; every other title
    /// maps to `Todo`. Renaming a board does not restatus its tasks - the
    /// derivation runs only on create and move.
    pub fn for_board_title(title: &str) -> Self {
        match title {
            "In Progress" => Self::InProgress,
            "Done" => Self::Done,
            _ => Self::Todo,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// A single work item belonging to exactly one board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation, immutable
    pub id: String,

    /// Display title
    pub title: String,

    /// Id of the owning board; updated when the task moves between boards
    pub board_id: String,

    /// Derived from the owning board's title, never set directly
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Create a new task with a generated id
    pub fn new(board_id: impl Into<String>, title: impl Into<String>, status: TaskStatus) -> Self {
        let title = title.into();
        Self {
            id: generate_id("task", &title),
            title,
            board_id: board_id.into(),
            status,
        }
    }

    /// Create with a specific id (tests and fixtures)
    pub fn with_id(
        id: impl Into<String>,
        board_id: impl Into<String>,
        title: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            board_id: board_id.into(),
            status,
        }
    }
}

/// A named ordered column of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Unique identifier, assigned at creation, immutable
    pub id: String,

    /// Display title
    pub title: String,

    /// Tasks in display order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    /// Create a new empty board with a generated id
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: generate_id("board", &title),
            title,
            tasks: Vec::new(),
        }
    }

    /// Create with a specific id (tests and fixtures)
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Find a task by id
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_new() {
        let board = Board::new("To do");
        assert!(board.id.contains("-board-"));
        assert!(board.id.contains("to-do"));
        assert_eq!(board.title, "To do");
        assert!(board.tasks.is_empty());
    }

    #[test]
    fn test_task_new() {
        let task = Task::new("b1", "Buy milk", TaskStatus::Todo);
        assert!(task.id.contains("-task-"));
        assert!(task.id.contains("buy-milk"));
        assert_eq!(task.board_id, "b1");
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_status_for_board_title() {
        assert_eq!(TaskStatus::for_board_title("To do"), TaskStatus::Todo);
        assert_eq!(TaskStatus::for_board_title("In Progress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::for_board_title("Done"), TaskStatus::Done);
        // Unrecognized titles default to todo
        assert_eq!(TaskStatus::for_board_title("Backlog"), TaskStatus::Todo);
        assert_eq!(TaskStatus::for_board_title("done"), TaskStatus::Todo);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TaskStatus::Todo.to_string(), "todo");
        assert_eq!(TaskStatus::InProgress.to_string(), "in-progress");
        assert_eq!(TaskStatus::Done.to_string(), "done");
    }

    #[test]
    fn test_task_serde_layout() {
        let task = Task::with_id("t1", "b1", "Buy milk", TaskStatus::InProgress);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"boardId\":\"b1\""));
        assert!(json.contains("\"status\":\"in-progress\""));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_task_status_defaults_on_load() {
        // Blobs written before status existed carry no status field
        let json = r#"{"id":"t1","title":"Buy milk","boardId":"b1"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_board_serde_round_trip() {
        let mut board = Board::with_id("b1", "To do");
        board.tasks.push(Task::with_id("t1", "b1", "Buy milk", TaskStatus::Todo));
        board.tasks.push(Task::with_id("t2", "b1", "Walk dog", TaskStatus::Todo));

        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        // Order survives the round trip
        assert_eq!(back.tasks[0].id, "t1");
        assert_eq!(back.tasks[1].id, "t2");
    }

    #[test]
    fn test_board_task_lookup() {
        let mut board = Board::with_id("b1", "To do");
        board.tasks.push(Task::with_id("t1", "b1", "Buy milk", TaskStatus::Todo));
        assert!(board.task("t1").is_some());
        assert!(board.task("t9").is_none());
    }
}
