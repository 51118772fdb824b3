//! Persistence adapter
//!
//! The whole board sequence is stored as one JSON blob under a fixed key in
//! a data directory. A missing or unreadable blob is treated as empty and
//! never surfaces an error; `save` is an idempotent full overwrite.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use tracing::{debug, info, warn};

use crate::domain::Board;

/// Storage key; the blob lives at `<dir>/<STORAGE_KEY>.json`
pub const STORAGE_KEY: &str = "kanban-boards";

/// Stores the full board sequence as a single JSON document
pub struct BoardStore {
    base_path: PathBuf,
}

impl BoardStore {
    /// Open or create a store rooted at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        debug!(?base_path, "Opened board store");
        Ok(Self { base_path })
    }

    fn blob_path(&self) -> PathBuf {
        self.base_path.join(format!("{STORAGE_KEY}.json"))
    }

    /// Load the persisted board sequence.
    ///
    /// Absent or malformed data yields an empty sequence rather than an
    /// error; the caller decides whether to seed defaults.
    pub fn load(&self) -> Vec<Board> {
        let path = self.blob_path();
        if !path.exists() {
            debug!(?path, "No persisted boards");
            return Vec::new();
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, ?path, "Failed to read board blob, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(boards) => boards,
            Err(e) => {
                warn!(error = %e, ?path, "Malformed board blob, treating as empty");
                Vec::new()
            }
        }
    }

    /// Persist the full board sequence, overwriting the previous blob.
    ///
    /// Written through a temp file + rename so a crash mid-write never
    /// leaves a torn blob behind.
    pub fn save(&self, boards: &[Board]) -> Result<()> {
        let path = self.blob_path();
        let tmp = self.base_path.join(format!("{STORAGE_KEY}.json.tmp"));

        let json = serde_json::to_string_pretty(boards).context("Failed to serialize boards")?;
        fs::write(&tmp, json).context("Failed to write board blob")?;
        fs::rename(&tmp, &path).context("Failed to replace board blob")?;

        debug!(count = boards.len(), ?path, "Saved boards");
        Ok(())
    }
}

/// The stock three-board template used when nothing is persisted yet
pub fn seed_default_boards() -> Vec<Board> {
    info!("Seeding default boards");
    vec![
        Board::new("To do"),
        Board::new("In Progress"),
        Board::new("Done"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, TaskStatus};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path()).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_round_trip_preserves_order() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path()).unwrap();

        let mut b1 = Board::with_id("b1", "To do");
        b1.tasks.push(Task::with_id("t2", "b1", "Walk dog", TaskStatus::Todo));
        b1.tasks.push(Task::with_id("t1", "b1", "Buy milk", TaskStatus::Todo));
        let boards = vec![Board::with_id("b2", "Done"), b1];

        store.save(&boards).unwrap();
        assert_eq!(store.load(), boards);
    }

    #[test]
    fn test_save_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path()).unwrap();

        store.save(&[Board::with_id("b1", "To do")]).unwrap();
        store.save(&[Board::with_id("b2", "Done")]).unwrap();

        let boards = store.load();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].id, "b2");
    }

    #[test]
    fn test_corrupt_blob_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::open(temp.path()).unwrap();

        fs::write(temp.path().join(format!("{STORAGE_KEY}.json")), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_seed_default_boards() {
        let boards = seed_default_boards();
        let titles: Vec<&str> = boards.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["To do", "In Progress", "Done"]);
        assert!(boards.iter().all(|b| b.tasks.is_empty()));
        // Fresh ids every time
        let again = seed_default_boards();
        assert_ne!(boards[0].id, again[0].id);
    }
}
