//! Saving and restoring puzzle snapshots.
//!
//! Stores keep the encoded `.puz` bytes rather than any in-memory form, so
//! whatever a store hands back has been through the same codec as a file
//! opened from disk.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::config::EditorConfig;
use super::format::convert;
use super::model::state::PuzzleState;
use super::types::error::Result;

pub trait StateStore {
    /// Encodes and stores `state`, replacing whatever was saved before.
    fn save(&self, state: &PuzzleState) -> Result<()>;

    /// Returns the last saved state, or `Ok(None)` when nothing was saved.
    fn load(&self) -> Result<Option<PuzzleState>>;
}

/// Keeps the encoded blob in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.blob.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn save(&self, state: &PuzzleState) -> Result<()> {
        let bytes = convert::encode_state(state)?;
        *self.blob.borrow_mut() = Some(bytes);
        Ok(())
    }

    fn load(&self) -> Result<Option<PuzzleState>> {
        // Only blobs this store encoded itself end up here, whatever their shape.
        self.blob
            .borrow()
            .as_deref()
            .map(|bytes| convert::decode_state(bytes, false))
            .transpose()
    }
}

/// Writes the `.puz` file at a fixed path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    require_square: bool,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, config: &EditorConfig) -> Self {
        Self {
            path: path.into(),
            require_square: config.require_square,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for FileStore {
    fn save(&self, state: &PuzzleState) -> Result<()> {
        let bytes = convert::encode_state(state)?;
        let temp = self.temp_path();
        fs::write(&temp, &bytes)?;
        fs::rename(&temp, &self.path)?;
        info!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<PuzzleState>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved puzzle at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        convert::decode_state(&bytes, self.require_square).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puz::types::error::PuzError;
    use crate::puz::types::models::{Cell, Cursor, Location, Metadata, Orientation};

    fn sample() -> PuzzleState {
        PuzzleState::new(3)
            .set_cell(Location::new(0, 0), Cell::Block)
            .unwrap()
            .set_clue(Cursor::new(0, 1, Orientation::Across), "Pair")
            .unwrap()
            .set_metadata(Metadata {
                title: "Saved".to_string(),
                ..Metadata::default()
            })
    }

    fn assert_same_puzzle(a: &PuzzleState, b: &PuzzleState) {
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.clues(), b.clues());
        assert_eq!(a.metadata(), b.metadata());
    }

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(store.bytes().is_none());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        let state = sample();
        store.save(&state).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_same_puzzle(&loaded, &state);
        assert_eq!(store.bytes().unwrap(), convert::encode_state(&state).unwrap());
    }

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.puz"), &EditorConfig::default());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_round_trips_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("saved.puz"), &EditorConfig::default());
        store.save(&sample()).unwrap();
        store.save(&sample().set_metadata(Metadata::default())).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.metadata().title, "");
        assert!(!dir.path().join("saved.puz.tmp").exists());
    }

    #[test]
    fn file_store_reports_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.puz");
        fs::write(&path, b"not a crossword").unwrap();
        let store = FileStore::new(&path, &EditorConfig::default());
        assert!(matches!(store.load(), Err(PuzError::MagicNotFound)));
    }
}
