//! In-memory persistence adapter.
//!
//! Used by tests and embedders that do not want file I/O. Saves can be
//! forced to fail to exercise recovery paths.

use super::{NoteStorage, StorageError, StorageResult};
use crate::model::note::NoteCollection;
use std::io;
use std::path::PathBuf;

const MEMORY_LOCATION: &str = "<memory>";

/// Note storage that keeps the last saved snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    snapshot: Option<NoteCollection>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage whose next `load` returns `collection`.
    pub fn with_collection(collection: NoteCollection) -> Self {
        Self {
            snapshot: Some(collection),
            ..Self::default()
        }
    }

    /// Makes every subsequent `save` fail (or succeed again).
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Returns the last successfully saved snapshot.
    pub fn snapshot(&self) -> Option<&NoteCollection> {
        self.snapshot.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl NoteStorage for MemoryStorage {
    fn load(&self) -> StorageResult<NoteCollection> {
        Ok(self.snapshot.clone().unwrap_or_default())
    }

    fn save(&mut self, collection: &NoteCollection) -> StorageResult<()> {
        if self.fail_saves {
            return Err(StorageError::Write {
                path: PathBuf::from(MEMORY_LOCATION),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "saves disabled"),
            });
        }
        self.snapshot = Some(collection.clone());
        self.save_count += 1;
        Ok(())
    }
}
