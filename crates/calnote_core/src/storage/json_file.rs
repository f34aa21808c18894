//! JSON file persistence adapter.
//!
//! # Responsibility
//! - Read and write the note collection as one human-readable UTF-8 file.
//!
//! # Invariants
//! - Non-ASCII text is written verbatim, never escaped or transcoded.
//! - Output is pretty-printed with keys in chronological order, so equal
//!   collections produce byte-identical files.
//! - Writes land in a sibling temp file first; the previous file is only
//!   replaced once the new content is fully on disk.

use super::{NoteStorage, StorageError, StorageResult};
use crate::model::note::NoteCollection;
use log::{error, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Default backing file name, resolved relative to the working directory.
pub const DEFAULT_NOTES_FILE_NAME: &str = "notes.json";

/// Note storage backed by a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, payload: &[u8]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(payload)?;
        staged.write_all(b"\n")?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl NoteStorage for JsonFileStorage {
    fn load(&self) -> StorageResult<NoteCollection> {
        let started_at = Instant::now();
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=notes_load module=storage status=ok source=missing_file dates=0");
                return Ok(NoteCollection::new());
            }
            Err(source) => {
                error!(
                    "event=notes_load module=storage status=error error_code=load_io_failed error={}",
                    source
                );
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<NoteCollection>(&raw) {
            Ok(collection) => {
                info!(
                    "event=notes_load module=storage status=ok source=file dates={} bytes={} duration_ms={}",
                    collection.len(),
                    raw.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(collection)
            }
            Err(source) => {
                error!(
                    "event=notes_load module=storage status=error error_code=load_parse_failed line={} column={}",
                    source.line(),
                    source.column()
                );
                Err(StorageError::Parse {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    fn save(&mut self, collection: &NoteCollection) -> StorageResult<()> {
        let started_at = Instant::now();
        let payload =
            serde_json::to_vec_pretty(collection).map_err(|source| StorageError::Serialize {
                path: self.path.clone(),
                source,
            })?;

        match self.write_atomically(&payload) {
            Ok(()) => {
                info!(
                    "event=notes_save module=storage status=ok dates={} bytes={} duration_ms={}",
                    collection.len(),
                    payload.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    "event=notes_save module=storage status=error error_code=save_io_failed duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(StorageError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JsonFileStorage;
    use crate::model::date_key::DateKey;
    use crate::model::note::{NoteCollection, NoteRecord};
    use crate::storage::NoteStorage;

    #[test]
    fn save_keeps_non_ascii_text_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let mut storage = JsonFileStorage::new(&path);

        let mut collection = NoteCollection::new();
        collection.insert(
            DateKey::parse("2024-03-01").unwrap(),
            vec![NoteRecord::new("日记", "今天很好")],
        );
        storage.save(&collection).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("日记"));
        assert!(written.contains("今天很好"));
        assert!(!written.contains("\\u"));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("notes.json");
        let mut storage = JsonFileStorage::new(&path);

        storage.save(&NoteCollection::new()).unwrap();
        assert!(path.exists());
        assert_eq!(storage.load().unwrap(), NoteCollection::new());
    }
}
