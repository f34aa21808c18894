//! Persistence adapters for the full note collection.
//!
//! # Responsibility
//! - Define the load/save contract used by the note store and session.
//! - Keep file format and I/O details out of session orchestration.
//!
//! # Invariants
//! - A missing backing file loads as an empty collection, never an error.
//! - `save` always writes the whole collection; there is no partial update.
//! - Failed saves never roll back caller state.

use crate::model::note::NoteCollection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Load/save failures, each carrying the backing location.
#[derive(Debug)]
pub enum StorageError {
    /// Backing file exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// Backing file was read but is not a valid note collection.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Collection could not be written to the backing location.
    Write { path: PathBuf, source: io::Error },
    /// Collection could not be encoded.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Returns `true` for failures raised while loading.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "load_io_failed",
            Self::Parse { .. } => "load_parse_failed",
            Self::Write { .. } => "save_io_failed",
            Self::Serialize { .. } => "save_encode_failed",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read notes from `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "notes file `{}` is not valid: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to save notes to `{}`: {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(f, "failed to encode notes for `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Parse { source, .. } | Self::Serialize { source, .. } => Some(source),
        }
    }
}

/// Whole-collection persistence contract.
pub trait NoteStorage {
    /// Loads the full collection. Missing backing data yields an empty map.
    fn load(&self) -> StorageResult<NoteCollection>;
    /// Overwrites the backing data with `collection`.
    fn save(&mut self, collection: &NoteCollection) -> StorageResult<()>;
}
