//! Core domain logic for calendar notes.
//! This crate is the single source of truth for note/date/tag invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;
pub mod tags;

pub use config::SessionConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date_key::{DateKey, DateKeyError};
pub use model::note::{normalize_records, NoteCollection, NoteRecord};
pub use session::{
    CommitReport, EditorEntry, EditorSession, EntryId, SessionError, SessionEvent, SessionResult,
    SessionUi, TagChoice, NEW_TAG_PROMPT,
};
pub use storage::{JsonFileStorage, MemoryStorage, NoteStorage, StorageError, StorageResult};
pub use store::NoteStore;
pub use tags::{TagRegistry, TagRegistryError, DEFAULT_TAGS};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
