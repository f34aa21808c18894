//! Session configuration.
//!
//! # Responsibility
//! - Collect the few knobs an embedder sets before starting a session.
//!
//! # Invariants
//! - Configuration is plain data; nothing here touches the filesystem.

use crate::storage::json_file::DEFAULT_NOTES_FILE_NAME;
use crate::tags::DEFAULT_TAGS;
use std::path::{Path, PathBuf};

/// Editor session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Backing JSON file for the note collection.
    pub notes_path: PathBuf,
    /// Tag seed; the first non-blank tag becomes the default tag.
    pub default_tags: Vec<String>,
    /// Commit the open date before switching to another date.
    ///
    /// Off by default: only focus-loss, delete, and tag changes commit, and
    /// edits never committed are discarded on date change.
    pub flush_on_date_change: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            notes_path: PathBuf::from(DEFAULT_NOTES_FILE_NAME),
            default_tags: DEFAULT_TAGS.iter().map(|tag| (*tag).to_string()).collect(),
            flush_on_date_change: false,
        }
    }
}

impl SessionConfig {
    /// Default configuration with the notes file placed inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            notes_path: dir.as_ref().join(DEFAULT_NOTES_FILE_NAME),
            ..Self::default()
        }
    }

    pub fn with_default_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.default_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flush_on_date_change(mut self, enabled: bool) -> Self {
        self.flush_on_date_change = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::SessionConfig;
    use std::path::Path;

    #[test]
    fn default_points_at_relative_notes_file() {
        let config = SessionConfig::default();
        assert_eq!(config.notes_path, Path::new("notes.json"));
        assert_eq!(config.default_tags[0], "金融");
        assert!(!config.flush_on_date_change);
    }

    #[test]
    fn in_dir_joins_file_name() {
        let config = SessionConfig::in_dir("/data/calnote");
        assert_eq!(config.notes_path, Path::new("/data/calnote/notes.json"));
    }
}
