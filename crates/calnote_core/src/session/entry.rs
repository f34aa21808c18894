//! Transient editor entries.
//!
//! An entry is what a UI shows as one tag selector plus one text field. It is
//! never persisted directly; commits turn entries back into `NoteRecord`s.

use crate::model::note::NoteRecord;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Session-scoped identity used by UI events to address one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One editable note slot for the open date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorEntry {
    id: EntryId,
    /// Selected tag.
    pub tag: String,
    /// Current text, possibly untrimmed or blank while editing.
    pub content: String,
}

impl EditorEntry {
    /// Creates an empty entry carrying `tag`.
    pub fn blank(tag: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            tag: tag.into(),
            content: String::new(),
        }
    }

    /// Materializes a stored record as an editable entry.
    pub fn from_record(record: NoteRecord) -> Self {
        Self {
            id: EntryId::new(),
            tag: record.tag,
            content: record.content,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Returns `true` when the entry would be skipped by a commit.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Returns the persistable record, or `None` for blank content.
    pub fn to_record(&self) -> Option<NoteRecord> {
        NoteRecord::new(self.tag.as_str(), self.content.as_str()).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorEntry, EntryId};
    use crate::model::note::NoteRecord;

    #[test]
    fn entry_ids_are_unique_and_parse_back() {
        let first = EntryId::new();
        let second = EntryId::new();
        assert_ne!(first, second);
        assert_eq!(first.to_string().parse::<EntryId>().unwrap(), first);
    }

    #[test]
    fn to_record_trims_and_skips_blank() {
        let mut entry = EditorEntry::blank("日记");
        assert!(entry.is_blank());
        assert_eq!(entry.to_record(), None);

        entry.content = "  hello  ".to_string();
        assert_eq!(entry.to_record(), Some(NoteRecord::new("日记", "hello")));
    }
}
