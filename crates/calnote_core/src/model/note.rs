//! Note record and collection shapes.

use crate::model::date_key::DateKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full note collection keyed by day.
///
/// `BTreeMap` keeps keys in chronological order so serialized output is
/// deterministic.
pub type NoteCollection = BTreeMap<DateKey, Vec<NoteRecord>>;

/// One persisted note: a category tag plus free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Category label; expected to be known by the tag registry.
    ///
    /// Missing in older files; loads as empty and is resolved to the
    /// default tag when a session starts.
    #[serde(default)]
    pub tag: String,
    /// Plain text body, trimmed before persistence.
    #[serde(default)]
    pub content: String,
}

impl NoteRecord {
    pub fn new(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            content: content.into(),
        }
    }

    /// Returns the persistable form of this record.
    ///
    /// Both fields are trimmed. Returns `None` when the trimmed content is
    /// empty; such records are skipped silently rather than reported.
    pub fn normalized(&self) -> Option<NoteRecord> {
        let content = self.content.trim();
        if content.is_empty() {
            return None;
        }
        Some(NoteRecord {
            tag: self.tag.trim().to_string(),
            content: content.to_string(),
        })
    }
}

/// Trims every record and drops blank ones, keeping input order.
pub fn normalize_records<'a>(records: impl IntoIterator<Item = &'a NoteRecord>) -> Vec<NoteRecord> {
    records
        .into_iter()
        .filter_map(NoteRecord::normalized)
        .collect()
}
