//! In-memory note store.
//!
//! # Responsibility
//! - Hold the running collection as the single source of truth.
//! - Expose date-scoped read/replace operations and calendar marking data.
//!
//! # Invariants
//! - A date key in the store always maps to a non-empty record list.
//! - Readers receive owned copies; internal lists are never aliased out
//!   mutably.

use crate::model::date_key::DateKey;
use crate::model::note::{normalize_records, NoteCollection, NoteRecord};
use crate::storage::{NoteStorage, StorageError};
use crate::tags::TagRegistry;
use log::warn;
use std::collections::BTreeSet;

/// Date-keyed note store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    notes: NoteCollection,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an externally sourced collection.
    ///
    /// Records are trimmed, blank ones dropped, and dates left without
    /// records removed, so hand-edited files cannot break store invariants.
    pub fn from_collection(collection: NoteCollection) -> Self {
        let mut dropped = 0usize;
        let mut notes = NoteCollection::new();
        for (date, records) in collection {
            let kept = normalize_records(&records);
            dropped += records.len() - kept.len();
            if !kept.is_empty() {
                notes.insert(date, kept);
            }
        }
        if dropped > 0 {
            warn!(
                "event=store_normalize module=store status=ok dropped_blank_records={}",
                dropped
            );
        }
        Self { notes }
    }

    /// Loads through `storage`, recovering to an empty store on failure.
    ///
    /// The failure is handed back to the caller for user notification; the
    /// store itself is always usable.
    pub fn load_or_empty<S: NoteStorage>(storage: &S) -> (Self, Option<StorageError>) {
        match storage.load() {
            Ok(collection) => (Self::from_collection(collection), None),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=recovered error_code={} fallback=empty",
                    err.code()
                );
                (Self::new(), Some(err))
            }
        }
    }

    /// Returns an owned copy of the records for `date` (empty if none).
    pub fn notes_for_date(&self, date: &DateKey) -> Vec<NoteRecord> {
        self.notes.get(date).cloned().unwrap_or_default()
    }

    /// Replaces the records for `date` with exactly `records`.
    ///
    /// Callers filter blank content first. An empty `records` removes the
    /// date entirely.
    pub fn replace_for_date(&mut self, date: DateKey, records: Vec<NoteRecord>) {
        if records.is_empty() {
            self.notes.remove(&date);
        } else {
            self.notes.insert(date, records);
        }
    }

    /// Returns every date that currently has at least one record.
    pub fn dates_with_notes(&self) -> BTreeSet<DateKey> {
        self.notes
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(date, _)| *date)
            .collect()
    }

    /// Routes every stored tag through `registry`.
    ///
    /// Unknown tags are registered; blank tags become the default tag.
    /// Returns how many tags the registry gained.
    pub fn resolve_tags(&mut self, registry: &mut TagRegistry) -> usize {
        let known_before = registry.known_tags().len();
        for record in self.notes.values_mut().flatten() {
            record.tag = registry.resolve(&record.tag);
        }
        registry.known_tags().len() - known_before
    }

    /// Borrowed view of the whole collection for persistence.
    pub fn collection(&self) -> &NoteCollection {
        &self.notes
    }

    /// Number of dates with notes.
    pub fn len_dates(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
