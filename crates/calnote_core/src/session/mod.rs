//! Editor session orchestration.
//!
//! # Responsibility
//! - Coordinate one open date's editable entries with the note store.
//! - Turn UI events (focus loss, delete, tag change) into full-date commits.
//! - Keep calendar marking in sync after every load and commit.
//!
//! # Invariants
//! - While a date is open there is always at least one entry.
//! - A commit collects every active entry, not just the one that triggered
//!   it, and writes the whole collection through to storage.
//! - Storage failures are reported and logged, never fatal; in-memory state
//!   is kept even when a save fails.
//! - Without `flush_on_date_change`, edits that were never committed are
//!   discarded when another date is opened.

use crate::config::SessionConfig;
use crate::model::date_key::DateKey;
use crate::model::note::NoteRecord;
use crate::storage::{JsonFileStorage, NoteStorage, StorageError};
use crate::store::NoteStore;
use crate::tags::{TagRegistry, TagRegistryError};
use log::{debug, info, log_enabled, warn, Level};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod entry;
pub mod event;
pub mod ui;

pub use entry::{EditorEntry, EntryId};
pub use event::{SessionEvent, TagChoice};
pub use ui::SessionUi;

/// Prompt shown by the dialog collaborator when creating a tag.
pub const NEW_TAG_PROMPT: &str = "New tag name";

pub type SessionResult<T> = Result<T, SessionError>;

/// Session-level errors.
#[derive(Debug)]
pub enum SessionError {
    /// Event addressed an entry that is not active for the open date.
    UnknownEntry(EntryId),
    /// Configured tag seed is unusable.
    InvalidConfig(TagRegistryError),
    /// Load or save failed; always recoverable.
    Storage(StorageError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEntry(id) => write!(f, "editor entry not found: {id}"),
            Self::InvalidConfig(err) => write!(f, "invalid session config: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownEntry(_) => None,
            Self::InvalidConfig(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TagRegistryError> for SessionError {
    fn from(value: TagRegistryError) -> Self {
        Self::InvalidConfig(value)
    }
}

/// Result of one commit-and-flush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    /// Date whose records were replaced.
    pub date: DateKey,
    /// Number of non-blank records now stored for `date`.
    pub saved_records: usize,
    /// Whether the write-through to storage succeeded.
    pub persisted: bool,
}

/// Editor session over one storage backend and one UI collaborator.
pub struct EditorSession<S: NoteStorage, U: SessionUi> {
    storage: S,
    ui: U,
    store: NoteStore,
    tags: TagRegistry,
    config: SessionConfig,
    open_date: DateKey,
    entries: Vec<EditorEntry>,
}

impl<U: SessionUi> EditorSession<JsonFileStorage, U> {
    /// Starts a session backed by the JSON file named in `config`.
    pub fn open_json(config: SessionConfig, ui: U, today: DateKey) -> SessionResult<Self> {
        let storage = JsonFileStorage::new(config.notes_path.clone());
        Self::start(storage, ui, config, today)
    }
}

impl<S: NoteStorage, U: SessionUi> EditorSession<S, U> {
    /// Loads the collection and opens `today`.
    ///
    /// Load failures are reported through `ui` and the session starts with an
    /// empty collection.
    ///
    /// # Errors
    /// - `InvalidConfig` when `config.default_tags` has no usable tag.
    pub fn start(storage: S, mut ui: U, config: SessionConfig, today: DateKey) -> SessionResult<Self> {
        let mut tags = TagRegistry::with_seed(&config.default_tags)?;
        let (mut store, load_error) = NoteStore::load_or_empty(&storage);
        if let Some(err) = load_error {
            ui.report_error(&SessionError::Storage(err));
        }
        let absorbed = store.resolve_tags(&mut tags);

        info!(
            "event=session_start module=session status=ok dates={} tags={} absorbed_tags={} flush_on_date_change={}",
            store.len_dates(),
            tags.known_tags().len(),
            absorbed,
            config.flush_on_date_change
        );

        let mut session = Self {
            storage,
            ui,
            store,
            tags,
            config,
            open_date: today,
            entries: Vec::new(),
        };
        session.show_date(today);
        Ok(session)
    }

    /// Switches the editor to `date` and returns its entries.
    ///
    /// Entries of the previous date are dropped; anything not yet committed
    /// is lost unless `flush_on_date_change` is set.
    pub fn open_date(&mut self, date: DateKey) -> &[EditorEntry] {
        if self.config.flush_on_date_change {
            self.commit_open_date();
        } else if log_enabled!(Level::Debug) && self.has_uncommitted_edits() {
            debug!(
                "event=session_open_date module=session status=discarded_uncommitted date={}",
                self.open_date
            );
        }
        self.show_date(date);
        &self.entries
    }

    /// Applies a text edit without committing it.
    pub fn set_entry_content(&mut self, id: EntryId, content: impl Into<String>) -> SessionResult<()> {
        let index = self.position(id)?;
        self.entries[index].content = content.into();
        Ok(())
    }

    /// Appends a blank entry with the default tag (the "+" slot).
    pub fn add_entry(&mut self) -> EntryId {
        let entry = self.blank_entry();
        let id = entry.id();
        self.entries.push(entry);
        id
    }

    /// Commits all entries of the open date after `id` lost focus.
    pub fn commit_entry(&mut self, id: EntryId) -> SessionResult<CommitReport> {
        self.position(id)?;
        Ok(self.commit_open_date())
    }

    /// Removes `id` and commits the remaining entries.
    ///
    /// When the last entry goes away a fresh blank entry takes its place; the
    /// blank is not persisted.
    pub fn delete_entry(&mut self, id: EntryId) -> SessionResult<CommitReport> {
        let index = self.position(id)?;
        self.entries.remove(index);
        let report = self.commit_open_date();
        if self.entries.is_empty() {
            let blank = self.blank_entry();
            self.entries.push(blank);
        }
        Ok(report)
    }

    /// Assigns a tag to `id`, creating it through the dialog when requested,
    /// then commits.
    ///
    /// Blank or cancelled input falls back to the default tag.
    pub fn rename_or_create_tag_for(
        &mut self,
        id: EntryId,
        choice: TagChoice,
    ) -> SessionResult<CommitReport> {
        let index = self.position(id)?;
        let known_before = self.tags.known_tags().len();
        let tag = match choice {
            TagChoice::Existing(name) => self.tags.resolve(&name),
            TagChoice::CreateNew => match self.ui.prompt_tag_name(NEW_TAG_PROMPT) {
                Some(input) => self.tags.resolve(&input),
                None => self.tags.default_tag().to_string(),
            },
        };
        if self.tags.known_tags().len() > known_before {
            info!(
                "event=tag_add module=session status=ok tags={}",
                self.tags.known_tags().len()
            );
        }
        self.entries[index].tag = tag;
        Ok(self.commit_open_date())
    }

    /// Dispatches one UI event.
    ///
    /// Returns the commit report for events that commit.
    pub fn handle(&mut self, event: SessionEvent) -> SessionResult<Option<CommitReport>> {
        match event {
            SessionEvent::DateSelected(date) => {
                self.open_date(date);
                Ok(None)
            }
            SessionEvent::ContentEdited { entry, content } => {
                self.set_entry_content(entry, content)?;
                Ok(None)
            }
            SessionEvent::FocusLost(entry) => self.commit_entry(entry).map(Some),
            SessionEvent::DeleteRequested(entry) => self.delete_entry(entry).map(Some),
            SessionEvent::TagChosen { entry, choice } => {
                self.rename_or_create_tag_for(entry, choice).map(Some)
            }
            SessionEvent::AddEntryRequested => {
                self.add_entry();
                Ok(None)
            }
        }
    }

    pub fn open_date_key(&self) -> DateKey {
        self.open_date
    }

    /// Active entries for the open date, in display order.
    pub fn entries(&self) -> &[EditorEntry] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<&EditorEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn known_tags(&self) -> &[String] {
        self.tags.known_tags()
    }

    pub fn dates_with_notes(&self) -> BTreeSet<DateKey> {
        self.store.dates_with_notes()
    }

    pub fn notes_for_date(&self, date: &DateKey) -> Vec<NoteRecord> {
        self.store.notes_for_date(date)
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn show_date(&mut self, date: DateKey) {
        self.open_date = date;
        self.entries = self
            .store
            .notes_for_date(&date)
            .into_iter()
            .map(EditorEntry::from_record)
            .collect();
        if self.entries.is_empty() {
            let blank = self.blank_entry();
            self.entries.push(blank);
        }
        debug!(
            "event=session_open_date module=session status=ok date={} entries={}",
            date,
            self.entries.len()
        );
        self.refresh_marks();
    }

    fn commit_open_date(&mut self) -> CommitReport {
        let records: Vec<NoteRecord> = self
            .entries
            .iter()
            .filter_map(EditorEntry::to_record)
            .collect();
        let saved_records = records.len();
        self.store.replace_for_date(self.open_date, records);

        let persisted = match self.storage.save(self.store.collection()) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=session_commit module=session status=unsaved date={} error_code={}",
                    self.open_date,
                    err.code()
                );
                self.ui.report_error(&SessionError::Storage(err));
                false
            }
        };
        debug!(
            "event=session_commit module=session status=ok date={} records={} persisted={}",
            self.open_date, saved_records, persisted
        );

        self.refresh_marks();
        CommitReport {
            date: self.open_date,
            saved_records,
            persisted,
        }
    }

    fn has_uncommitted_edits(&self) -> bool {
        let pending: Vec<NoteRecord> = self
            .entries
            .iter()
            .filter_map(EditorEntry::to_record)
            .collect();
        pending != self.store.notes_for_date(&self.open_date)
    }

    fn refresh_marks(&mut self) {
        let marked = self.store.dates_with_notes();
        self.ui.mark_dates(&marked);
    }

    fn blank_entry(&self) -> EditorEntry {
        EditorEntry::blank(self.tags.default_tag())
    }

    fn position(&self, id: EntryId) -> SessionResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or(SessionError::UnknownEntry(id))
    }
}
