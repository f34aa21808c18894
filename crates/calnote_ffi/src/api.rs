//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the calendar editor session to Dart via FRB.
//! - Translate UI callbacks (date picked, field blurred, delete, tag picked)
//!   into session events and return a full view snapshot after each call.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One process-wide session; calls are serialized by a mutex.
//! - Every response carries the errors the session reported during the call.

use calnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DateKey, EditorSession, EntryId, JsonFileStorage, SessionConfig, SessionError, SessionEvent,
    SessionUi, TagChoice,
};
use log::warn;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

type CalendarSession = EditorSession<JsonFileStorage, FfiUi>;

static SESSION: Mutex<Option<CalendarSession>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One editable note slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    /// Session-scoped entry id, passed back in entry calls.
    pub entry_id: String,
    pub tag: String,
    pub content: String,
}

/// Full editor snapshot returned by every calendar call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    /// Whether the requested operation was applied.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Open date as `YYYY-MM-DD`; empty when no session is open.
    pub date: String,
    /// Entries for the open date in display order.
    pub entries: Vec<EntryView>,
    /// Tags offered by the tag picker; first is the default.
    pub known_tags: Vec<String>,
    /// Dates the calendar should highlight.
    pub marked_dates: Vec<String>,
    /// Non-fatal errors to show (load/save failures).
    pub errors: Vec<String>,
}

impl CalendarView {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            date: String::new(),
            entries: Vec::new(),
            known_tags: Vec::new(),
            marked_dates: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn snapshot(session: &mut CalendarSession, message: impl Into<String>) -> Self {
        let errors = session.ui_mut().take_errors();
        Self {
            ok: true,
            message: message.into(),
            date: session.open_date_key().to_string(),
            entries: session
                .entries()
                .iter()
                .map(|entry| EntryView {
                    entry_id: entry.id().to_string(),
                    tag: entry.tag.clone(),
                    content: entry.content.clone(),
                })
                .collect(),
            known_tags: session.known_tags().to_vec(),
            marked_dates: session.ui().marked.clone(),
            errors,
        }
    }
}

/// Opens (or reopens) the calendar over the notes file at `notes_path`.
///
/// `today` selects the initial date (`YYYY-MM-DD`); `None` uses the local
/// current day.
///
/// # FFI contract
/// - Replaces any previously opened session without committing it.
/// - A missing file opens an empty calendar; an unreadable one opens an
///   empty calendar and reports the failure in `errors`.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_open(notes_path: String, today: Option<String>) -> CalendarView {
    let notes_path = notes_path.trim();
    if notes_path.is_empty() {
        return CalendarView::failure("calendar_open failed: notes_path cannot be empty");
    }
    let today = match today.as_deref().map(DateKey::parse).transpose() {
        Ok(value) => value.unwrap_or_else(DateKey::today),
        Err(err) => return CalendarView::failure(format!("calendar_open failed: {err}")),
    };

    let mut config = SessionConfig::default();
    config.notes_path = notes_path.into();

    let mut guard = lock_session();
    match EditorSession::open_json(config, FfiUi::default(), today) {
        Ok(session) => {
            let session = guard.insert(session);
            CalendarView::snapshot(session, "Calendar opened.")
        }
        Err(err) => CalendarView::failure(format!("calendar_open failed: {err}")),
    }
}

/// Returns the current view without changing anything.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_view() -> CalendarView {
    with_session("calendar_view", |_| Ok("OK."))
}

/// Handles a calendar date selection.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_select_date(date: String) -> CalendarView {
    let date = match DateKey::parse(date.trim()) {
        Ok(date) => date,
        Err(err) => return CalendarView::failure(format!("calendar_select_date failed: {err}")),
    };
    with_session("calendar_select_date", |session| {
        session.handle(SessionEvent::DateSelected(date))?;
        Ok("Date opened.")
    })
}

/// Records typed text for one entry; nothing is saved until blur.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_edit_entry(entry_id: String, content: String) -> CalendarView {
    with_entry("calendar_edit_entry", &entry_id, |session, entry| {
        session.handle(SessionEvent::ContentEdited { entry, content })?;
        Ok("Entry edited.")
    })
}

/// Handles focus loss on one entry: commits the whole open date.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_commit_entry(entry_id: String) -> CalendarView {
    with_entry("calendar_commit_entry", &entry_id, |session, entry| {
        session.handle(SessionEvent::FocusLost(entry))?;
        Ok("Notes saved.")
    })
}

/// Deletes one entry and commits the remaining ones.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_delete_entry(entry_id: String) -> CalendarView {
    with_entry("calendar_delete_entry", &entry_id, |session, entry| {
        session.handle(SessionEvent::DeleteRequested(entry))?;
        Ok("Entry deleted.")
    })
}

/// Appends a blank entry (the "+" slot).
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_add_entry() -> CalendarView {
    with_session("calendar_add_entry", |session| {
        session.handle(SessionEvent::AddEntryRequested)?;
        Ok("Entry added.")
    })
}

/// Assigns an existing (or typed) tag to one entry and commits.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_choose_tag(entry_id: String, tag: String) -> CalendarView {
    with_entry("calendar_choose_tag", &entry_id, |session, entry| {
        session.handle(SessionEvent::TagChosen {
            entry,
            choice: TagChoice::Existing(tag),
        })?;
        Ok("Tag updated.")
    })
}

/// Creates a tag from the Dart dialog result and assigns it.
///
/// `name = None` means the dialog was cancelled; the entry then gets the
/// default tag.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_create_tag(entry_id: String, name: Option<String>) -> CalendarView {
    with_entry("calendar_create_tag", &entry_id, |session, entry| {
        session.ui_mut().pending_tag_name = name;
        let result = session.handle(SessionEvent::TagChosen {
            entry,
            choice: TagChoice::CreateNew,
        });
        session.ui_mut().pending_tag_name = None;
        result?;
        Ok("Tag updated.")
    })
}

/// UI collaborator backed by values exchanged with Dart.
#[derive(Debug, Default)]
struct FfiUi {
    marked: Vec<String>,
    pending_tag_name: Option<String>,
    errors: Vec<String>,
}

impl FfiUi {
    fn take_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }
}

impl SessionUi for FfiUi {
    fn mark_dates(&mut self, dates: &BTreeSet<DateKey>) {
        self.marked = dates.iter().map(DateKey::to_string).collect();
    }

    fn prompt_tag_name(&mut self, _prompt: &str) -> Option<String> {
        self.pending_tag_name.take()
    }

    fn report_error(&mut self, error: &SessionError) {
        self.errors.push(error.to_string());
    }
}

fn lock_session() -> MutexGuard<'static, Option<CalendarSession>> {
    // Session state stays consistent across a panicked call: every mutation
    // is a whole-field assignment.
    SESSION.lock().unwrap_or_else(|poisoned| {
        warn!("event=ffi_session_lock module=ffi status=recovered_poison");
        poisoned.into_inner()
    })
}

fn with_session(
    op: &str,
    f: impl FnOnce(&mut CalendarSession) -> Result<&'static str, SessionError>,
) -> CalendarView {
    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return CalendarView::failure(format!("{op} failed: calendar is not open"));
    };
    match f(session) {
        Ok(message) => CalendarView::snapshot(session, message),
        Err(err) => {
            let mut view = CalendarView::snapshot(session, format!("{op} failed: {err}"));
            view.ok = false;
            view
        }
    }
}

fn with_entry(
    op: &str,
    entry_id: &str,
    f: impl FnOnce(&mut CalendarSession, EntryId) -> Result<&'static str, SessionError>,
) -> CalendarView {
    let entry = match entry_id.parse::<EntryId>() {
        Ok(entry) => entry,
        Err(err) => {
            return CalendarView::failure(format!(
                "{op} failed: invalid entry id `{entry_id}`: {err}"
            ))
        }
    };
    with_session(op, |session| f(session, entry))
}

#[cfg(test)]
mod tests {
    use super::{
        calendar_add_entry, calendar_choose_tag, calendar_commit_entry, calendar_create_tag,
        calendar_delete_entry, calendar_edit_entry, calendar_open, calendar_select_date,
        calendar_view, core_version, init_logging, ping,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn calendar_open_rejects_bad_input() {
        assert!(!calendar_open("  ".to_string(), None).ok);
        let view = calendar_open("/tmp/unused.json".to_string(), Some("2024-2-1".to_string()));
        assert!(!view.ok);
        assert!(view.message.contains("YYYY-MM-DD"));
        assert!(!calendar_select_date("tomorrow".to_string()).ok);
        assert!(!calendar_commit_entry("not-a-uuid".to_string()).ok);
    }

    // One test drives the shared process-wide session end to end.
    #[test]
    fn calendar_flow_persists_and_reloads_notes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let path_str = path.to_str().unwrap().to_string();

        let opened = calendar_open(path_str.clone(), Some("2024-03-01".to_string()));
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(opened.date, "2024-03-01");
        assert_eq!(opened.entries.len(), 1);
        assert!(opened.errors.is_empty());
        let first = opened.entries[0].entry_id.clone();

        let edited = calendar_edit_entry(first.clone(), "  hello  ".to_string());
        assert!(edited.ok, "{}", edited.message);
        assert!(!path.exists());

        let tagged = calendar_choose_tag(first.clone(), "日记".to_string());
        assert!(tagged.ok, "{}", tagged.message);
        assert_eq!(tagged.marked_dates, vec!["2024-03-01".to_string()]);
        assert!(path.exists());

        let added = calendar_add_entry();
        assert_eq!(added.entries.len(), 2);
        let second = added.entries[1].entry_id.clone();
        calendar_edit_entry(second.clone(), "ran 5k".to_string());
        let created = calendar_create_tag(second.clone(), Some("Health".to_string()));
        assert!(created.ok, "{}", created.message);
        assert!(created.known_tags.contains(&"Health".to_string()));
        assert_eq!(created.entries[1].tag, "Health");

        let committed = calendar_commit_entry(first.clone());
        assert!(committed.ok, "{}", committed.message);

        let reopened = calendar_open(path_str.clone(), Some("2024-03-01".to_string()));
        assert_eq!(reopened.entries.len(), 2);
        assert_eq!(reopened.entries[0].content, "hello");
        assert_eq!(reopened.entries[1].tag, "Health");
        assert!(reopened.known_tags.contains(&"Health".to_string()));

        let stale = calendar_commit_entry(first);
        assert!(!stale.ok);
        assert!(stale.message.contains("not found"));

        let mut view = reopened;
        while view.entries.len() > 1 || !view.entries[0].content.is_empty() {
            let id = view.entries[0].entry_id.clone();
            view = calendar_delete_entry(id);
            assert!(view.ok, "{}", view.message);
        }
        assert!(view.marked_dates.is_empty());

        let other_day = calendar_select_date("2024-03-02".to_string());
        assert_eq!(other_day.date, "2024-03-02");
        assert_eq!(calendar_view().date, "2024-03-02");
    }
}
