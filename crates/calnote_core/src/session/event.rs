//! Named UI events consumed by the editor session.

use crate::model::date_key::DateKey;
use crate::session::entry::EntryId;

/// Tag selection coming from an entry's tag picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagChoice {
    /// User picked (or typed) a tag name.
    Existing(String),
    /// User picked the "new tag" item; the session prompts for a name.
    CreateNew,
}

/// Discrete UI events. Each one maps to exactly one session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Calendar emitted a selected day.
    DateSelected(DateKey),
    /// Text of an entry changed; not persisted until a commit.
    ContentEdited { entry: EntryId, content: String },
    /// Entry's text field lost focus.
    FocusLost(EntryId),
    /// User asked to delete an entry.
    DeleteRequested(EntryId),
    /// User changed an entry's tag.
    TagChosen { entry: EntryId, choice: TagChoice },
    /// User activated the "+" slot.
    AddEntryRequested,
}
