//! Collaborator contract for the excluded GUI layer.

use crate::model::date_key::DateKey;
use crate::session::SessionError;
use std::collections::BTreeSet;

/// Calendar, dialog, and notification hooks the session calls into.
///
/// Implementations must not call back into the session.
pub trait SessionUi {
    /// Replaces the set of highlighted calendar days.
    fn mark_dates(&mut self, dates: &BTreeSet<DateKey>);

    /// Asks the user for a tag name. `None` means the dialog was cancelled.
    fn prompt_tag_name(&mut self, prompt: &str) -> Option<String>;

    /// Shows a non-fatal error to the user.
    fn report_error(&mut self, error: &SessionError);
}
