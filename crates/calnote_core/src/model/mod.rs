//! Domain model for date-keyed tagged notes.
//!
//! # Responsibility
//! - Define the persisted shapes (`DateKey`, `NoteRecord`, `NoteCollection`).
//! - Own the blank-content filtering rule shared by load and commit paths.
//!
//! # Invariants
//! - A persisted record never has blank trimmed content.
//! - A date present in a collection maps to a non-empty list.

pub mod date_key;
pub mod note;
