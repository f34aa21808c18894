//! Flutter bridge for the calendar notes core.

pub mod api;
