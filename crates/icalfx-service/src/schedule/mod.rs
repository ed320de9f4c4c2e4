//! Scheduling checks over recurring components.

mod conflict;

pub use conflict::{Conflict, ConflictOptions, detect_conflict, find_conflict};
