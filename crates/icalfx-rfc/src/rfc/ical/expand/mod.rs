//! Recurrence expansion.
//!
//! - `engine`: RRULE expansion from a seed value
//! - `stream`: cached per-component occurrence streams with RDATE/EXDATE
//! - `timezone`: TZID resolution and UTC conversion

mod engine;
mod stream;
pub mod timezone;

pub use engine::{RecurrenceIter, RecurrenceLimits};
pub use stream::{RecurrenceCache, Recurrences};
pub use timezone::{ConversionError, TimeZoneResolver};
