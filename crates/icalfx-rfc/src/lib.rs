//! iCalendar (RFC 5545) object model, content-line codec and recurrence engine.

pub mod error;
pub mod rfc;
