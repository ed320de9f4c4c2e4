//! Scheduling services built on the icalfx object model.

pub mod error;
pub mod schedule;
