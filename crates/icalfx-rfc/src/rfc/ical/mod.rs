//! iCalendar (RFC 5545) support.
//!
//! - `core`: temporal values, properties, parameters, recurrence rules and components
//! - `parse`: content-line lexer and document parser
//! - `build`: escaping, folding and serialization
//! - `expand`: recurrence rule engine, cached recurrence streams and time zones
//! - `validation`: non-fatal component and rule checks

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;
pub mod validation;

#[cfg(test)]
mod tests;
