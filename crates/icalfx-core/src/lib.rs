//! Shared configuration, constants and error types for the icalfx crates.

pub mod config;
pub mod constants;
pub mod error;
