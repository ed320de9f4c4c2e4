//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default number of occurrences listed per component.
pub const DEFAULT_OCCURRENCE_LIMIT: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "icalfx")]
#[command(about = "Inspect, expand and check iCalendar files")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to icalfx.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the occurrences of recurring components
    Occurrences {
        /// iCalendar file to read
        file: PathBuf,

        /// Only expand the component with this UID
        #[arg(long)]
        uid: Option<String>,

        /// First value to list, as DATE or DATE-TIME (e.g. 20260101T090000)
        #[arg(long, value_name = "DATE")]
        from: Option<String>,

        /// Occurrences listed per component
        #[arg(short = 'n', long, default_value_t = DEFAULT_OCCURRENCE_LIMIT)]
        limit: usize,

        /// Output occurrences as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report semantic problems; exits non-zero if any are found
    Validate {
        /// iCalendar file to read
        file: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a component for busy-time conflicts with the rest of the file
    Conflicts {
        /// iCalendar file to read
        file: PathBuf,

        /// UID of the component to check
        #[arg(long, value_name = "UID")]
        candidate: String,
    },
    /// Re-serialize the file in canonical form
    Fold {
        /// iCalendar file to read
        file: PathBuf,
    },
}
