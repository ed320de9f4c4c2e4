/// Maximum content line length in octets, excluding the line break (RFC 5545 §3.1).
pub const MAX_LINE_OCTETS: usize = 75;

/// Consecutive recurrence periods without a single candidate before expansion gives up.
pub const DEFAULT_MAX_EMPTY_PERIODS: u32 = 100_000;

/// Last calendar year the recurrence engine will generate into.
pub const DEFAULT_MAX_YEAR: i32 = 9999;

/// Occurrences pulled per component when sweeping for schedule conflicts.
pub const DEFAULT_CONFLICT_MAX_OCCURRENCES: u32 = 5_000;

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Optional configuration file read next to the working directory.
pub const CONFIG_FILE_NAME: &str = "icalfx.toml";
