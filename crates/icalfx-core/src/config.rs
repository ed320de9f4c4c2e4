use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_CONFLICT_MAX_OCCURRENCES, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_EMPTY_PERIODS, DEFAULT_MAX_YEAR,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub recurrence: RecurrenceConfig,
    #[serde(default)]
    pub conflict: ConflictConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Safety bounds for recurrence expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecurrenceConfig {
    pub max_empty_periods: u32,
    pub max_year: i32,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            max_empty_periods: DEFAULT_MAX_EMPTY_PERIODS,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConflictConfig {
    pub max_occurrences: u32,
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_CONFLICT_MAX_OCCURRENCES,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub line_ending: LineEnding,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `icalfx.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the
    /// configuration fails.
    pub fn load() -> CoreResult<Self> {
        Self::load_from(CONFIG_FILE_NAME, false)
    }

    /// ## Summary
    /// Loads configuration using `path` as the TOML source.
    ///
    /// ## Errors
    /// Returns an error if `required` is set and the file is missing, if
    /// deserializing the merged sources fails, or if a value is out of range.
    pub fn load_from(path: &str, required: bool) -> CoreResult<Self> {
        let settings = Config::builder()
            .set_default(
                "recurrence.max_empty_periods",
                i64::from(DEFAULT_MAX_EMPTY_PERIODS),
            )?
            .set_default("recurrence.max_year", i64::from(DEFAULT_MAX_YEAR))?
            .set_default(
                "conflict.max_occurrences",
                i64::from(DEFAULT_CONFLICT_MAX_OCCURRENCES),
            )?
            .set_default("output.line_ending", "crlf")?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            // TOML file
            .add_source(config::File::with_name(path).required(required))
            // Environment, e.g. ICALFX_LOGGING__LEVEL=trace
            .add_source(
                config::Environment::with_prefix("ICALFX")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(config::Case::Snake)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks value ranges that deserialization cannot express.
    ///
    /// ## Errors
    /// Returns `InvalidSetting` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.recurrence.max_empty_periods == 0 {
            return Err(CoreError::InvalidSetting {
                key: "recurrence.max_empty_periods",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=DEFAULT_MAX_YEAR).contains(&self.recurrence.max_year) {
            return Err(CoreError::InvalidSetting {
                key: "recurrence.max_year",
                reason: format!(
                    "{} is outside 1..={DEFAULT_MAX_YEAR}",
                    self.recurrence.max_year
                ),
            });
        }
        if self.conflict.max_occurrences == 0 {
            return Err(CoreError::InvalidSetting {
                key: "conflict.max_occurrences",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");
    Ok(settings)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
