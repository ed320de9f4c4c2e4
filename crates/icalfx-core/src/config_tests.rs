//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_defaults_match_constants() {
    let settings = Settings::default();

    assert_eq!(
        settings.recurrence.max_empty_periods,
        DEFAULT_MAX_EMPTY_PERIODS
    );
    assert_eq!(settings.recurrence.max_year, DEFAULT_MAX_YEAR);
    assert_eq!(
        settings.conflict.max_occurrences,
        DEFAULT_CONFLICT_MAX_OCCURRENCES
    );
    assert_eq!(settings.output.line_ending, LineEnding::Crlf);
    assert_eq!(settings.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_line_ending_strings() {
    assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
    assert_eq!(LineEnding::Lf.as_str(), "\n");
}

#[test_log::test]
fn test_load_from_toml_file() {
    let dir = std::env::temp_dir().join(format!("icalfx-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.toml");
    std::fs::write(
        &path,
        "[recurrence]\nmax_year = 2100\n\n[output]\nline_ending = \"lf\"\n\n[conflict]\nmax_occurrences = 42\n",
    )
    .unwrap();

    let settings = Settings::load_from(path.to_str().unwrap(), true).unwrap();
    assert_eq!(settings.recurrence.max_year, 2100);
    assert_eq!(
        settings.recurrence.max_empty_periods,
        DEFAULT_MAX_EMPTY_PERIODS
    );
    assert_eq!(settings.output.line_ending, LineEnding::Lf);
    assert_eq!(settings.conflict.max_occurrences, 42);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_required_file_fails() {
    let result = Settings::load_from("/nonexistent/icalfx-settings.toml", true);
    assert!(result.is_err());
}

#[test]
fn test_missing_optional_file_uses_defaults() {
    let settings = Settings::load_from("/nonexistent/icalfx-settings.toml", false).unwrap();
    assert_eq!(settings.recurrence.max_year, DEFAULT_MAX_YEAR);
}

#[test]
fn test_validate_rejects_out_of_range_values() {
    let mut settings = Settings::default();
    assert!(settings.validate().is_ok());

    settings.conflict.max_occurrences = 0;
    assert!(matches!(
        settings.validate(),
        Err(CoreError::InvalidSetting {
            key: "conflict.max_occurrences",
            ..
        })
    ));

    let mut settings = Settings::default();
    settings.recurrence.max_empty_periods = 0;
    assert!(matches!(
        settings.validate(),
        Err(CoreError::InvalidSetting {
            key: "recurrence.max_empty_periods",
            ..
        })
    ));
}

#[test_log::test]
fn test_load_from_rejects_invalid_max_year() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[recurrence]\nmax_year = 12000\n").unwrap();

    let err = Settings::load_from(path.to_str().unwrap(), true).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidSetting {
            key: "recurrence.max_year",
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "Invalid setting recurrence.max_year: 12000 is outside 1..=9999"
    );
}

#[test]
fn test_missing_required_file_is_a_config_error() {
    let result = Settings::load_from("/nonexistent/icalfx-settings.toml", true);
    assert!(matches!(result, Err(CoreError::ConfigError(_))));
}
