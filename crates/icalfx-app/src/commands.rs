//! Command implementations. Each produces the text to print and whether the
//! process should exit successfully.

use std::path::Path;

use chrono::SecondsFormat;
use icalfx_core::config::{Settings, load_config};
use icalfx_rfc::error::RfcError;
use icalfx_rfc::rfc::ical::build::ContentOptions;
use icalfx_rfc::rfc::ical::core::{Component, ICalendar, Temporal};
use icalfx_rfc::rfc::ical::expand::RecurrenceLimits;
use icalfx_rfc::rfc::ical::parse::parse_temporal;
use icalfx_service::schedule::{ConflictOptions, find_conflict};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::error::{AppError, AppResult};

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: String,
    pub success: bool,
}

impl Report {
    const fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

/// One listed occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceRow {
    pub uid: Option<String>,
    /// Content-line form of the value.
    pub value: String,
    pub value_type: &'static str,
    /// RFC 3339 UTC instant. Floating values and dates read as UTC.
    pub utc: String,
}

impl OccurrenceRow {
    fn new(component: &Component, value: &Temporal) -> Self {
        Self {
            uid: component.uid().map(str::to_string),
            value: value.to_string(),
            value_type: value.date_time_type().as_str(),
            utc: value.to_utc().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    errors: &'a [String],
}

/// ## Summary
/// Loads settings from `path` when given, else from `icalfx.toml`, `.env`
/// and the environment.
///
/// ## Errors
/// Returns `CoreError` if a required file is missing or a value is invalid.
pub fn load_settings(path: Option<&Path>) -> AppResult<Settings> {
    Ok(match path {
        Some(path) => Settings::load_from(&path.to_string_lossy(), true)?,
        None => load_config()?,
    })
}

/// ## Summary
/// Reads and parses a calendar file, applying `limits` to every component.
///
/// ## Errors
/// Returns an error if the file cannot be read or does not parse.
pub fn load_calendar(path: &Path, limits: RecurrenceLimits) -> AppResult<ICalendar> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut calendar = ICalendar::parse(&text).map_err(RfcError::from)?;

    for component in &mut calendar.root.children {
        component.set_recurrence_limits(limits);
    }
    tracing::debug!(
        path = %path.display(),
        components = calendar.root.children.len(),
        "Calendar loaded"
    );
    Ok(calendar)
}

/// ## Summary
/// Runs the parsed command line with `settings`.
///
/// ## Errors
/// Returns an error if the input cannot be read or parsed, or if a named UID
/// is missing.
pub fn run(cli: &Cli, settings: &Settings) -> AppResult<Report> {
    let limits = RecurrenceLimits::from(&settings.recurrence);

    match &cli.command {
        Command::Occurrences {
            file,
            uid,
            from,
            limit,
            json,
        } => {
            let calendar = load_calendar(file, limits)?;
            let from = from.as_deref().map(parse_from).transpose()?;
            let rows = occurrences(&calendar, uid.as_deref(), from.as_ref(), *limit)?;
            Ok(Report::ok(render_occurrences(&rows, *json)?))
        }
        Command::Validate { file, json } => validate(&load_calendar(file, limits)?, *json),
        Command::Conflicts { file, candidate } => conflicts(
            &load_calendar(file, limits)?,
            candidate,
            &ConflictOptions::from(&settings.conflict),
        ),
        Command::Fold { file } => Ok(Report::ok(
            load_calendar(file, limits)?.to_content_with(&ContentOptions::from(&settings.output)),
        )),
    }
}

fn parse_from(text: &str) -> AppResult<Temporal> {
    parse_temporal(text, None, false, 1, 1).map_err(|e| AppError::RfcError(e.into()))
}

/// ## Summary
/// Lists up to `limit` occurrences per component, at or after `from`.
///
/// Without a UID every schedulable component with a DTSTART is expanded.
///
/// ## Errors
/// Returns `NotFound` if `uid` names no top-level component.
pub fn occurrences(
    calendar: &ICalendar,
    uid: Option<&str>,
    from: Option<&Temporal>,
    limit: usize,
) -> AppResult<Vec<OccurrenceRow>> {
    let components: Vec<&Component> = match uid {
        Some(uid) => vec![
            calendar
                .find_by_uid(uid)
                .ok_or_else(|| AppError::NotFound(format!("component with UID {uid}")))?,
        ],
        None => calendar
            .root
            .children
            .iter()
            .filter(|c| c.kind().is_schedulable() && c.dtstart().is_some())
            .collect(),
    };

    let mut rows = Vec::new();
    for component in components {
        let values = match from {
            Some(from) => component.stream_recurrences(from),
            None => component.recurrences(),
        };
        rows.extend(
            values
                .take(limit)
                .map(|value| OccurrenceRow::new(component, &value)),
        );
    }
    Ok(rows)
}

fn render_occurrences(rows: &[OccurrenceRow], json: bool) -> AppResult<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(rows)?));
    }

    let mut out = String::new();
    for row in rows {
        out.push_str(row.uid.as_deref().unwrap_or("-"));
        out.push('\t');
        out.push_str(&row.value);
        out.push('\n');
    }
    Ok(out)
}

/// ## Summary
/// Validates the whole calendar. Fails when any issue is reported.
///
/// ## Errors
/// Returns an error if JSON encoding fails.
pub fn validate(calendar: &ICalendar, json: bool) -> AppResult<Report> {
    let errors = calendar.errors();
    let success = errors.is_empty();

    let output = if json {
        let report = ValidationReport {
            valid: success,
            errors: &errors,
        };
        format!("{}\n", serde_json::to_string(&report)?)
    } else if success {
        "OK\n".to_string()
    } else {
        errors.iter().map(|e| format!("{e}\n")).collect()
    };

    Ok(Report { output, success })
}

/// ## Summary
/// Checks the component with UID `candidate` against the rest of the
/// calendar. Fails when a conflict is found.
///
/// ## Errors
/// Returns an error if the UID is missing or the component has no DTSTART.
pub fn conflicts(
    calendar: &ICalendar,
    candidate: &str,
    options: &ConflictOptions,
) -> AppResult<Report> {
    Ok(match find_conflict(calendar, candidate, options)? {
        Some(conflict) => Report {
            output: format!("{}\n", conflict.status()),
            success: false,
        },
        None => Report::ok("No conflict\n".to_string()),
    })
}
