//! Loading of the timetable period files into memory.
//!
//! The data directory holds an `index.json` listing the published
//! timetable periods and one JSON file per period. The period files are
//! hand-maintained and may carry `//` line comments, which are stripped
//! before parsing.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::error::TimetableError;
use super::types::{parse_hour_minute, ServiceInformation, TimetablePeriod, Train, ALL_WEEKDAYS};

#[derive(Debug, Deserialize)]
struct IndexEntry {
    start_date: String,
    end_date: String,
    file_path: String,
}

#[derive(Debug, Deserialize)]
struct RawTrainEntry {
    number: String,
    #[serde(default)]
    arrival_time: Option<String>,
    #[serde(default)]
    departure_time: Option<String>,
    #[serde(default)]
    transit_time: Option<String>,
    #[serde(default)]
    applicable_weekdays: Option<String>,
    #[serde(default)]
    applicable_start_date: Option<String>,
    #[serde(default)]
    applicable_end_date: Option<String>,
    #[serde(default)]
    information: Option<ServiceInformation>,
}

/// Parse a calendar day from either a plain date or a full RFC 3339
/// timestamp (the index files use the latter).
fn parse_date(s: &str) -> Option<chrono::NaiveDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse a weekday mask digit string ("12345" = Mon-Fri) into ISO
/// weekday numbers. Digits outside 1-7 are dropped with a warning.
fn parse_weekday_mask(mask: &str) -> Vec<u8> {
    let mut weekdays = Vec::new();
    for c in mask.chars() {
        match c.to_digit(10) {
            Some(d @ 1..=7) => weekdays.push(d as u8),
            _ => warn!(mask, char = %c, "Ignoring invalid weekday mask character"),
        }
    }
    weekdays
}

/// Blank out `//` line comments so the file parses as plain JSON.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.trim_start().starts_with("//") {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn convert_train(raw: RawTrainEntry) -> Train {
    let parse_time = |field: &str, value: &Option<String>| {
        value.as_deref().and_then(|s| {
            let parsed = parse_hour_minute(s);
            if parsed.is_none() {
                warn!(number = %raw.number, field, value = %s, "Unparseable timetable time, treating as undefined");
            }
            parsed
        })
    };

    let arrival_time = parse_time("arrival_time", &raw.arrival_time);
    let departure_time = parse_time("departure_time", &raw.departure_time);
    let transit_time = parse_time("transit_time", &raw.transit_time);

    let applicable_weekdays = match raw.applicable_weekdays.as_deref() {
        None | Some("") => ALL_WEEKDAYS.to_vec(),
        Some(mask) => parse_weekday_mask(mask),
    };

    Train {
        number: raw.number,
        arrival_time,
        departure_time,
        transit_time,
        applicable_weekdays,
        applicable_start_date: raw.applicable_start_date.as_deref().and_then(parse_date),
        applicable_end_date: raw.applicable_end_date.as_deref().and_then(parse_date),
        information: raw.information,
    }
}

/// Load all timetable periods listed in `<dir>/index.json`.
///
/// A broken index or period file is a hard error; individual entries with
/// unparseable fields degrade with a warning instead.
pub fn load_timetables(dir: &Path) -> Result<Vec<TimetablePeriod>, TimetableError> {
    let index_path = dir.join("index.json");
    let index_content = std::fs::read_to_string(&index_path)?;
    let index: Vec<IndexEntry> = serde_json::from_str(&index_content)?;

    let mut periods = Vec::with_capacity(index.len());
    for entry in index {
        let start_date = parse_date(&entry.start_date).ok_or_else(|| {
            TimetableError::ParseError(format!(
                "index entry '{}' has invalid start_date '{}'",
                entry.file_path, entry.start_date
            ))
        })?;
        let end_date = parse_date(&entry.end_date).ok_or_else(|| {
            TimetableError::ParseError(format!(
                "index entry '{}' has invalid end_date '{}'",
                entry.file_path, entry.end_date
            ))
        })?;

        let period_path = dir.join(&entry.file_path);
        let content = std::fs::read_to_string(&period_path)?;
        let raw_trains: Vec<RawTrainEntry> =
            serde_json::from_str(&strip_line_comments(&content))?;

        let trains: Vec<Train> = raw_trains.into_iter().map(convert_train).collect();
        info!(
            file = %entry.file_path,
            %start_date,
            %end_date,
            trains = trains.len(),
            "Loaded timetable period"
        );

        periods.push(TimetablePeriod {
            start_date,
            end_date,
            trains,
        });
    }

    Ok(periods)
}
