//! Date and time filters for templates.
//!
//! Dates may be given as strings (`2016-03-24 23:05`, `2016-03-24`, RFC 3339,
//! `now`) or as unix timestamps. Naive values are taken as local time.
//!
//! # Available Filters
//!
//! - `strftime`: Format a date with strftime-style directives
//! - `time_diff`: Human readable distance to now (or to another date)
//!
//! # Examples
//!
//! ```jinja2
//! {{ '2016-03-24 23:05' | strftime('%d.%m.%Y %H:%M:%S') }}
//! {{ post.published | time_diff }}
//! ```

use crate::error::Error;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use minijinja::value::ValueKind;
use minijinja::{Environment, Value};

const DEFAULT_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Register all time filters with the given environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("strftime", strftime_filter);
    env.add_filter("time_diff", time_diff_filter);
}

/// Interprets a template value as a local date and time.
pub fn parse_datetime(value: &Value) -> crate::Result<NaiveDateTime> {
    match value.kind() {
        ValueKind::Number => {
            let repr = value.to_string();
            let seconds = repr
                .parse::<i64>()
                .or_else(|_| repr.parse::<f64>().map(|f| f as i64))
                .map_err(|_| Error::InvalidDate(repr.clone()))?;
            from_timestamp(seconds).ok_or(Error::InvalidDate(repr))
        }
        ValueKind::String => parse_date_str(value.as_str().unwrap_or_default()),
        _ => Err(Error::InvalidDate(value.to_string())),
    }
}

fn from_timestamp(seconds: i64) -> Option<NaiveDateTime> {
    Local
        .timestamp_opt(seconds, 0)
        .single()
        .map(|dt| dt.naive_local())
}

fn parse_date_str(input: &str) -> crate::Result<NaiveDateTime> {
    let trimmed = input.trim();

    if trimmed.eq_ignore_ascii_case("now") {
        return Ok(Local::now().naive_local());
    }

    if let Ok(seconds) = trimmed.parse::<i64>() {
        return from_timestamp(seconds).ok_or_else(|| Error::InvalidDate(input.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::InvalidDate(input.to_string()))
}

fn strftime_filter(time: Value, format: Option<String>) -> Result<String, minijinja::Error> {
    let dt = parse_datetime(&time)?;
    Ok(strftime(&dt, format.as_deref().unwrap_or(DEFAULT_FORMAT))?)
}

/// Formats `dt`, rejecting malformed directives instead of panicking.
pub fn strftime(dt: &NaiveDateTime, format: &str) -> crate::Result<String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidFormat(format.to_string()));
    }
    Ok(dt.format(format).to_string())
}

fn time_diff_filter(date: Value, now: Option<Value>) -> Result<String, minijinja::Error> {
    let date = parse_datetime(&date)?;
    let now = match now {
        Some(now) if !now.is_undefined() && !now.is_none() => parse_datetime(&now)?,
        _ => Local::now().naive_local(),
    };
    Ok(time_diff(&date, &now))
}

/// Describes how far `date` is from `now`, e.g. `3 days ago`.
pub fn time_diff(date: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let seconds = now.signed_duration_since(*date).num_seconds();
    let suffix = if seconds >= 0 { "ago" } else { "from now" };
    let seconds = seconds.unsigned_abs();

    let (count, unit) = match seconds {
        s if s < 60 => (s.max(1), "second"),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 7 * 86_400 => (s / 86_400, "day"),
        s if s < 30 * 86_400 => (s / (7 * 86_400), "week"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };

    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} {suffix}")
}
