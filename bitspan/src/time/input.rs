//! Flexible date input accepted at the API boundary.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{TrackingError, TrackingResult};

/// Datetime formats tried for strings that are not RFC 3339.
/// Naive values are interpreted as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// A date argument as supplied by the caller.
///
/// Callers may pass an already-structured timestamp or a raw string; raw
/// strings are parsed exactly once, at the boundary, by [`DateInput::resolve`].
/// Structured inputs pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// An already-resolved UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// A raw date string still to be parsed.
    Raw(String),
}

impl DateInput {
    /// Resolve this input to a concrete UTC timestamp.
    ///
    /// # Returns
    /// * `Ok(DateTime<Utc>)` - the structured value unchanged, or the parsed string
    /// * `Err(TrackingError::InvalidDate)` - if a raw string cannot be parsed
    pub fn resolve(&self) -> TrackingResult<DateTime<Utc>> {
        match self {
            DateInput::Timestamp(ts) => Ok(*ts),
            DateInput::Raw(s) => parse_date_str(s),
        }
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(ts: DateTime<Utc>) -> Self {
        DateInput::Timestamp(ts)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Raw(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Raw(s)
    }
}

/// Parse a date string into a UTC timestamp.
///
/// Accepts RFC 3339, then the common naive datetime forms, then a bare
/// `YYYY-MM-DD` date (midnight).
pub fn parse_date_str(s: &str) -> TrackingResult<DateTime<Utc>> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        }
    }

    Err(TrackingError::InvalidDate(s.to_string()))
}
