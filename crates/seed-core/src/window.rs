//! Time windows, timestamps and durations used to schedule reservations.

use crate::schema::SchemaError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp as written in a seed schema.
///
/// Either Unix seconds or a UTC date/time string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampSpec {
    Unix(i64),
    Text(String),
}

impl TimestampSpec {
    /// Resolve to Unix seconds.
    pub fn to_unix(&self) -> Result<i64, SchemaError> {
        match self {
            TimestampSpec::Unix(secs) => Ok(*secs),
            TimestampSpec::Text(s) => parse_timestamp(s)
                .map(|dt| dt.timestamp())
                .ok_or_else(|| SchemaError::InvalidTimestamp(s.clone())),
        }
    }
}

/// Half-open scheduling window `[start, end)` as written in a seed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub start: TimestampSpec,
    pub end: TimestampSpec,
}

impl WindowSpec {
    /// Resolve both bounds to Unix seconds.
    ///
    /// Ordering is not checked here; the generator rejects empty windows.
    pub fn resolve(&self) -> Result<(i64, i64), SchemaError> {
        Ok((self.start.to_unix()?, self.end.to_unix()?))
    }
}

/// Policy deriving a reservation's `start` and `end` from its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// `start` in `[0, window_start)`, `end` in `[window_start, window_end)`.
    #[default]
    Legacy,
    /// `start` inside the window, `end = start + d` with `d` in `[1, max_duration_secs]`,
    /// clamped to the window.
    Bounded { max_duration_secs: i64 },
}

/// Schedule as written in a seed schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleSpec {
    #[default]
    Legacy,
    Bounded { max_duration: String },
}

impl ScheduleSpec {
    pub fn resolve(&self) -> Result<Schedule, SchemaError> {
        match self {
            ScheduleSpec::Legacy => Ok(Schedule::Legacy),
            ScheduleSpec::Bounded { max_duration } => Ok(Schedule::Bounded {
                max_duration_secs: parse_duration_to_secs(max_duration)?,
            }),
        }
    }
}

/// Parse a timestamp string in the formats accepted by seed schemas.
///
/// Strings without an offset are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Parse a duration string like "1d", "2h", "30m", "300s", "300" into seconds.
///
/// Plain numbers are seconds.
pub fn parse_duration_to_secs(s: &str) -> Result<i64, SchemaError> {
    let s = s.trim();
    let invalid = || SchemaError::InvalidDuration(s.to_string());
    if s.is_empty() {
        return Err(invalid());
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('d') {
        (n, 86_400)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3_600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        (s, 1)
    };

    let value: i64 = num_str.trim().parse().map_err(|_| invalid())?;
    value.checked_mul(multiplier).ok_or_else(invalid)
}
