//! Timestamp valuer
//!
//! Numbers are read as milliseconds since the Unix epoch. Strings are tried
//! against RFC 3339, RFC 2822, then a handful of zone-less layouts that are
//! read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::foundation::{Context, ErrorKind, Failure, Valuer};

/// Largest distance from the epoch, in milliseconds, a timestamp may have.
pub const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Accepts epoch milliseconds or a date string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampValuer {
    kind: ErrorKind,
}

impl TimestampValuer {
    /// Creates a timestamp valuer failing with `expected_valid_timestamp`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: ErrorKind::ExpectedValidTimestamp,
        }
    }

    /// Overrides the error kind reported on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: impl Into<ErrorKind>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl Default for TimestampValuer {
    fn default() -> Self {
        Self::new()
    }
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

fn from_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

impl Valuer for TimestampValuer {
    type Output = DateTime<Utc>;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<DateTime<Utc>, Failure> {
        let parsed = match raw {
            Some(Value::Number(n)) => n.as_f64().and_then(from_epoch_millis),
            Some(Value::String(s)) => from_text(s),
            _ => None,
        };
        parsed.ok_or_else(|| cx.error(self.kind.clone(), raw).into())
    }
}

/// Creates a [`TimestampValuer`].
#[must_use]
pub const fn timestamp() -> TimestampValuer {
    TimestampValuer::new()
}
