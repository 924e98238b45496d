//! Absolute point in time

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of the departure form field (an HTML `datetime-local` value)
pub const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// An instant normalized to UTC
///
/// Display helpers render it in a caller-supplied local timezone; the wire
/// representation is always ISO-8601 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePoint(DateTime<Utc>);

impl TimePoint {
    /// Wrap an UTC instant
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// The current instant
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The underlying UTC instant
    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// ISO-8601 UTC with a `Z` suffix and second precision
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Date and time in the given timezone, e.g. `2025-04-02 10:30`
    #[must_use]
    pub fn format_local(&self, tz: Tz) -> String {
        self.0.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string()
    }

    /// Time of day in the given timezone, e.g. `10:35:00`
    #[must_use]
    pub fn format_local_time(&self, tz: Tz) -> String {
        self.0.with_timezone(&tz).format("%H:%M:%S").to_string()
    }

    /// Value suitable for the departure form field in the given timezone
    #[must_use]
    pub fn to_form_value(&self, tz: Tz) -> String {
        self.0
            .with_timezone(&tz)
            .format(FORM_DATETIME_FORMAT)
            .to_string()
    }
}

impl From<DateTime<Utc>> for TimePoint {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}
