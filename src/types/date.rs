//! AMF0 date payload.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// A point in time as carried on the wire: milliseconds since the Unix epoch, UTC.
///
/// The wire's 16-bit timezone field is always written as zero and ignored on
/// read, so a decoded date is UTC by construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AmfDate {
    millis: f64,
}

impl AmfDate {
    pub const fn from_millis(millis: f64) -> Self {
        Self { millis }
    }

    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub const fn millis(&self) -> f64 {
        self.millis
    }

    /// Converts to a chrono timestamp; `None` for non-finite or out-of-range values.
    ///
    /// chrono stops near year 262143 (about 8.2e15 ms), short of the
    /// ±8.64e15 ms an ECMAScript date may hold, so the outermost valid AMF0
    /// dates have no `DateTime` form. [`millis`](Self::millis) always works.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.millis.is_finite() {
            return None;
        }
        let secs = (self.millis / 1000.0).floor();
        let rem_ms = self.millis - secs * 1000.0;
        let nanos = ((rem_ms * 1_000_000.0).round() as u32).min(999_999_999);
        if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
            return None;
        }
        DateTime::from_timestamp(secs as i64, nanos)
    }
}

impl From<DateTime<Utc>> for AmfDate {
    fn from(dt: DateTime<Utc>) -> Self {
        let sub_ms_nanos = dt.timestamp_subsec_nanos() % 1_000_000;
        Self {
            millis: dt.timestamp_millis() as f64 + f64::from(sub_ms_nanos) / 1_000_000.0,
        }
    }
}

impl fmt::Display for AmfDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "date({})", self.millis),
        }
    }
}
