// Entity timestamps as delivered by the backend.
//
// Purpose
// - Parse the date shapes the backend emits without deciding on a timezone too early.
//
// Notes
// - Zoned values carry their own offset (RFC 3339, epoch milliseconds).
// - Floating values (naive date-times, plain YYYY-MM-DD dates) are interpreted in the
//   reference zone the caller aggregates in. Date-only values mean local midnight.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

const FLOATING_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Zoned(DateTime<FixedOffset>),
    Floating(NaiveDateTime),
}

impl Timestamp {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(Timestamp::Zoned(zoned));
        }
        if let Ok(zoned) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Some(Timestamp::Zoned(zoned));
        }
        for format in FLOATING_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(Timestamp::Floating(naive));
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Timestamp::Floating)
    }

    /// Strings are parsed; numbers are epoch milliseconds.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Timestamp::parse(text),
            Value::Number(number) => number
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|utc| Timestamp::Zoned(utc.fixed_offset())),
            _ => None,
        }
    }

    pub fn in_zone<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        match self {
            Timestamp::Zoned(zoned) => zoned.with_timezone(tz),
            Timestamp::Floating(naive) => tz
                .from_local_datetime(naive)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(naive)),
        }
    }

    /// Calendar day of this timestamp as seen from `tz`.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.in_zone(tz).date_naive()
    }
}
