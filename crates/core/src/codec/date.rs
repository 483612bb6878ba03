use super::Codec;
use crate::value::Timestamp;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Layout written by [`Iso8601`]
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Stores timestamps as ISO-8601 text at one second resolution
///
/// Encoding always writes UTC with a `Z` suffix and drops sub-second
/// precision. Years outside `0..=9999` have no four digit form and do not
/// encode. Decoding accepts any RFC 3339 offset and truncates fractional
/// seconds the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Iso8601;

impl Iso8601 {
    /// Format a timestamp the way this codec stores it
    #[must_use]
    pub fn format(value: &Timestamp) -> String {
        value.format(ISO8601_FORMAT).to_string()
    }

    /// Parse text the way this codec reads it
    #[must_use]
    pub fn parse(text: &str) -> Option<Timestamp> {
        let parsed = DateTime::parse_from_rfc3339(text.trim()).ok()?;
        parsed.with_timezone(&Utc).with_nanosecond(0)
    }
}

impl Codec for Iso8601 {
    type Value = Timestamp;
    type Stored = String;

    fn encode(&self, value: &Timestamp) -> Option<String> {
        if !(0..=9999).contains(&value.year()) {
            return None;
        }
        Some(Self::format(value))
    }

    fn decode(&self, stored: &String) -> Option<Timestamp> {
        Self::parse(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encodes_utc_seconds() {
        let date = Utc.with_ymd_and_hms(2025, 1, 7, 5, 32, 3).unwrap();
        assert_eq!(Iso8601.encode(&date).as_deref(), Some("2025-01-07T05:32:03Z"));
        assert_eq!(Iso8601.decode(&"2025-01-07T05:32:03Z".to_string()), Some(date));
    }

    #[test]
    fn test_sub_seconds_are_truncated() {
        let date = Utc.with_ymd_and_hms(2024, 12, 31, 21, 30, 35).unwrap()
            + chrono::Duration::milliseconds(750);
        assert_eq!(Iso8601.encode(&date).as_deref(), Some("2024-12-31T21:30:35Z"));
        assert_eq!(
            Iso8601.decode(&"2024-12-31T21:30:35.750Z".to_string()),
            Utc.with_ymd_and_hms(2024, 12, 31, 21, 30, 35).single()
        );
    }

    #[test]
    fn test_offsets_are_normalized() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 7, 4, 32, 3).unwrap();
        assert_eq!(Iso8601.decode(&"2025-01-07T05:32:03+01:00".to_string()), Some(expected));
    }

    #[test]
    fn test_malformed_text() {
        assert_eq!(Iso8601.decode(&"yesterday".to_string()), None);
        assert_eq!(Iso8601.decode(&"2025-13-07T05:32:03Z".to_string()), None);
    }

    #[test]
    fn test_years_past_four_digits_do_not_encode() {
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Iso8601.encode(&far), None);

        let last = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        let stored = Iso8601.encode(&last).unwrap();
        assert_eq!(Iso8601.decode(&stored), Some(last));
    }
}
