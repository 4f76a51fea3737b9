//! Offset-preserving instants.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::EncodingContext;
use crate::util::{
    format_iso8601, normalize_offset, parse_iso8601, DateTimeParseError, MAX_EPOCH_MICROS,
    MIN_EPOCH_MICROS,
};

/// An instant plus the UTC offset it was observed in.
///
/// The offset is what makes `"2025-01-01T09:00:00.000-08:00"` print back as
/// `-08:00` instead of the equivalent UTC time. Timestamps constructed without
/// an offset are rendered in the encoding context's zone, or UTC.
///
/// Two timestamps are equal only if both the instant and the offset match;
/// use [`Timestamp::same_instant`] to compare instants alone.
///
/// The instant always lies in [`MIN_EPOCH_MICROS`]..=[`MAX_EPOCH_MICROS`],
/// the range that prints with a four-digit year at any offset; constructors
/// clamp to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    epoch_micros: i64,
    offset: Option<i32>,
}

impl Timestamp {
    /// Creates a timestamp at `epoch_micros` with no recorded offset.
    pub fn from_epoch_micros(epoch_micros: i64) -> Self {
        Self {
            epoch_micros: epoch_micros.clamp(MIN_EPOCH_MICROS, MAX_EPOCH_MICROS),
            offset: None,
        }
    }

    /// Creates a timestamp at `epoch_micros` observed at `offset_seconds`
    /// from UTC.
    ///
    /// The offset is truncated to whole minutes and clamped to ±24:00, the
    /// range the text form can express.
    pub fn with_offset(epoch_micros: i64, offset_seconds: i32) -> Self {
        Self {
            offset: Some(normalize_offset(offset_seconds)),
            ..Self::from_epoch_micros(epoch_micros)
        }
    }

    /// Converts a system time, recording no offset.
    pub fn from_system_time(time: SystemTime) -> Self {
        let epoch_micros = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_micros()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_micros())
                .map(|m| -m)
                .unwrap_or(i64::MIN),
        };
        Self::from_epoch_micros(epoch_micros)
    }

    /// The current time, with no recorded offset.
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Parses an ISO 8601 timestamp. A time zone designator is required.
    pub fn parse(text: &str) -> Result<Self, DateTimeParseError> {
        let (epoch_micros, offset) = parse_iso8601(text)?;
        Ok(Self {
            epoch_micros,
            offset: Some(offset),
        })
    }

    /// Microseconds since the Unix epoch.
    pub fn epoch_micros(&self) -> i64 {
        self.epoch_micros
    }

    /// The recorded UTC offset in seconds, if any.
    pub fn offset(&self) -> Option<i32> {
        self.offset
    }

    /// Returns the same instant observed at another offset.
    pub fn in_offset(self, offset_seconds: i32) -> Self {
        Self::with_offset(self.epoch_micros, offset_seconds)
    }

    /// Returns true if both timestamps denote the same instant.
    pub fn same_instant(&self, other: &Timestamp) -> bool {
        self.epoch_micros == other.epoch_micros
    }

    pub fn to_system_time(&self) -> SystemTime {
        let magnitude = Duration::from_micros(self.epoch_micros.unsigned_abs());
        if self.epoch_micros >= 0 {
            UNIX_EPOCH + magnitude
        } else {
            UNIX_EPOCH - magnitude
        }
    }

    /// Renders the timestamp as ISO 8601.
    ///
    /// The recorded offset wins; without one the context's time zone is used,
    /// then UTC. The context's zone is normalized like a recorded offset.
    pub fn format(&self, ctx: &EncodingContext) -> String {
        let offset = self
            .offset
            .or(ctx.time_zone.map(normalize_offset))
            .unwrap_or(0);
        format_iso8601(self.epoch_micros, offset, ctx.fraction_digits, ctx.zulu)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

impl FromStr for Timestamp {
    type Err = DateTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&EncodingContext::default()))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i32 = 3600;

    #[test]
    fn test_offset_survives_round_trip() {
        let text = "2025-01-01T09:00:00.000-08:00";
        let ts = Timestamp::parse(text).unwrap();
        assert_eq!(ts.offset(), Some(-8 * HOUR));
        assert_eq!(ts.to_string(), text);
    }

    #[test]
    fn test_epoch_in_pacific_time() {
        let ts = Timestamp::with_offset(0, -8 * HOUR);
        assert_eq!(ts.to_string(), "1969-12-31T16:00:00.000-08:00");
    }

    #[test]
    fn test_no_offset_uses_context_zone() {
        let ts = Timestamp::from_epoch_micros(0);
        assert_eq!(ts.to_string(), "1970-01-01T00:00:00.000Z");

        let tokyo = EncodingContext::new().with_time_zone(9 * HOUR);
        assert_eq!(ts.format(&tokyo), "1970-01-01T09:00:00.000+09:00");

        let recorded = Timestamp::with_offset(0, -5 * HOUR);
        assert_eq!(recorded.format(&tokyo), "1969-12-31T19:00:00.000-05:00");
    }

    #[test]
    fn test_zulu_preference() {
        let ts = Timestamp::parse("2024-03-15T14:30:00Z").unwrap();
        let ctx = EncodingContext::new().with_zulu(false);
        let text = ts.format(&ctx);
        assert_eq!(text, "2024-03-15T14:30:00.000+00:00");
        assert_eq!(Timestamp::parse(&text).unwrap(), ts);
    }

    #[test]
    fn test_equality_includes_offset() {
        let utc = Timestamp::parse("2025-01-01T17:00:00Z").unwrap();
        let pacific = Timestamp::parse("2025-01-01T09:00:00-08:00").unwrap();
        assert!(utc.same_instant(&pacific));
        assert_ne!(utc, pacific);
        assert_eq!(utc.in_offset(-8 * HOUR), pacific);
    }

    #[test]
    fn test_offset_normalized_to_minutes() {
        let ts = Timestamp::with_offset(0, 3600 + 59);
        assert_eq!(ts.offset(), Some(3600));
        let ts = Timestamp::with_offset(0, 30 * HOUR);
        assert_eq!(ts.offset(), Some(24 * HOUR));
    }

    #[test]
    fn test_context_zone_normalized() {
        let ts = Timestamp::from_epoch_micros(0);
        let ctx = EncodingContext {
            time_zone: Some(HOUR + 30),
            ..EncodingContext::default()
        };
        let text = ts.format(&ctx);
        assert_eq!(text, "1970-01-01T01:00:00.000+01:00");
        assert!(Timestamp::parse(&text).unwrap().same_instant(&ts));

        let ctx = EncodingContext {
            time_zone: Some(30 * HOUR),
            ..EncodingContext::default()
        };
        let parsed = Timestamp::parse(&ts.format(&ctx)).unwrap();
        assert!(parsed.same_instant(&ts));
        assert_eq!(parsed.offset(), Some(24 * HOUR));
    }

    #[test]
    fn test_sub_millisecond_round_trip() {
        let ts = Timestamp::with_offset(1_500, -8 * HOUR);
        assert_eq!(ts.to_string(), "1969-12-31T16:00:00.0015-08:00");
        assert_eq!(Timestamp::parse(&ts.to_string()).unwrap(), ts);
    }

    #[test]
    fn test_out_of_range_instants_clamp() {
        let latest = Timestamp::with_offset(i64::MAX, HOUR);
        assert_eq!(latest.epoch_micros(), MAX_EPOCH_MICROS);
        assert_eq!(Timestamp::parse(&latest.to_string()).unwrap(), latest);

        let earliest = Timestamp::with_offset(i64::MIN, -24 * HOUR);
        assert_eq!(earliest.epoch_micros(), MIN_EPOCH_MICROS);
        assert_eq!(earliest.to_string(), "0000-01-01T00:00:00.000-24:00");
        assert_eq!(Timestamp::parse(&earliest.to_string()).unwrap(), earliest);

        let far_future = UNIX_EPOCH + Duration::from_secs(400_000_000_000);
        let ts = Timestamp::from_system_time(far_future);
        assert_eq!(ts.epoch_micros(), MAX_EPOCH_MICROS);
        assert!(Timestamp::parse(&ts.to_string()).is_ok());
    }

    #[test]
    fn test_system_time_conversion() {
        let before_epoch = UNIX_EPOCH - Duration::from_micros(1_500_000);
        let ts = Timestamp::from_system_time(before_epoch);
        assert_eq!(ts.epoch_micros(), -1_500_000);
        assert_eq!(ts.offset(), None);
        assert_eq!(ts.to_system_time(), before_epoch);
    }

    #[test]
    fn test_parse_rejects_missing_designator() {
        assert!(Timestamp::parse("2025-01-01T09:00:00").is_err());
        assert!("2025-01-01T09:00:00±02:00".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let ts = Timestamp::with_offset(1_000, 2 * HOUR);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"1970-01-01T02:00:00.001+02:00\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
        assert!(serde_json::from_str::<Timestamp>("\"tomorrow\"").is_err());
    }
}
