//! ISO 8601 date/time parsing and formatting utilities.
//!
//! Converts between ISO 8601 timestamps and the internal representation used
//! by [`Timestamp`](crate::model::Timestamp):
//! - Instant: microseconds since Unix epoch (`epoch_micros`)
//! - Offset: signed UTC offset in seconds, always a whole number of minutes
//!
//! The offset is extracted from the trailing time zone designator so that it
//! survives a parse/format round trip, not just the absolute instant.

use lazy_static::lazy_static;
use regex::Regex;

const MICROSECONDS_PER_SECOND: i64 = 1_000_000;
const MICROSECONDS_PER_MINUTE: i64 = 60 * MICROSECONDS_PER_SECOND;
const MICROSECONDS_PER_HOUR: i64 = 60 * MICROSECONDS_PER_MINUTE;
const MICROSECONDS_PER_DAY: i64 = 24 * MICROSECONDS_PER_HOUR;

/// Largest accepted offset magnitude (24:00).
pub const MAX_OFFSET_SECONDS: i32 = 24 * 3600;

/// Earliest instant that prints with a four-digit year at every offset
/// (`0000-01-02T00:00:00Z`).
pub const MIN_EPOCH_MICROS: i64 = -62_167_132_800_000_000;

/// Latest instant that prints with a four-digit year at every offset
/// (`9999-12-30T23:59:59.999999Z`).
pub const MAX_EPOCH_MICROS: i64 = 253_402_214_399_999_999;

lazy_static! {
    /// Trailing designator after a time of day: sign, hours, optional minutes.
    static ref TZ_DESIGNATOR: Regex =
        Regex::new(r"T[0-9:.,]+([+±−-])([0-9]{2})((?::[0-9]{2}|[0-9]{2})?)$")
            .expect("time zone designator pattern is valid");
}

/// Error type for ISO 8601 parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    pub message: String,
}

impl DateTimeParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateTimeParseError {}

/// A time zone designator located at the end of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Designator {
    /// Signed offset from UTC in seconds.
    pub offset_seconds: i32,
    /// Byte index where the designator starts.
    pub start: usize,
}

/// Extracts the time zone designator from an ISO 8601 timestamp.
///
/// Accepts `Z`, and `+HH:MM`, `+HHMM` or `+HH` with any of the signs
/// `+`, `-` (hyphen-minus), `−` (U+2212 minus sign) and `±`. The `±` sign is
/// only legal for a zero offset.
///
/// See <https://en.wikipedia.org/wiki/ISO_8601#Time_zone_designators>.
pub fn extract_offset(timestamp: &str) -> Result<Designator, DateTimeParseError> {
    if let Some(body) = timestamp.strip_suffix('Z') {
        return Ok(Designator {
            offset_seconds: 0,
            start: body.len(),
        });
    }

    let captures = TZ_DESIGNATOR.captures(timestamp).ok_or_else(|| {
        DateTimeParseError::new(format!("Missing time zone designator: {}", timestamp))
    })?;

    // Groups 1 and 2 always participate in a match.
    let (Some(sign), Some(hours)) = (captures.get(1), captures.get(2)) else {
        return Err(DateTimeParseError::new(format!(
            "Invalid time zone designator: {}",
            timestamp
        )));
    };

    let hours: i32 = hours.as_str().parse().map_err(|_| {
        DateTimeParseError::new(format!("Invalid offset hours: {}", timestamp))
    })?;

    let minutes: i32 = match captures.get(3).map(|m| m.as_str().trim_start_matches(':')) {
        None | Some("") => 0,
        Some(m) => m.parse().map_err(|_| {
            DateTimeParseError::new(format!("Invalid offset minutes: {}", timestamp))
        })?,
    };

    if minutes > 59 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(DateTimeParseError::new(format!(
            "Time zone offset out of range [-24:00, +24:00]: {}",
            timestamp
        )));
    }

    let magnitude = hours * 3600 + minutes * 60;
    let offset_seconds = match sign.as_str() {
        "-" | "−" => -magnitude,
        "±" if magnitude != 0 => {
            return Err(DateTimeParseError::new(format!(
                "Sign ± is only valid for a zero offset: {}",
                timestamp
            )));
        }
        _ => magnitude,
    };

    Ok(Designator {
        offset_seconds,
        start: sign.start(),
    })
}

/// Returns the UTC offset in seconds of an ISO 8601 timestamp, if it has one.
pub fn timezone_offset(timestamp: &str) -> Option<i32> {
    extract_offset(timestamp).ok().map(|d| d.offset_seconds)
}

/// Parses fractional seconds string and returns microseconds.
///
/// Digits beyond microsecond precision are truncated.
fn parse_fractional_seconds(frac: &str) -> Result<i64, DateTimeParseError> {
    if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateTimeParseError::new(format!(
            "Invalid fractional seconds: {}",
            frac
        )));
    }
    let mut padded = frac.to_string();
    while padded.len() < 6 {
        padded.push('0');
    }
    padded.truncate(6);
    padded
        .parse()
        .map_err(|_| DateTimeParseError::new(format!("Invalid fractional seconds: {}", frac)))
}

/// Formats microseconds with at least `min_digits` fractional digits, and
/// more when the value needs them.
fn format_fractional_seconds(us: i64, min_digits: u8) -> String {
    let min_digits = min_digits.clamp(1, 6) as usize;
    let mut str = format!("{:06}", us);
    let significant = str.trim_end_matches('0').len();
    str.truncate(significant.max(min_digits));
    format!(".{}", str)
}

/// Truncates an offset to whole minutes and clamps it to ±24:00.
pub fn normalize_offset(offset_seconds: i32) -> i32 {
    offset_seconds.clamp(-MAX_OFFSET_SECONDS, MAX_OFFSET_SECONDS) / 60 * 60
}

/// Formats an offset in seconds as a time zone designator.
fn format_timezone_offset(offset_seconds: i32, zulu: bool) -> String {
    if offset_seconds == 0 && zulu {
        return "Z".to_string();
    }

    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let abs_offset = offset_seconds.abs();
    let hours = abs_offset / 3600;
    let minutes = (abs_offset % 3600) / 60;

    format!("{}{:02}:{:02}", sign, hours, minutes)
}

/// Returns true if the given year is a leap year.
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Calculates days since Unix epoch for a given date (Howard Hinnant's algorithm).
fn date_to_days(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let m = if month <= 2 {
        month as i64 + 9
    } else {
        month as i64 - 3
    };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32; // year of era
    let doy = (153 * m as u32 + 2) / 5 + day - 1; // day of year
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era

    era * 146097 + doe as i64 - 719468
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: i64) -> (i64, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32; // day of era
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // year of era
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year
    let mp = (5 * doy + 2) / 153; // month index
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };

    let year = if m <= 2 { y + 1 } else { y };
    (year, m, d)
}

fn parse_field<T: std::str::FromStr>(
    text: &str,
    name: &str,
    original: &str,
) -> Result<T, DateTimeParseError> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateTimeParseError::new(format!(
            "Invalid {} in datetime: {}",
            name, original
        )));
    }
    text.parse().map_err(|_| {
        DateTimeParseError::new(format!("Invalid {} in datetime: {}", name, original))
    })
}

/// Parses the local part of a timestamp (`YYYY-MM-DDTHH:MM[:SS[.fff]]`) into
/// microseconds since the epoch as if it were UTC.
fn parse_local_datetime(local: &str, original: &str) -> Result<i64, DateTimeParseError> {
    let invalid = || DateTimeParseError::new(format!("Invalid ISO 8601 datetime: {}", original));

    if !local.is_ascii() || local.len() < 16 {
        return Err(invalid());
    }

    let bytes = local.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' || bytes[10] != b'T' || bytes[13] != b':' {
        return Err(invalid());
    }

    let year: i32 = parse_field(&local[..4], "year", original)?;
    let month: u32 = parse_field(&local[5..7], "month", original)?;
    let day: u32 = parse_field(&local[8..10], "day", original)?;

    if !(1..=12).contains(&month) {
        return Err(DateTimeParseError::new(format!(
            "Invalid month in datetime: {}",
            original
        )));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(DateTimeParseError::new(format!(
            "Invalid day in datetime: {}",
            original
        )));
    }

    let hours: i64 = parse_field(&local[11..13], "hours", original)?;
    let minutes: i64 = parse_field(&local[14..16], "minutes", original)?;

    let rest = &local[16..];
    let (seconds, microseconds) = if rest.is_empty() {
        (0, 0)
    } else {
        if rest.len() < 3 || rest.as_bytes()[0] != b':' {
            return Err(invalid());
        }
        let seconds: i64 = parse_field(&rest[1..3], "seconds", original)?;
        let frac = &rest[3..];
        let microseconds = match frac.as_bytes().first() {
            None => 0,
            Some(b'.') | Some(b',') => parse_fractional_seconds(&frac[1..])?,
            Some(_) => return Err(invalid()),
        };
        (seconds, microseconds)
    };

    if hours > 23 {
        return Err(DateTimeParseError::new(format!(
            "Invalid hours in datetime: {}",
            original
        )));
    }
    if minutes > 59 {
        return Err(DateTimeParseError::new(format!(
            "Invalid minutes in datetime: {}",
            original
        )));
    }
    if seconds > 59 {
        return Err(DateTimeParseError::new(format!(
            "Invalid seconds in datetime: {}",
            original
        )));
    }

    let days = date_to_days(year, month, day);
    Ok(days * MICROSECONDS_PER_DAY
        + hours * MICROSECONDS_PER_HOUR
        + minutes * MICROSECONDS_PER_MINUTE
        + seconds * MICROSECONDS_PER_SECOND
        + microseconds)
}

/// Parses an ISO 8601 datetime with a mandatory time zone designator.
///
/// Returns microseconds since Unix epoch and the offset in seconds. A string
/// without a recognizable designator is rejected; no default zone is assumed.
/// So is an instant outside [`MIN_EPOCH_MICROS`]..=[`MAX_EPOCH_MICROS`].
pub fn parse_iso8601(datetime_str: &str) -> Result<(i64, i32), DateTimeParseError> {
    let designator = extract_offset(datetime_str)?;
    let local_micros = parse_local_datetime(&datetime_str[..designator.start], datetime_str)?;

    // local time = UTC + offset, so UTC = local - offset
    let offset_us = designator.offset_seconds as i64 * MICROSECONDS_PER_SECOND;
    let epoch_micros = local_micros - offset_us;
    if !(MIN_EPOCH_MICROS..=MAX_EPOCH_MICROS).contains(&epoch_micros) {
        return Err(DateTimeParseError::new(format!(
            "Datetime outside the supported range: {}",
            datetime_str
        )));
    }
    Ok((epoch_micros, designator.offset_seconds))
}

/// Formats microseconds since Unix epoch as an ISO 8601 datetime string in
/// the given offset.
///
/// Renders at least `fraction_digits` fractional digits (clamped to 1..=6),
/// extended up to microseconds so the instant is never truncated, and a
/// numeric designator; a zero offset renders as `Z` when `zulu` is set.
///
/// The offset is normalized with [`normalize_offset`] and the instant is
/// clamped to [`MIN_EPOCH_MICROS`]..=[`MAX_EPOCH_MICROS`], so the output
/// always parses back.
pub fn format_iso8601(
    epoch_micros: i64,
    offset_seconds: i32,
    fraction_digits: u8,
    zulu: bool,
) -> String {
    let offset_seconds = normalize_offset(offset_seconds);
    let offset_us = offset_seconds as i64 * MICROSECONDS_PER_SECOND;
    let epoch_micros = epoch_micros.clamp(MIN_EPOCH_MICROS, MAX_EPOCH_MICROS);
    // Both operands are bounded, so this cannot overflow.
    let local_us = epoch_micros + offset_us;

    let days = local_us.div_euclid(MICROSECONDS_PER_DAY);
    let time_micros = local_us.rem_euclid(MICROSECONDS_PER_DAY);

    let (year, month, day) = days_to_date(days);

    let hours = time_micros / MICROSECONDS_PER_HOUR;
    let remaining1 = time_micros % MICROSECONDS_PER_HOUR;
    let minutes = remaining1 / MICROSECONDS_PER_MINUTE;
    let remaining2 = remaining1 % MICROSECONDS_PER_MINUTE;
    let seconds = remaining2 / MICROSECONDS_PER_SECOND;
    let microseconds = remaining2 % MICROSECONDS_PER_SECOND;

    let frac = format_fractional_seconds(microseconds, fraction_digits);
    let offset = format_timezone_offset(offset_seconds, zulu);

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{}",
        year, month, day, hours, minutes, seconds, frac, offset
    )
}
