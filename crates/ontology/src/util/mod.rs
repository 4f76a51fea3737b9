//! Utility modules for the ontology codecs.

pub mod datetime;

pub use datetime::{
    extract_offset, format_iso8601, normalize_offset, parse_iso8601, timezone_offset,
    DateTimeParseError, Designator, MAX_EPOCH_MICROS, MAX_OFFSET_SECONDS, MIN_EPOCH_MICROS,
};
