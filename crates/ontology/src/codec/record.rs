//! The record protocol and document entry points.

use serde_json::Value;

use crate::codec::key::AttributeKey;
use crate::codec::primitives::{NodeReader, NodeWriter};
use crate::error::{DecodeError, EncodeError};
use crate::util::normalize_offset;

/// Value written as `@context` on root documents.
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

/// JSON path of a document root.
pub const ROOT_PATH: &str = "$";

/// Options for encoding.
///
/// Timestamps without a recorded offset are printed in `time_zone`, or UTC
/// when it is unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingContext {
    /// Target UTC offset in seconds for timestamps that carry none.
    /// Truncated to whole minutes and clamped to ±24:00 when used.
    pub time_zone: Option<i32>,
    /// Minimum fractional second digits, 1 to 6. Sub-millisecond instants
    /// print as many digits as they need.
    pub fraction_digits: u8,
    /// Print a zero offset as `Z` rather than `+00:00`.
    pub zulu: bool,
    /// Pretty-print JSON text output.
    pub pretty: bool,
}

impl Default for EncodingContext {
    fn default() -> Self {
        Self {
            time_zone: None,
            fraction_digits: 3,
            zulu: true,
            pretty: false,
        }
    }
}

impl EncodingContext {
    /// Creates default options (UTC, milliseconds, `Z`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target zone, truncated to whole minutes and clamped to
    /// ±24:00.
    pub fn with_time_zone(mut self, offset_seconds: i32) -> Self {
        self.time_zone = Some(normalize_offset(offset_seconds));
        self
    }

    /// Sets the minimum fractional second digits, clamped to 1..=6.
    pub fn with_fraction_digits(mut self, digits: u8) -> Self {
        self.fraction_digits = digits.clamp(1, 6);
        self
    }

    pub fn with_zulu(mut self, zulu: bool) -> Self {
        self.zulu = zulu;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// A type that encodes as a JSON-LD node.
///
/// Implementors name their type tag and attribute keys and read or write
/// their attributes; the reserved keywords are handled here. Decoding checks
/// the type tag before any attribute is read.
pub trait Record: Sized {
    /// The `@type` value, written on encode and required on decode.
    const TYPE_TAG: &'static str;

    /// The record's attribute names.
    type Key: AttributeKey;

    /// The `@id` value, if this record has one.
    fn identifier(&self) -> Option<&str> {
        None
    }

    /// The `@context` written when this record is the document root.
    fn context() -> Value {
        Value::String(SCHEMA_ORG_CONTEXT.to_string())
    }

    fn encode_attributes(&self, node: &mut NodeWriter<'_, Self::Key>) -> Result<(), EncodeError>;

    fn decode_attributes(node: &NodeReader<'_, Self::Key>) -> Result<Self, DecodeError>;

    /// Encodes at `depth`; zero is the document root.
    fn to_value(
        &self,
        ctx: &EncodingContext,
        depth: usize,
        path: &str,
    ) -> Result<Value, EncodeError> {
        encode_node(self, ctx, depth, path)
    }

    fn from_value(value: &Value, path: &str) -> Result<Self, DecodeError> {
        decode_node(value, path)
    }
}

/// A plain JSON object nested inside a record.
///
/// Unlike a [`Record`] it has no `@type`, and never carries `@context`.
pub trait Embedded: Sized {
    type Key: AttributeKey;

    fn encode_members(&self, node: &mut NodeWriter<'_, Self::Key>) -> Result<(), EncodeError>;

    fn decode_members(node: &NodeReader<'_, Self::Key>) -> Result<Self, DecodeError>;
}

/// Encodes an embedded object at `depth`.
pub fn encode_embedded<E: Embedded>(
    value: &E,
    ctx: &EncodingContext,
    depth: usize,
    path: &str,
) -> Result<Value, EncodeError> {
    let mut node = NodeWriter::untyped(ctx, depth, path);
    value.encode_members(&mut node)?;
    Ok(node.finish())
}

/// Decodes an embedded object.
pub fn decode_embedded<E: Embedded>(value: &Value, path: &str) -> Result<E, DecodeError> {
    E::decode_members(&NodeReader::<E::Key>::new(value, path)?)
}

/// Encodes a record as an object node.
pub fn encode_node<R: Record>(
    record: &R,
    ctx: &EncodingContext,
    depth: usize,
    path: &str,
) -> Result<Value, EncodeError> {
    let mut node = NodeWriter::with_context(ctx, depth, path, R::TYPE_TAG, R::context);
    if let Some(id) = record.identifier() {
        node.write_id(id);
    }
    record.encode_attributes(&mut node)?;
    Ok(node.finish())
}

/// Decodes an object node, checking its type tag.
pub fn decode_node<R: Record>(value: &Value, path: &str) -> Result<R, DecodeError> {
    let node = NodeReader::<R::Key>::new(value, path)?;
    node.expect_type(R::TYPE_TAG)?;
    R::decode_attributes(&node)
}

/// Encodes a record. Root documents carry `@context`; nested ones do not.
pub fn encode<R: Record>(
    record: &R,
    is_root: bool,
    ctx: &EncodingContext,
) -> Result<Value, EncodeError> {
    let depth = if is_root { 0 } else { 1 };
    record.to_value(ctx, depth, ROOT_PATH)
}

/// Decodes a record, failing if `@type` is not `R::TYPE_TAG`.
pub fn decode<R: Record>(value: &Value) -> Result<R, DecodeError> {
    R::from_value(value, ROOT_PATH)
}

/// Encodes a record as a root JSON-LD document string.
pub fn to_json_string<R: Record>(record: &R, ctx: &EncodingContext) -> Result<String, EncodeError> {
    let value = encode(record, true, ctx)?;
    let text = if ctx.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

/// Parses and decodes a JSON-LD document string.
pub fn from_json_str<R: Record>(json: &str) -> Result<R, DecodeError> {
    let value: Value = serde_json::from_str(json)?;
    decode(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let ctx = EncodingContext::new();
        assert_eq!(ctx.time_zone, None);
        assert_eq!(ctx.fraction_digits, 3);
        assert!(ctx.zulu);
        assert!(!ctx.pretty);
    }

    #[test]
    fn test_fraction_digits_clamped() {
        assert_eq!(EncodingContext::new().with_fraction_digits(0).fraction_digits, 1);
        assert_eq!(EncodingContext::new().with_fraction_digits(9).fraction_digits, 6);
    }

    #[test]
    fn test_time_zone_normalized() {
        assert_eq!(EncodingContext::new().with_time_zone(3630).time_zone, Some(3600));
        assert_eq!(EncodingContext::new().with_time_zone(-5430).time_zone, Some(-5400));
        assert_eq!(
            EncodingContext::new().with_time_zone(30 * 3600).time_zone,
            Some(24 * 3600)
        );
    }

    #[test]
    fn test_default_context_keeps_microseconds() {
        let ts = crate::model::Timestamp::with_offset(1_500, -8 * 3600);
        let value = encode(&ts, true, &EncodingContext::default()).unwrap();
        assert_eq!(decode::<crate::model::Timestamp>(&value).unwrap(), ts);
        let nested = encode(&ts, false, &EncodingContext::default()).unwrap();
        assert_eq!(decode::<crate::model::Timestamp>(&nested).unwrap(), ts);
    }

    #[test]
    fn test_from_json_str_reports_syntax() {
        let err = from_json_str::<crate::model::QuantitativeValue>("{").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }
}
