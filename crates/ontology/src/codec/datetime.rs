//! `DateTime` nodes.
//!
//! A timestamp encodes as a full node only at the document root:
//!
//! ```json
//! {
//!   "@context": "https://schema.org",
//!   "@type": "DateTime",
//!   "value": "2025-01-01T09:00:00.000-08:00"
//! }
//! ```
//!
//! Everywhere else it is the bare string. Both shapes decode in either
//! position.

use serde_json::Value;

use crate::codec::key::TYPE_KEY;
use crate::codec::primitives::{NodeReader, NodeWriter};
use crate::codec::record::{encode_node, EncodingContext, Record};
use crate::error::{json_kind, DecodeError, EncodeError};
use crate::model::Timestamp;

crate::attribute_keys! {
    pub enum DateTimeKey {
        Value = "value",
    }
}

impl Record for Timestamp {
    const TYPE_TAG: &'static str = "DateTime";
    type Key = DateTimeKey;

    fn encode_attributes(&self, node: &mut NodeWriter<'_, DateTimeKey>) -> Result<(), EncodeError> {
        node.write_timestamp(DateTimeKey::Value, self);
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, DateTimeKey>) -> Result<Self, DecodeError> {
        node.read_timestamp(DateTimeKey::Value)
    }

    fn to_value(
        &self,
        ctx: &EncodingContext,
        depth: usize,
        path: &str,
    ) -> Result<Value, EncodeError> {
        if depth == 0 {
            encode_node(self, ctx, depth, path)
        } else {
            Ok(Value::String(self.format(ctx)))
        }
    }

    /// Tries the object shape first, then the bare string. In the object
    /// shape `@type` may be omitted, but if present it must be `DateTime`.
    fn from_value(value: &Value, path: &str) -> Result<Self, DecodeError> {
        match value {
            Value::Object(map) => {
                let node = NodeReader::<DateTimeKey>::new(value, path)?;
                if map.contains_key(TYPE_KEY) {
                    node.expect_type(Self::TYPE_TAG)?;
                }
                Self::decode_attributes(&node)
            }
            Value::String(text) => Timestamp::parse(text).map_err(|e| {
                DecodeError::MalformedTimestamp {
                    value: text.clone(),
                    reason: e.message,
                    path: path.to_string(),
                }
            }),
            other => Err(DecodeError::InvalidField {
                expected: "a timestamp string or DateTime object",
                found: json_kind(other),
                path: path.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::record::{decode, encode};
    use serde_json::json;

    #[test]
    fn test_root_shape() {
        let ts = Timestamp::with_offset(0, -8 * 3600);
        let value = encode(&ts, true, &EncodingContext::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "@context": "https://schema.org",
                "@type": "DateTime",
                "value": "1969-12-31T16:00:00.000-08:00"
            })
        );
        assert_eq!(decode::<Timestamp>(&value).unwrap(), ts);
    }

    #[test]
    fn test_nested_shape_is_bare_string() {
        let ts = Timestamp::from_epoch_micros(0);
        let value = encode(&ts, false, &EncodingContext::default()).unwrap();
        assert_eq!(value, json!("1970-01-01T00:00:00.000Z"));
        assert_eq!(decode::<Timestamp>(&value).unwrap(), Timestamp::with_offset(0, 0));
    }

    #[test]
    fn test_object_without_type() {
        let value = json!({"value": "2025-01-01T09:00:00+09:00"});
        let ts = decode::<Timestamp>(&value).unwrap();
        assert_eq!(ts.offset(), Some(9 * 3600));
    }

    #[test]
    fn test_object_with_wrong_type() {
        let value = json!({"@type": "Date", "value": "2025-01-01T09:00:00Z"});
        assert!(matches!(
            decode::<Timestamp>(&value),
            Err(DecodeError::TypeTagMismatch { .. })
        ));
    }

    #[test]
    fn test_malformed_text() {
        let err = decode::<Timestamp>(&json!("2025-01-01T09:00:00")).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedTimestamp { .. }));

        let err = decode::<Timestamp>(&json!({"value": "2025-01-01T09:00:00±01:00"})).unwrap_err();
        assert_eq!(err.path(), Some("$.value"));

        assert!(matches!(
            decode::<Timestamp>(&json!(1700000000)),
            Err(DecodeError::InvalidField { .. })
        ));
    }
}
