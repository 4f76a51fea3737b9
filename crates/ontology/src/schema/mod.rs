//! schema.org records.
//!
//! Every record implements [`Record`]. [`Thing`] wraps any of them for
//! callers that only learn the type from the document's `@type`. All but
//! [`WeatherForecast`], a GeoJSON-LD feature, use the schema.org context.

use serde_json::Value;

use crate::codec::{AttributeKey, EncodingContext, NodeReader, Record, ROOT_PATH, TYPE_KEY};
use crate::error::{DecodeError, EncodeError};
use crate::model::{QuantitativeValue, Timestamp};

pub mod calendar;
pub mod contact;
pub mod forecast;
pub mod place;
pub mod weather;

pub use calendar::{ActionStatus, Event, ItemList, PlanAction};
pub use contact::{ContactPoint, Organization, Person, PostalAddress};
pub use forecast::{ForecastPeriod, ForecastProperties, Polygon, UnitValue, WeatherForecast};
pub use place::{GeoCoordinates, Place, Trip};
pub use weather::WeatherConditions;

macro_rules! things {
    ($( $variant:ident($ty:ty) ),+ $(,)?) => {
        /// Any record this crate can encode or decode.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Thing {
            $( $variant($ty) ),+
        }

        $(
            impl From<$ty> for Thing {
                fn from(record: $ty) -> Self {
                    Thing::$variant(record)
                }
            }
        )+

        impl Thing {
            /// Every type tag [`Thing::decode`] accepts.
            pub const TYPE_TAGS: &'static [&'static str] = &[$( <$ty as Record>::TYPE_TAG ),+];

            /// The record's `@type`.
            pub fn type_tag(&self) -> &'static str {
                match self {
                    $( Thing::$variant(_) => <$ty as Record>::TYPE_TAG ),+
                }
            }

            /// Encodes the wrapped record.
            pub fn encode(
                &self,
                is_root: bool,
                ctx: &EncodingContext,
            ) -> Result<Value, EncodeError> {
                let depth = if is_root { 0 } else { 1 };
                match self {
                    $( Thing::$variant(record) => record.to_value(ctx, depth, ROOT_PATH) ),+
                }
            }

            fn decode_tagged(tag: &str, value: &Value) -> Result<Thing, DecodeError> {
                $(
                    if tag == <$ty as Record>::TYPE_TAG {
                        return <$ty as Record>::from_value(value, ROOT_PATH).map(Thing::$variant);
                    }
                )+
                Err(DecodeError::UnknownTypeTag {
                    found: tag.to_string(),
                    path: ROOT_PATH.to_string(),
                })
            }
        }
    };
}

things! {
    ContactPoint(ContactPoint),
    PostalAddress(PostalAddress),
    GeoCoordinates(GeoCoordinates),
    Organization(Organization),
    Person(Person),
    Place(Place),
    Event(Event),
    PlanAction(PlanAction),
    ItemList(ItemList),
    Trip(Trip),
    WeatherConditions(WeatherConditions),
    WeatherForecast(WeatherForecast),
    DateTime(Timestamp),
    QuantitativeValue(QuantitativeValue),
}

/// Attribute space with no attributes, for reading only the reserved keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoAttributes {}

impl AttributeKey for NoAttributes {
    fn as_str(&self) -> &'static str {
        match *self {}
    }

    fn parse(_name: &str) -> Option<Self> {
        None
    }
}

/// Reads a document's `@type`.
fn root_type_tag(value: &Value) -> Result<&str, DecodeError> {
    // A bare string at the root is a DateTime in its nested shape.
    if value.is_string() {
        return Ok(<Timestamp as Record>::TYPE_TAG);
    }
    let tag = value
        .as_object()
        .and_then(|map| map.get(TYPE_KEY))
        .and_then(Value::as_str);
    match tag {
        Some(tag) => Ok(tag),
        None => NodeReader::<NoAttributes>::new(value, ROOT_PATH)?.type_tag(),
    }
}

impl Thing {
    /// Decodes a document of any known type, dispatching on `@type`.
    pub fn decode(value: &Value) -> Result<Thing, DecodeError> {
        let tag = root_type_tag(value)?;
        Thing::decode_tagged(tag, value)
    }

    /// Decodes a document that must have type tag `expected`.
    ///
    /// As with [`decode`](crate::codec::decode), a `DateTime` object may omit
    /// `@type`.
    pub fn decode_expecting(value: &Value, expected: &str) -> Result<Thing, DecodeError> {
        let found = match root_type_tag(value) {
            Ok(found) => found,
            Err(DecodeError::MissingField { key: TYPE_KEY, .. })
                if expected == <Timestamp as Record>::TYPE_TAG =>
            {
                expected
            }
            Err(err) => return Err(err),
        };
        if found != expected {
            return Err(DecodeError::TypeTagMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
                path: ROOT_PATH.to_string(),
            });
        }
        Thing::decode_tagged(found, value)
    }

    /// Parses and decodes a JSON-LD document string.
    pub fn from_json_str(json: &str) -> Result<Thing, DecodeError> {
        let value: Value = serde_json::from_str(json)?;
        Thing::decode(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_on_type() {
        let value = json!({
            "@context": "https://schema.org",
            "@type": "ContactPoint",
            "contactType": "phone",
            "identifier": "+1 555 0100"
        });
        let thing = Thing::decode(&value).unwrap();
        assert_eq!(thing, Thing::ContactPoint(ContactPoint::new("phone", "+1 555 0100")));
        assert_eq!(thing.type_tag(), "ContactPoint");
        assert_eq!(thing.encode(true, &EncodingContext::default()).unwrap(), value);
    }

    #[test]
    fn test_unknown_type() {
        let err = Thing::decode(&json!({"@type": "Recipe"})).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownTypeTag { ref found, .. } if found == "Recipe"));
    }

    #[test]
    fn test_missing_type() {
        let err = Thing::decode(&json!({"name": "x"})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { key: "@type", .. }));
        let err = Thing::decode(&json!(42)).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject { .. }));
    }

    #[test]
    fn test_decode_expecting_names_both_tags() {
        let value = json!({"@type": "WrongTag"});
        let err = Thing::decode_expecting(&value, "ContactPoint").unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeTagMismatch {
                expected: "ContactPoint".to_string(),
                found: "WrongTag".to_string(),
                path: "$".to_string(),
            }
        );
    }

    #[test]
    fn test_bare_datetime_document() {
        let thing = Thing::decode(&json!("2025-01-01T09:00:00.000-08:00")).unwrap();
        assert_eq!(thing.type_tag(), "DateTime");
        assert!(matches!(thing, Thing::DateTime(ts) if ts.offset() == Some(-8 * 3600)));
    }

    #[test]
    fn test_untagged_datetime_object() {
        let value = json!({"value": "2025-01-01T09:00:00.000+09:00"});
        let thing = Thing::decode_expecting(&value, "DateTime").unwrap();
        assert_eq!(thing, Thing::DateTime(crate::codec::decode(&value).unwrap()));

        let err = Thing::decode_expecting(&value, "Person").unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { key: "@type", .. }));
        let err = Thing::decode_expecting(&json!({"value": "soon"}), "DateTime").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_type_tags_are_unique() {
        let mut tags = Thing::TYPE_TAGS.to_vec();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), Thing::TYPE_TAGS.len());
    }
}
