//! `QuantitativeValue` nodes and typed measurement fields.

use log::warn;

use crate::codec::primitives::{NodeReader, NodeWriter};
use crate::codec::record::Record;
use crate::codec::AttributeKey;
use crate::error::{DecodeError, EncodeError};
use crate::model::QuantitativeValue;
use crate::units::{Dimension, Measurement};

crate::attribute_keys! {
    pub enum QuantitativeValueKey {
        Value = "value",
        UnitCode = "unitCode",
        UnitText = "unitText",
    }
}

impl Record for QuantitativeValue {
    const TYPE_TAG: &'static str = "QuantitativeValue";
    type Key = QuantitativeValueKey;

    fn encode_attributes(
        &self,
        node: &mut NodeWriter<'_, QuantitativeValueKey>,
    ) -> Result<(), EncodeError> {
        node.write_f64(QuantitativeValueKey::Value, self.value)?;
        node.write_string(QuantitativeValueKey::UnitCode, &self.unit_code);
        node.write_opt_string(QuantitativeValueKey::UnitText, self.unit_text.as_deref());
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, QuantitativeValueKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            value: node.read_f64(QuantitativeValueKey::Value)?,
            unit_code: node.read_string(QuantitativeValueKey::UnitCode)?,
            unit_text: node.read_opt_string(QuantitativeValueKey::UnitText)?,
        })
    }
}

/// A measurement field of dimension `U`.
///
/// Fields call [`Measured::encode`] and [`Measured::decode`] explicitly; the
/// value travels as a `QuantitativeValue` in the canonical unit of `U`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measured<U: Dimension>(pub Measurement<U>);

impl<U: Dimension> Measured<U> {
    pub fn new(measurement: Measurement<U>) -> Self {
        Measured(measurement)
    }

    pub fn into_inner(self) -> Measurement<U> {
        self.0
    }

    /// Writes the measurement under `key`.
    pub fn encode<K: AttributeKey>(
        &self,
        node: &mut NodeWriter<'_, K>,
        key: K,
    ) -> Result<(), EncodeError> {
        node.write_record(key, &QuantitativeValue::from_measurement(&self.0))
    }

    /// Writes the measurement under `key` if present.
    pub fn encode_opt<K: AttributeKey>(
        value: Option<&Measurement<U>>,
        node: &mut NodeWriter<'_, K>,
        key: K,
    ) -> Result<(), EncodeError> {
        match value {
            Some(m) => Measured(*m).encode(node, key),
            None => Ok(()),
        }
    }

    /// Reads the measurement under `key`.
    ///
    /// Absent fields and values whose unit code does not belong to `U` both
    /// read as `None`; only malformed nodes are errors.
    pub fn decode<K: AttributeKey>(
        node: &NodeReader<'_, K>,
        key: K,
    ) -> Result<Option<Self>, DecodeError> {
        let Some(value) = node.read_opt_record::<QuantitativeValue>(key)? else {
            return Ok(None);
        };
        let measurement = value.to_measurement::<U>();
        if measurement.is_none() {
            warn!(
                "unit code {:?} at {}.{} does not convert to {:?}",
                value.unit_code,
                node.path(),
                key.as_str(),
                U::canonical()
            );
        }
        Ok(measurement.map(Measured))
    }
}

impl<U: Dimension> From<Measurement<U>> for Measured<U> {
    fn from(measurement: Measurement<U>) -> Self {
        Measured(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::record::{decode, encode, EncodingContext};
    use crate::units::{InformationStorageUnit, SpeedUnit, TemperatureUnit};
    use serde_json::json;

    crate::attribute_keys! {
        enum Key {
            Wind = "windSpeed",
        }
    }

    #[test]
    fn test_percentage_shape() {
        let value = encode(
            &QuantitativeValue::percentage(0.75),
            false,
            &EncodingContext::default(),
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"@type": "QuantitativeValue", "value": 75.0, "unitCode": "P1", "unitText": "%"})
        );
        let back = decode::<QuantitativeValue>(&value).unwrap();
        assert_eq!(back.ratio(), Some(0.75));
    }

    #[test]
    fn test_missing_unit_code() {
        let err = decode::<QuantitativeValue>(&json!({"@type": "QuantitativeValue", "value": 1}))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                key: "unitCode",
                path: "$".to_string()
            }
        );
    }

    #[test]
    fn test_measured_field_round_trip() {
        let ctx = EncodingContext::default();
        let mut node = NodeWriter::<Key>::new(&ctx, 1, "$", "Observation");
        Measured::new(Measurement::new(36.0, SpeedUnit::KilometersPerHour))
            .encode(&mut node, Key::Wind)
            .unwrap();
        let value = node.finish();
        assert_eq!(value["windSpeed"]["unitCode"], "MTS");

        let reader = NodeReader::<Key>::new(&value, "$").unwrap();
        let wind = Measured::<SpeedUnit>::decode(&reader, Key::Wind).unwrap().unwrap();
        let kmh = wind.into_inner().converted_to(SpeedUnit::KilometersPerHour);
        assert!((kmh.value - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_measured_field_wrong_dimension() {
        let value = json!({
            "@type": "Observation",
            "windSpeed": {"@type": "QuantitativeValue", "value": 20, "unitCode": "CEL"}
        });
        let reader = NodeReader::<Key>::new(&value, "$").unwrap();
        assert_eq!(Measured::<SpeedUnit>::decode(&reader, Key::Wind).unwrap(), None);
        assert!(Measured::<TemperatureUnit>::decode(&reader, Key::Wind).unwrap().is_some());
    }

    #[test]
    fn test_measured_field_lossy_fallback() {
        let ctx = EncodingContext::default();
        let mut node = NodeWriter::<Key>::new(&ctx, 1, "$", "Observation");
        Measured::encode_opt(
            Some(&Measurement::new(4.0, InformationStorageUnit::Megabytes)),
            &mut node,
            Key::Wind,
        )
        .unwrap();
        let value = node.finish();
        assert_eq!(value["windSpeed"]["unitCode"], "MB");

        let reader = NodeReader::<Key>::new(&value, "$").unwrap();
        assert_eq!(
            Measured::<InformationStorageUnit>::decode(&reader, Key::Wind).unwrap(),
            None
        );
    }
}
