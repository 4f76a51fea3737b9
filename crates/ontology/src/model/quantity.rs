//! schema.org `QuantitativeValue`.

use log::warn;

use crate::units::registry::{mapping_for_dimension, PERCENT_CODE, PERCENT_TEXT};
use crate::units::{Dimension, Measurement};

/// A magnitude tagged with a UN/CEFACT unit code.
///
/// Any code is a valid stored value. Whether it can be turned back into a
/// typed [`Measurement`] is decided by [`QuantitativeValue::to_measurement`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuantitativeValue {
    pub value: f64,
    pub unit_code: String,
    pub unit_text: Option<String>,
}

impl QuantitativeValue {
    pub fn new(value: f64, unit_code: impl Into<String>, unit_text: Option<String>) -> Self {
        Self {
            value,
            unit_code: unit_code.into(),
            unit_text,
        }
    }

    /// A percentage from a ratio: `0.75` is stored as `75` with code `P1`.
    pub fn percentage(ratio: f64) -> Self {
        Self::new(ratio * 100.0, PERCENT_CODE, Some(PERCENT_TEXT.to_string()))
    }

    pub fn is_percentage(&self) -> bool {
        self.unit_code == PERCENT_CODE
    }

    /// The stored percentage as a ratio, or `None` if this is not a
    /// percentage.
    pub fn ratio(&self) -> Option<f64> {
        self.is_percentage().then(|| self.value / 100.0)
    }

    /// Builds a value from a typed measurement.
    ///
    /// Registered dimensions are normalized to the canonical unit and tagged
    /// with the registry code. Unregistered dimensions keep their magnitude
    /// and use the unit symbol as both code and text; such values cannot be
    /// converted back.
    pub fn from_measurement<U: Dimension>(measurement: &Measurement<U>) -> Self {
        match mapping_for_dimension::<U>() {
            Some(mapping) => Self::new(
                measurement.canonical().value,
                mapping.code,
                Some(mapping.text.to_string()),
            ),
            None => {
                let symbol = measurement.unit.symbol();
                warn!(
                    "no unit code registered for {:?}; storing {} with code {:?}",
                    measurement.unit, measurement.value, symbol
                );
                Self::new(measurement.value, symbol, Some(symbol.to_string()))
            }
        }
    }

    /// Converts back to a measurement in the canonical unit of `U`.
    ///
    /// Returns `None` when `U` has no registry row or the stored code is not
    /// the one registered for `U`.
    pub fn to_measurement<U: Dimension>(&self) -> Option<Measurement<U>> {
        let mapping = mapping_for_dimension::<U>()?;
        if mapping.code != self.unit_code {
            return None;
        }
        Some(Measurement::new(self.value, U::canonical()))
    }
}

impl<U: Dimension> From<Measurement<U>> for QuantitativeValue {
    fn from(measurement: Measurement<U>) -> Self {
        Self::from_measurement(&measurement)
    }
}

impl<U: Dimension> From<&Measurement<U>> for QuantitativeValue {
    fn from(measurement: &Measurement<U>) -> Self {
        Self::from_measurement(measurement)
    }
}
