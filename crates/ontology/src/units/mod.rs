//! Typed physical measurements.
//!
//! Every dimension is a unit enum implementing [`Dimension`]. Each unit knows
//! how to convert itself to and from the dimension's canonical unit; there
//! are no direct unit-to-unit conversions, so any conversion is at most two
//! steps through the canonical unit.

use std::fmt;

pub mod dimensions;
pub mod registry;

pub use dimensions::{
    AccelerationUnit, AngleUnit, AreaUnit, ConcentrationMassUnit, DurationUnit,
    ElectricCurrentUnit, ElectricPotentialDifferenceUnit, ElectricResistanceUnit, EnergyUnit,
    FrequencyUnit, IlluminanceUnit, InformationStorageUnit, LengthUnit, MassUnit, PowerUnit,
    PressureUnit, SpeedUnit, TemperatureUnit, VolumeUnit,
};
pub use registry::{mapping_for, mapping_for_code, mapping_for_dimension, UnitMapping};

/// Physical quantity kinds with a canonical row in the unit registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Acceleration,
    Angle,
    Area,
    ConcentrationMass,
    Duration,
    ElectricCurrent,
    ElectricPotentialDifference,
    Energy,
    Frequency,
    Illuminance,
    Length,
    Mass,
    Power,
    Pressure,
    Speed,
    Temperature,
    Volume,
}

impl QuantityKind {
    /// All kinds, in registry order.
    pub const ALL: [QuantityKind; 17] = [
        QuantityKind::Acceleration,
        QuantityKind::Angle,
        QuantityKind::Area,
        QuantityKind::ConcentrationMass,
        QuantityKind::Duration,
        QuantityKind::ElectricCurrent,
        QuantityKind::ElectricPotentialDifference,
        QuantityKind::Energy,
        QuantityKind::Frequency,
        QuantityKind::Illuminance,
        QuantityKind::Length,
        QuantityKind::Mass,
        QuantityKind::Power,
        QuantityKind::Pressure,
        QuantityKind::Speed,
        QuantityKind::Temperature,
        QuantityKind::Volume,
    ];

    /// Returns a stable lowercase name for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            QuantityKind::Acceleration => "acceleration",
            QuantityKind::Angle => "angle",
            QuantityKind::Area => "area",
            QuantityKind::ConcentrationMass => "concentration_mass",
            QuantityKind::Duration => "duration",
            QuantityKind::ElectricCurrent => "electric_current",
            QuantityKind::ElectricPotentialDifference => "electric_potential_difference",
            QuantityKind::Energy => "energy",
            QuantityKind::Frequency => "frequency",
            QuantityKind::Illuminance => "illuminance",
            QuantityKind::Length => "length",
            QuantityKind::Mass => "mass",
            QuantityKind::Power => "power",
            QuantityKind::Pressure => "pressure",
            QuantityKind::Speed => "speed",
            QuantityKind::Temperature => "temperature",
            QuantityKind::Volume => "volume",
        }
    }
}

/// Conversion between a unit and its dimension's canonical unit.
///
/// `canonical = value * coefficient + constant`. The constant is zero for
/// everything except offset scales such as Fahrenheit and Kelvin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    pub coefficient: f64,
    pub constant: f64,
}

impl UnitConverter {
    /// The identity converter, used by canonical units.
    pub const IDENTITY: UnitConverter = UnitConverter::linear(1.0);

    /// A pure scale factor.
    pub const fn linear(coefficient: f64) -> Self {
        Self {
            coefficient,
            constant: 0.0,
        }
    }

    /// A scale factor plus an offset.
    pub const fn affine(coefficient: f64, constant: f64) -> Self {
        Self {
            coefficient,
            constant,
        }
    }

    /// Converts a value in this unit to the canonical unit.
    #[inline]
    pub fn to_canonical(&self, value: f64) -> f64 {
        value * self.coefficient + self.constant
    }

    /// Converts a value in the canonical unit to this unit.
    #[inline]
    pub fn from_canonical(&self, value: f64) -> f64 {
        (value - self.constant) / self.coefficient
    }
}

/// A unit of measure for one physical dimension.
pub trait Dimension: Copy + PartialEq + fmt::Debug + 'static {
    /// Registry kind, or `None` when the registry has no canonical row for
    /// this dimension.
    const KIND: Option<QuantityKind>;

    /// The unit all conversions normalize through.
    fn canonical() -> Self;

    /// Display symbol (e.g. `km/h`).
    fn symbol(&self) -> &'static str;

    /// Conversion to and from [`Dimension::canonical`].
    fn converter(&self) -> UnitConverter;
}

/// A value paired with a unit of a specific dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement<U: Dimension> {
    pub value: f64,
    pub unit: U,
}

impl<U: Dimension> Measurement<U> {
    /// Creates a measurement.
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }

    /// Returns this measurement expressed in `unit`.
    pub fn converted_to(&self, unit: U) -> Measurement<U> {
        if unit == self.unit {
            return *self;
        }
        let canonical = self.unit.converter().to_canonical(self.value);
        Measurement {
            value: unit.converter().from_canonical(canonical),
            unit,
        }
    }

    /// Returns this measurement expressed in the canonical unit.
    pub fn canonical(&self) -> Measurement<U> {
        self.converted_to(U::canonical())
    }
}

impl<U: Dimension> fmt::Display for Measurement<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{a} != {b}");
    }

    #[test]
    fn test_linear_conversion() {
        let length = Measurement::new(1000.0, LengthUnit::Millimeters);
        let meters = length.converted_to(LengthUnit::Meters);
        assert_close(meters.value, 1.0);
        assert_eq!(meters.unit, LengthUnit::Meters);

        let miles = Measurement::new(1.0, LengthUnit::Miles).converted_to(LengthUnit::Kilometers);
        assert_close(miles.value, 1.609344);
    }

    #[test]
    fn test_temperature_conversion() {
        let boiling = Measurement::new(212.0, TemperatureUnit::Fahrenheit);
        assert_close(boiling.canonical().value, 100.0);

        let absolute_zero = Measurement::new(0.0, TemperatureUnit::Kelvin);
        assert_close(absolute_zero.canonical().value, -273.15);

        let body = Measurement::new(37.0, TemperatureUnit::Celsius)
            .converted_to(TemperatureUnit::Fahrenheit);
        assert_close(body.value, 98.6);
    }

    #[test]
    fn test_speed_conversion() {
        let speed = Measurement::new(36.0, SpeedUnit::KilometersPerHour);
        assert_close(speed.canonical().value, 10.0);
    }

    #[test]
    fn test_same_unit_is_identity() {
        let m = Measurement::new(3.5, MassUnit::Pounds);
        assert_eq!(m.converted_to(MassUnit::Pounds), m);
    }

    #[test]
    fn test_display() {
        let m = Measurement::new(20.5, SpeedUnit::KilometersPerHour);
        assert_eq!(m.to_string(), "20.5 km/h");
    }
}
