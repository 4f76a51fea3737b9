//! Unit enums for each supported dimension.
//!
//! Converters are expressed relative to the dimension's canonical unit, which
//! for registered kinds is the unit named in the registry row.

use super::{Dimension, QuantityKind, UnitConverter};

macro_rules! dimension {
    (
        $(#[$meta:meta])*
        $name:ident, kind: $kind:expr, canonical: $canonical:ident,
        {
            $( $variant:ident => ($symbol:literal, $converter:expr) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every unit of this dimension.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl Dimension for $name {
            const KIND: Option<QuantityKind> = $kind;

            fn canonical() -> Self {
                $name::$canonical
            }

            fn symbol(&self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol ),+
                }
            }

            fn converter(&self) -> UnitConverter {
                match self {
                    $( $name::$variant => $converter ),+
                }
            }
        }
    };
}

use super::UnitConverter as C;

dimension! {
    /// Units of acceleration.
    AccelerationUnit, kind: Some(QuantityKind::Acceleration), canonical: MetersPerSecondSquared,
    {
        MetersPerSecondSquared => ("m/s²", C::IDENTITY),
        Gravity => ("g", C::linear(9.80665)),
    }
}

dimension! {
    /// Units of plane angle.
    AngleUnit, kind: Some(QuantityKind::Angle), canonical: Degrees,
    {
        Degrees => ("°", C::IDENTITY),
        ArcMinutes => ("ʹ", C::linear(1.0 / 60.0)),
        ArcSeconds => ("ʺ", C::linear(1.0 / 3600.0)),
        Radians => ("rad", C::linear(180.0 / std::f64::consts::PI)),
        Gradians => ("grad", C::linear(0.9)),
        Revolutions => ("rev", C::linear(360.0)),
    }
}

dimension! {
    /// Units of area.
    AreaUnit, kind: Some(QuantityKind::Area), canonical: SquareMeters,
    {
        SquareMeters => ("m²", C::IDENTITY),
        SquareKilometers => ("km²", C::linear(1e6)),
        SquareCentimeters => ("cm²", C::linear(1e-4)),
        SquareMillimeters => ("mm²", C::linear(1e-6)),
        SquareInches => ("in²", C::linear(0.00064516)),
        SquareFeet => ("ft²", C::linear(0.09290304)),
        SquareYards => ("yd²", C::linear(0.83612736)),
        SquareMiles => ("mi²", C::linear(2_589_988.110336)),
        Acres => ("ac", C::linear(4046.8564224)),
        Hectares => ("ha", C::linear(10_000.0)),
    }
}

dimension! {
    /// Units of mass concentration. Grams per litre equal kilograms per cubic metre.
    ConcentrationMassUnit, kind: Some(QuantityKind::ConcentrationMass), canonical: GramsPerLiter,
    {
        GramsPerLiter => ("g/L", C::IDENTITY),
        MilligramsPerDeciliter => ("mg/dL", C::linear(0.01)),
        MilligramsPerLiter => ("mg/L", C::linear(0.001)),
    }
}

dimension! {
    /// Units of time duration.
    DurationUnit, kind: Some(QuantityKind::Duration), canonical: Seconds,
    {
        Seconds => ("s", C::IDENTITY),
        Nanoseconds => ("ns", C::linear(1e-9)),
        Microseconds => ("µs", C::linear(1e-6)),
        Milliseconds => ("ms", C::linear(1e-3)),
        Minutes => ("min", C::linear(60.0)),
        Hours => ("hr", C::linear(3600.0)),
    }
}

dimension! {
    /// Units of electric current.
    ElectricCurrentUnit, kind: Some(QuantityKind::ElectricCurrent), canonical: Amperes,
    {
        Amperes => ("A", C::IDENTITY),
        Microamperes => ("µA", C::linear(1e-6)),
        Milliamperes => ("mA", C::linear(1e-3)),
        Kiloamperes => ("kA", C::linear(1e3)),
        Megaamperes => ("MA", C::linear(1e6)),
    }
}

dimension! {
    /// Units of electric potential difference.
    ElectricPotentialDifferenceUnit,
    kind: Some(QuantityKind::ElectricPotentialDifference),
    canonical: Volts,
    {
        Volts => ("V", C::IDENTITY),
        Microvolts => ("µV", C::linear(1e-6)),
        Millivolts => ("mV", C::linear(1e-3)),
        Kilovolts => ("kV", C::linear(1e3)),
        Megavolts => ("MV", C::linear(1e6)),
    }
}

dimension! {
    /// Units of energy.
    EnergyUnit, kind: Some(QuantityKind::Energy), canonical: Joules,
    {
        Joules => ("J", C::IDENTITY),
        Kilojoules => ("kJ", C::linear(1e3)),
        Calories => ("cal", C::linear(4.184)),
        Kilocalories => ("kCal", C::linear(4184.0)),
        KilowattHours => ("kWh", C::linear(3.6e6)),
    }
}

dimension! {
    /// Units of frequency.
    FrequencyUnit, kind: Some(QuantityKind::Frequency), canonical: Hertz,
    {
        Hertz => ("Hz", C::IDENTITY),
        Millihertz => ("mHz", C::linear(1e-3)),
        Kilohertz => ("kHz", C::linear(1e3)),
        Megahertz => ("MHz", C::linear(1e6)),
        Gigahertz => ("GHz", C::linear(1e9)),
    }
}

dimension! {
    /// Units of illuminance.
    IlluminanceUnit, kind: Some(QuantityKind::Illuminance), canonical: Lux,
    {
        Lux => ("lx", C::IDENTITY),
        FootCandles => ("fc", C::linear(10.763910416709722)),
    }
}

dimension! {
    /// Units of length.
    LengthUnit, kind: Some(QuantityKind::Length), canonical: Meters,
    {
        Meters => ("m", C::IDENTITY),
        Kilometers => ("km", C::linear(1e3)),
        Centimeters => ("cm", C::linear(1e-2)),
        Millimeters => ("mm", C::linear(1e-3)),
        Micrometers => ("µm", C::linear(1e-6)),
        Inches => ("in", C::linear(0.0254)),
        Feet => ("ft", C::linear(0.3048)),
        Yards => ("yd", C::linear(0.9144)),
        Miles => ("mi", C::linear(1609.344)),
        NauticalMiles => ("NM", C::linear(1852.0)),
    }
}

dimension! {
    /// Units of mass.
    MassUnit, kind: Some(QuantityKind::Mass), canonical: Kilograms,
    {
        Kilograms => ("kg", C::IDENTITY),
        Grams => ("g", C::linear(1e-3)),
        Milligrams => ("mg", C::linear(1e-6)),
        MetricTons => ("t", C::linear(1e3)),
        Pounds => ("lb", C::linear(0.45359237)),
        Ounces => ("oz", C::linear(0.028349523125)),
        Stones => ("st", C::linear(6.35029318)),
    }
}

dimension! {
    /// Units of power.
    PowerUnit, kind: Some(QuantityKind::Power), canonical: Watts,
    {
        Watts => ("W", C::IDENTITY),
        Milliwatts => ("mW", C::linear(1e-3)),
        Kilowatts => ("kW", C::linear(1e3)),
        Megawatts => ("MW", C::linear(1e6)),
        Horsepower => ("hp", C::linear(745.6998715822702)),
    }
}

dimension! {
    /// Units of pressure.
    PressureUnit, kind: Some(QuantityKind::Pressure), canonical: Kilopascals,
    {
        Kilopascals => ("kPa", C::IDENTITY),
        Pascals => ("Pa", C::linear(1e-3)),
        Hectopascals => ("hPa", C::linear(0.1)),
        Megapascals => ("MPa", C::linear(1e3)),
        Bars => ("bar", C::linear(100.0)),
        Millibars => ("mbar", C::linear(0.1)),
        InchesOfMercury => ("inHg", C::linear(3.386389)),
        MillimetersOfMercury => ("mmHg", C::linear(0.1333224)),
        PoundsPerSquareInch => ("psi", C::linear(6.894757)),
    }
}

dimension! {
    /// Units of speed.
    SpeedUnit, kind: Some(QuantityKind::Speed), canonical: MetersPerSecond,
    {
        MetersPerSecond => ("m/s", C::IDENTITY),
        KilometersPerHour => ("km/h", C::linear(1.0 / 3.6)),
        MilesPerHour => ("mph", C::linear(0.44704)),
        Knots => ("kn", C::linear(1852.0 / 3600.0)),
    }
}

dimension! {
    /// Units of temperature.
    TemperatureUnit, kind: Some(QuantityKind::Temperature), canonical: Celsius,
    {
        Celsius => ("°C", C::IDENTITY),
        Fahrenheit => ("°F", C::affine(5.0 / 9.0, -32.0 * 5.0 / 9.0)),
        Kelvin => ("K", C::affine(1.0, -273.15)),
    }
}

dimension! {
    /// Units of volume.
    VolumeUnit, kind: Some(QuantityKind::Volume), canonical: CubicMeters,
    {
        CubicMeters => ("m³", C::IDENTITY),
        Liters => ("L", C::linear(1e-3)),
        Milliliters => ("mL", C::linear(1e-6)),
        CubicCentimeters => ("cm³", C::linear(1e-6)),
        CubicFeet => ("ft³", C::linear(0.028316846592)),
        CubicInches => ("in³", C::linear(0.000016387064)),
        Gallons => ("gal", C::linear(0.003785411784)),
    }
}

dimension! {
    /// Units of digital information. Not part of the unit registry.
    InformationStorageUnit, kind: None, canonical: Bytes,
    {
        Bytes => ("B", C::IDENTITY),
        Bits => ("bit", C::linear(0.125)),
        Kilobytes => ("kB", C::linear(1e3)),
        Megabytes => ("MB", C::linear(1e6)),
        Kibibytes => ("KiB", C::linear(1024.0)),
        Mebibytes => ("MiB", C::linear(1_048_576.0)),
    }
}

dimension! {
    /// Units of electric resistance. Not part of the unit registry.
    ElectricResistanceUnit, kind: None, canonical: Ohms,
    {
        Ohms => ("Ω", C::IDENTITY),
        Milliohms => ("mΩ", C::linear(1e-3)),
        Kiloohms => ("kΩ", C::linear(1e3)),
        Megaohms => ("MΩ", C::linear(1e6)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_inverse<U: Dimension>(units: &[U]) {
        for unit in units {
            let converter = unit.converter();
            let back = converter.from_canonical(converter.to_canonical(12.5));
            assert!((back - 12.5).abs() < 1e-9, "{:?} does not invert", unit);
        }
    }

    #[test]
    fn test_canonical_units_are_identity() {
        assert_eq!(LengthUnit::canonical().converter(), UnitConverter::IDENTITY);
        assert_eq!(TemperatureUnit::canonical().converter(), UnitConverter::IDENTITY);
        assert_eq!(InformationStorageUnit::canonical().converter(), UnitConverter::IDENTITY);
    }

    #[test]
    fn test_converters_invert() {
        check_inverse(AccelerationUnit::ALL);
        check_inverse(AngleUnit::ALL);
        check_inverse(AreaUnit::ALL);
        check_inverse(DurationUnit::ALL);
        check_inverse(LengthUnit::ALL);
        check_inverse(MassUnit::ALL);
        check_inverse(PressureUnit::ALL);
        check_inverse(SpeedUnit::ALL);
        check_inverse(TemperatureUnit::ALL);
        check_inverse(VolumeUnit::ALL);
    }

    #[test]
    fn test_unregistered_dimensions_have_no_kind() {
        assert_eq!(InformationStorageUnit::KIND, None);
        assert_eq!(ElectricResistanceUnit::KIND, None);
        assert_eq!(SpeedUnit::KIND, Some(QuantityKind::Speed));
    }
}
