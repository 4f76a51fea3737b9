//! UN/CEFACT unit code registry.
//!
//! One row per [`QuantityKind`]: the wire code, display text and canonical
//! unit every stored magnitude is normalized to. The table is fixed data;
//! supporting a new kind means adding a row here and a unit enum in
//! [`dimensions`](super::dimensions), never new conversion logic.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use super::{Dimension, QuantityKind};

/// UN/CEFACT common code for percent.
pub const PERCENT_CODE: &str = "P1";

/// Display text for percent values.
pub const PERCENT_TEXT: &str = "%";

/// A row of the unit registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitMapping {
    /// Physical quantity this row covers.
    pub kind: QuantityKind,
    /// UN/CEFACT common code written as `unitCode`.
    pub code: &'static str,
    /// Human-readable text written as `unitText`.
    pub text: &'static str,
    /// Symbol of the canonical unit magnitudes are stored in.
    pub canonical: &'static str,
}

const fn row(
    kind: QuantityKind,
    code: &'static str,
    text: &'static str,
    canonical: &'static str,
) -> UnitMapping {
    UnitMapping {
        kind,
        code,
        text,
        canonical,
    }
}

/// The canonical unit table. SI units throughout, except kilopascals for
/// pressure and degrees for angles.
pub static UNIT_MAPPINGS: [UnitMapping; 17] = [
    row(QuantityKind::Acceleration, "MSK", "m/s²", "m/s²"),
    row(QuantityKind::Angle, "DEG", "°", "°"),
    row(QuantityKind::Area, "MTK", "m²", "m²"),
    row(QuantityKind::ConcentrationMass, "KMQ", "kg/m³", "g/L"),
    row(QuantityKind::Duration, "SEC", "s", "s"),
    row(QuantityKind::ElectricCurrent, "AMP", "A", "A"),
    row(QuantityKind::ElectricPotentialDifference, "VLT", "V", "V"),
    row(QuantityKind::Energy, "JOU", "J", "J"),
    row(QuantityKind::Frequency, "HTZ", "Hz", "Hz"),
    row(QuantityKind::Illuminance, "LUX", "lx", "lx"),
    row(QuantityKind::Length, "MTR", "m", "m"),
    row(QuantityKind::Mass, "KGM", "kg", "kg"),
    row(QuantityKind::Power, "WTT", "W", "W"),
    row(QuantityKind::Pressure, "KPA", "kPa", "kPa"),
    row(QuantityKind::Speed, "MTS", "m/s", "m/s"),
    row(QuantityKind::Temperature, "CEL", "°C", "°C"),
    row(QuantityKind::Volume, "MTQ", "m³", "m³"),
];

lazy_static! {
    static ref BY_KIND: FxHashMap<QuantityKind, usize> = UNIT_MAPPINGS
        .iter()
        .enumerate()
        .map(|(i, m)| (m.kind, i))
        .collect();
    static ref BY_CODE: FxHashMap<&'static str, usize> = UNIT_MAPPINGS
        .iter()
        .enumerate()
        .map(|(i, m)| (m.code, i))
        .collect();
}

/// Returns the registry row for a quantity kind.
pub fn mapping_for(kind: QuantityKind) -> Option<&'static UnitMapping> {
    BY_KIND.get(&kind).map(|&i| &UNIT_MAPPINGS[i])
}

/// Returns the registry row for a wire unit code.
pub fn mapping_for_code(code: &str) -> Option<&'static UnitMapping> {
    BY_CODE.get(code).map(|&i| &UNIT_MAPPINGS[i])
}

/// Returns the registry row for a dimension, if it has one.
pub fn mapping_for_dimension<U: Dimension>() -> Option<&'static UnitMapping> {
    U::KIND.and_then(mapping_for)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{
        AccelerationUnit, AngleUnit, AreaUnit, ConcentrationMassUnit, DurationUnit,
        ElectricCurrentUnit, ElectricPotentialDifferenceUnit, EnergyUnit, FrequencyUnit,
        IlluminanceUnit, InformationStorageUnit, LengthUnit, MassUnit, PowerUnit, PressureUnit,
        SpeedUnit, TemperatureUnit, VolumeUnit,
    };

    fn canonical_matches<U: Dimension>() {
        let mapping = mapping_for_dimension::<U>().expect("dimension is registered");
        assert_eq!(
            mapping.canonical,
            U::canonical().symbol(),
            "canonical unit mismatch for {:?}",
            mapping.kind
        );
    }

    #[test]
    fn test_every_kind_has_exactly_one_row() {
        for kind in QuantityKind::ALL {
            let rows = UNIT_MAPPINGS.iter().filter(|m| m.kind == kind).count();
            assert_eq!(rows, 1, "{}", kind.as_str());
        }
    }

    #[test]
    fn test_codes_are_unique() {
        assert_eq!(BY_CODE.len(), UNIT_MAPPINGS.len());
        assert!(mapping_for_code(PERCENT_CODE).is_none());
    }

    #[test]
    fn test_lookup_both_directions() {
        let speed = mapping_for(QuantityKind::Speed).unwrap();
        assert_eq!(speed.code, "MTS");
        assert_eq!(speed.text, "m/s");
        assert_eq!(mapping_for_code("CEL").unwrap().kind, QuantityKind::Temperature);
        assert!(mapping_for_code("KMH").is_none());
        assert!(mapping_for_code("").is_none());
    }

    #[test]
    fn test_rows_agree_with_dimension_canonicals() {
        canonical_matches::<AccelerationUnit>();
        canonical_matches::<AngleUnit>();
        canonical_matches::<AreaUnit>();
        canonical_matches::<ConcentrationMassUnit>();
        canonical_matches::<DurationUnit>();
        canonical_matches::<ElectricCurrentUnit>();
        canonical_matches::<ElectricPotentialDifferenceUnit>();
        canonical_matches::<EnergyUnit>();
        canonical_matches::<FrequencyUnit>();
        canonical_matches::<IlluminanceUnit>();
        canonical_matches::<LengthUnit>();
        canonical_matches::<MassUnit>();
        canonical_matches::<PowerUnit>();
        canonical_matches::<PressureUnit>();
        canonical_matches::<SpeedUnit>();
        canonical_matches::<TemperatureUnit>();
        canonical_matches::<VolumeUnit>();
    }

    #[test]
    fn test_unregistered_dimension() {
        assert!(mapping_for_dimension::<InformationStorageUnit>().is_none());
    }
}
