//! Property tests for the timestamp and unit codecs.

use ontology::codec::{decode, encode, EncodingContext, SemanticKey};
use ontology::schema::contact::PersonKey;
use ontology::units::{
    AccelerationUnit, AngleUnit, AreaUnit, ConcentrationMassUnit, DurationUnit,
    ElectricCurrentUnit, ElectricPotentialDifferenceUnit, EnergyUnit, FrequencyUnit,
    IlluminanceUnit, LengthUnit, MassUnit, PowerUnit, PressureUnit, SpeedUnit, TemperatureUnit,
    VolumeUnit,
};
use ontology::util::timezone_offset;
use ontology::{Dimension, Measurement, QuantitativeValue, Timestamp};
use proptest::prelude::*;

// 1900-01-01 .. 2100-01-01
const MIN_MICROS: i64 = -2_208_988_800_000_000;
const MAX_MICROS: i64 = 4_102_444_800_000_000;

fn arb_offset() -> impl Strategy<Value = i32> {
    (-24 * 60..=24 * 60).prop_map(|minutes: i32| minutes * 60)
}

fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    (MIN_MICROS..MAX_MICROS, arb_offset())
        .prop_map(|(micros, offset)| Timestamp::with_offset(micros, offset))
}

fn micro_context() -> EncodingContext {
    EncodingContext::new().with_fraction_digits(6)
}

fn unit_round_trips<U: Dimension>(value: f64, unit: U) -> Result<(), TestCaseError> {
    let stored = QuantitativeValue::from(Measurement::new(value, unit));
    let back = stored.to_measurement::<U>();
    prop_assert!(back.is_some(), "{:?} did not convert back", unit);
    let back = back.map(|m| m.converted_to(unit).value).unwrap_or(f64::NAN);
    let tolerance = 1e-9 * value.abs().max(1.0);
    prop_assert!((back - value).abs() <= tolerance, "{} {:?} came back as {}", value, unit, back);
    Ok(())
}

proptest! {
    #[test]
    fn timestamp_text_round_trip(ts in arb_timestamp()) {
        let text = ts.format(&micro_context());
        let parsed = Timestamp::parse(&text).unwrap();
        prop_assert_eq!(parsed, ts);
        prop_assert_eq!(timezone_offset(&text), ts.offset());
    }

    #[test]
    fn timestamp_document_round_trip(ts in arb_timestamp(), is_root in any::<bool>()) {
        let value = encode(&ts, is_root, &micro_context()).unwrap();
        prop_assert_eq!(value.is_object(), is_root);
        prop_assert_eq!(decode::<Timestamp>(&value).unwrap(), ts);
    }

    #[test]
    fn default_output_is_exact(ts in arb_timestamp()) {
        let parsed = Timestamp::parse(&ts.to_string()).unwrap();
        prop_assert_eq!(parsed, ts);
        let value = encode(&ts, true, &EncodingContext::default()).unwrap();
        prop_assert_eq!(decode::<Timestamp>(&value).unwrap(), ts);
    }

    #[test]
    fn any_context_zone_keeps_instant(micros in MIN_MICROS..MAX_MICROS, zone in any::<i32>()) {
        let ts = Timestamp::from_epoch_micros(micros);
        let ctx = EncodingContext { time_zone: Some(zone), ..EncodingContext::default() };
        let parsed = Timestamp::parse(&ts.format(&ctx)).unwrap();
        prop_assert!(parsed.same_instant(&ts));
    }

    #[test]
    fn any_instant_prints_parseable_text(micros in any::<i64>(), offset in any::<i32>()) {
        let ts = Timestamp::with_offset(micros, offset);
        prop_assert_eq!(Timestamp::parse(&ts.to_string()).unwrap(), ts);
    }

    #[test]
    fn offset_designator_forms(
        hours in 0i32..=23,
        minutes in 0i32..=59,
        negative in any::<bool>(),
    ) {
        let sign = if negative { '-' } else { '+' };
        let expected = (hours * 3600 + minutes * 60) * if negative { -1 } else { 1 };
        let colon = format!("2025-01-01T12:00:00{}{:02}:{:02}", sign, hours, minutes);
        let compact = format!("2025-01-01T12:00:00{}{:02}{:02}", sign, hours, minutes);
        prop_assert_eq!(timezone_offset(&colon), Some(expected));
        prop_assert_eq!(timezone_offset(&compact), Some(expected));
    }

    #[test]
    fn registered_units_round_trip(value in -1.0e6f64..1.0e6) {
        for &unit in AccelerationUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in AngleUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in AreaUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in ConcentrationMassUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in DurationUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in ElectricCurrentUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in ElectricPotentialDifferenceUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in EnergyUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in FrequencyUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in IlluminanceUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in LengthUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in MassUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in PowerUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in PressureUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in SpeedUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in TemperatureUnit::ALL { unit_round_trips(value, unit)?; }
        for &unit in VolumeUnit::ALL { unit_round_trips(value, unit)?; }
    }

    #[test]
    fn mismatched_dimension_is_none(
        value in -1.0e6f64..1.0e6,
        unit in prop::sample::select(LengthUnit::ALL),
    ) {
        let stored = QuantitativeValue::from(Measurement::new(value, unit));
        prop_assert!(stored.to_measurement::<MassUnit>().is_none());
        prop_assert!(stored.to_measurement::<SpeedUnit>().is_none());
    }

    #[test]
    fn reserved_names_never_parse_as_attributes(name in "@[a-z]{1,8}") {
        let parsed = SemanticKey::<PersonKey>::parse(&name);
        prop_assert!(!matches!(parsed, Some(SemanticKey::Attribute(_))));
    }
}
