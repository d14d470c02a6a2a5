//! Running, cycling, location, weight and body composition
//! characteristics.

use btsig_types::ids;

use crate::scalar::{Scalar, Scale};
use crate::schema::{FieldSchema, FieldSpec, FlagCond};
use crate::unit::Unit;

static RSC_MEASUREMENT_FIELDS: &[FieldSpec] = &[
    // 1/256 m/s
    FieldSpec::always("instantaneous_speed", Scalar::U16).with_scale(Scale::binary(-8)),
    FieldSpec::always("instantaneous_cadence", Scalar::U8),
    FieldSpec::when("instantaneous_stride_length", Scalar::U16, &[FlagCond::set(0)])
        .with_scale(Scale::decimal(-2)),
    FieldSpec::when("total_distance", Scalar::U32, &[FlagCond::set(1)])
        .with_scale(Scale::decimal(-1)),
];
static RSC_MEASUREMENT_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: RSC_MEASUREMENT_FIELDS,
};

static CSC_MEASUREMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::when("cumulative_wheel_revolutions", Scalar::U32, &[FlagCond::set(0)]),
    // 1/1024 s
    FieldSpec::when("last_wheel_event_time", Scalar::U16, &[FlagCond::set(0)])
        .with_scale(Scale::binary(-10)),
    FieldSpec::when("cumulative_crank_revolutions", Scalar::U16, &[FlagCond::set(1)]),
    FieldSpec::when("last_crank_event_time", Scalar::U16, &[FlagCond::set(1)])
        .with_scale(Scale::binary(-10)),
];
static CSC_MEASUREMENT_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: CSC_MEASUREMENT_FIELDS,
};

static CYCLING_POWER_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("instantaneous_power", Scalar::I16),
    FieldSpec::when("pedal_power_balance", Scalar::U8, &[FlagCond::set(0)])
        .with_scale(Scale::binary(-1)),
    FieldSpec::when("accumulated_torque", Scalar::U16, &[FlagCond::set(2)])
        .with_scale(Scale::binary(-5)),
    FieldSpec::when("cumulative_wheel_revolutions", Scalar::U32, &[FlagCond::set(4)]),
    // 1/2048 s
    FieldSpec::when("last_wheel_event_time", Scalar::U16, &[FlagCond::set(4)])
        .with_scale(Scale::binary(-11)),
    FieldSpec::when("cumulative_crank_revolutions", Scalar::U16, &[FlagCond::set(5)]),
    FieldSpec::when("last_crank_event_time", Scalar::U16, &[FlagCond::set(5)])
        .with_scale(Scale::binary(-10)),
];
static CYCLING_POWER_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U16),
    fields: CYCLING_POWER_FIELDS,
};

static LOCATION_AND_SPEED_FIELDS: &[FieldSpec] = &[
    FieldSpec::when("instantaneous_speed", Scalar::U16, &[FlagCond::set(0)])
        .with_scale(Scale::decimal(-2)),
    FieldSpec::when("total_distance", Scalar::U24, &[FlagCond::set(1)])
        .with_scale(Scale::decimal(-1)),
    FieldSpec::when("latitude", Scalar::I32, &[FlagCond::set(2)])
        .with_scale(Scale::decimal(-7)),
    FieldSpec::when("longitude", Scalar::I32, &[FlagCond::set(2)])
        .with_scale(Scale::decimal(-7)),
    FieldSpec::when("elevation", Scalar::I24, &[FlagCond::set(3)])
        .with_scale(Scale::decimal(-2)),
    FieldSpec::when("heading", Scalar::U16, &[FlagCond::set(4)])
        .with_scale(Scale::decimal(-2)),
    FieldSpec::when("rolling_time", Scalar::U8, &[FlagCond::set(5)]),
    FieldSpec::when("utc_time", Scalar::DateTime, &[FlagCond::set(6)]),
];
static LOCATION_AND_SPEED_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U16),
    fields: LOCATION_AND_SPEED_FIELDS,
};

static WEIGHT_MEASUREMENT_FIELDS: &[FieldSpec] = &[
    // 5 g resolution
    FieldSpec::when("weight_kg", Scalar::U16, &[FlagCond::clear(0)])
        .with_scale(Scale::new(5, -3, 0)),
    FieldSpec::when("weight_lb", Scalar::U16, &[FlagCond::set(0)])
        .with_scale(Scale::decimal(-2)),
    FieldSpec::when("timestamp", Scalar::DateTime, &[FlagCond::set(1)]),
    FieldSpec::when("user_id", Scalar::U8, &[FlagCond::set(2)]),
    FieldSpec::when("bmi", Scalar::U16, &[FlagCond::set(3)]).with_scale(Scale::decimal(-1)),
    FieldSpec::when("height_m", Scalar::U16, &[FlagCond::set(3), FlagCond::clear(0)])
        .with_scale(Scale::decimal(-3)),
    FieldSpec::when("height_in", Scalar::U16, &[FlagCond::set(3), FlagCond::set(0)])
        .with_scale(Scale::decimal(-1)),
];
static WEIGHT_MEASUREMENT_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: WEIGHT_MEASUREMENT_FIELDS,
};

static BODY_COMPOSITION_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("body_fat_percentage", Scalar::U16).with_scale(Scale::decimal(-1)),
    FieldSpec::when("timestamp", Scalar::DateTime, &[FlagCond::set(1)]),
    FieldSpec::when("user_id", Scalar::U8, &[FlagCond::set(2)]),
    FieldSpec::when("basal_metabolism", Scalar::U16, &[FlagCond::set(3)]),
    FieldSpec::when("muscle_percentage", Scalar::U16, &[FlagCond::set(4)])
        .with_scale(Scale::decimal(-1)),
    FieldSpec::when("muscle_mass_kg", Scalar::U16, &[FlagCond::set(5), FlagCond::clear(0)])
        .with_scale(Scale::new(5, -3, 0)),
    FieldSpec::when("muscle_mass_lb", Scalar::U16, &[FlagCond::set(5), FlagCond::set(0)])
        .with_scale(Scale::decimal(-2)),
    FieldSpec::when("body_water_mass_kg", Scalar::U16, &[FlagCond::set(6), FlagCond::clear(0)])
        .with_scale(Scale::new(5, -3, 0)),
    FieldSpec::when("body_water_mass_lb", Scalar::U16, &[FlagCond::set(6), FlagCond::set(0)])
        .with_scale(Scale::decimal(-2)),
];
static BODY_COMPOSITION_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U16),
    fields: BODY_COMPOSITION_FIELDS,
};

pub(crate) fn register(units: &mut Vec<Unit>) {
    units.push(
        Unit::composite(
            ids::RSC_MEASUREMENT,
            "RSC Measurement",
            "rsc_measurement",
            &RSC_MEASUREMENT_SCHEMA,
        )
        .with_unit("m/s"),
    );
    units.push(Unit::scalar(
        ids::RSC_FEATURE,
        "RSC Feature",
        "rsc_feature",
        Scalar::U16,
    ));
    units.push(Unit::composite(
        ids::CSC_MEASUREMENT,
        "CSC Measurement",
        "csc_measurement",
        &CSC_MEASUREMENT_SCHEMA,
    ));
    units.push(Unit::scalar(
        ids::CSC_FEATURE,
        "CSC Feature",
        "csc_feature",
        Scalar::U16,
    ));
    units.push(
        Unit::composite(
            ids::CYCLING_POWER_MEASUREMENT,
            "Cycling Power Measurement",
            "cycling_power_measurement",
            &CYCLING_POWER_SCHEMA,
        )
        .with_unit("W"),
    );
    units.push(Unit::scalar(
        ids::CYCLING_POWER_FEATURE,
        "Cycling Power Feature",
        "cycling_power_feature",
        Scalar::U32,
    ));
    units.push(Unit::composite(
        ids::LOCATION_AND_SPEED,
        "Location and Speed",
        "location_and_speed",
        &LOCATION_AND_SPEED_SCHEMA,
    ));
    units.push(Unit::scalar(
        ids::LN_FEATURE,
        "LN Feature",
        "ln_feature",
        Scalar::U32,
    ));
    units.push(
        Unit::composite(
            ids::WEIGHT_MEASUREMENT,
            "Weight Measurement",
            "weight_measurement",
            &WEIGHT_MEASUREMENT_SCHEMA,
        )
        .with_unit("kg"),
    );
    units.push(Unit::scalar(
        ids::WEIGHT_SCALE_FEATURE,
        "Weight Scale Feature",
        "weight_scale_feature",
        Scalar::U32,
    ));
    units.push(
        Unit::composite(
            ids::BODY_COMPOSITION_MEASUREMENT,
            "Body Composition Measurement",
            "body_composition_measurement",
            &BODY_COMPOSITION_SCHEMA,
        )
        .with_unit("%"),
    );
    units.push(Unit::scalar(
        ids::BODY_COMPOSITION_FEATURE,
        "Body Composition Feature",
        "body_composition_feature",
        Scalar::U32,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DependencyContext;
    use btsig_types::Value;

    fn find(id: btsig_types::SpecId) -> Unit {
        let mut units = Vec::new();
        register(&mut units);
        units
            .into_iter()
            .find(|u| u.descriptor.id == id)
            .expect("unit registered")
    }

    fn float_field(value: &Value, name: &str) -> f64 {
        match value.field(name) {
            Some(Value::Float(f)) => *f,
            other => panic!("expected float field {name}, got {other:?}"),
        }
    }

    #[test]
    fn test_rsc_measurement_with_distance() {
        let unit = find(ids::RSC_MEASUREMENT);
        let ctx = DependencyContext::new();
        // distance present: speed 768/256 = 3 m/s, cadence 160, distance 1234.5 m
        let data = [0b0000_0010, 0x00, 0x03, 160, 0x39, 0x30, 0x00, 0x00];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert!((float_field(&value, "instantaneous_speed") - 3.0).abs() < 1e-9);
        assert_eq!(
            value.field("instantaneous_cadence"),
            Some(&Value::Unsigned(160))
        );
        assert!((float_field(&value, "total_distance") - 1234.5).abs() < 1e-9);
        assert!(!value.has_field("instantaneous_stride_length"));
    }

    #[test]
    fn test_csc_measurement_wheel_and_crank() {
        let unit = find(ids::CSC_MEASUREMENT);
        let ctx = DependencyContext::new();
        let data = [
            0b0000_0011,
            0x10, 0x27, 0x00, 0x00, // 10000 wheel revolutions
            0x00, 0x04, // wheel event at 1.0 s
            0xE8, 0x03, // 1000 crank revolutions
            0x00, 0x08, // crank event at 2.0 s
        ];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert_eq!(
            value.field("cumulative_wheel_revolutions"),
            Some(&Value::Unsigned(10000))
        );
        assert!((float_field(&value, "last_wheel_event_time") - 1.0).abs() < 1e-9);
        assert_eq!(
            value.field("cumulative_crank_revolutions"),
            Some(&Value::Unsigned(1000))
        );
        assert!((float_field(&value, "last_crank_event_time") - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycling_power_uses_u16_flags() {
        let unit = find(ids::CYCLING_POWER_MEASUREMENT);
        let ctx = DependencyContext::new();
        // balance present (bit 0): power 250 W, balance 100/2 = 50 %
        let data = [0x01, 0x00, 0xFA, 0x00, 100];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert_eq!(
            value.field("instantaneous_power"),
            Some(&Value::Signed(250))
        );
        assert!((float_field(&value, "pedal_power_balance") - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycling_power_negative_power() {
        let unit = find(ids::CYCLING_POWER_MEASUREMENT);
        let ctx = DependencyContext::new();
        let value = unit.raw_decode(&[0x00, 0x00, 0xFF, 0xFF], &ctx).unwrap();
        assert_eq!(value.field("instantaneous_power"), Some(&Value::Signed(-1)));
    }

    #[test]
    fn test_location_and_speed_coordinates() {
        let unit = find(ids::LOCATION_AND_SPEED);
        let ctx = DependencyContext::new();
        // location present (bit 2): 57.0937890 N, 24.5398126 E
        let mut data = vec![0b0000_0100, 0x00];
        data.extend_from_slice(&570_937_890i32.to_le_bytes());
        data.extend_from_slice(&245_398_126i32.to_le_bytes());
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert!((float_field(&value, "latitude") - 57.093_789).abs() < 1e-6);
        assert!((float_field(&value, "longitude") - 24.539_812_6).abs() < 1e-6);
        assert!(!value.has_field("instantaneous_speed"));
    }

    #[test]
    fn test_weight_measurement_si_and_imperial() {
        let unit = find(ids::WEIGHT_MEASUREMENT);
        let ctx = DependencyContext::new();
        // SI: 14000 * 5 g = 70 kg
        let value = unit.raw_decode(&[0x00, 0xB0, 0x36], &ctx).unwrap();
        assert!((float_field(&value, "weight_kg") - 70.0).abs() < 1e-9);
        assert!(!value.has_field("weight_lb"));
        // imperial: 15432 * 0.01 lb = 154.32 lb
        let value = unit.raw_decode(&[0x01, 0x48, 0x3C], &ctx).unwrap();
        assert!((float_field(&value, "weight_lb") - 154.32).abs() < 1e-9);
    }

    #[test]
    fn test_weight_measurement_height_units_follow_weight_units() {
        let unit = find(ids::WEIGHT_MEASUREMENT);
        let ctx = DependencyContext::new();
        // SI with bmi+height: bmi 24.0, height 1.750 m
        let data = [0b0000_1000, 0xB0, 0x36, 0xF0, 0x00, 0xD6, 0x06];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert!((float_field(&value, "bmi") - 24.0).abs() < 1e-9);
        assert!((float_field(&value, "height_m") - 1.75).abs() < 1e-9);
        assert!(!value.has_field("height_in"));
    }

    #[test]
    fn test_body_composition_mass_units() {
        let unit = find(ids::BODY_COMPOSITION_MEASUREMENT);
        let ctx = DependencyContext::new();
        // muscle mass present, SI: body fat 20.5 %, muscle mass 30 kg
        let data = [0b0010_0000, 0x00, 0xCD, 0x00, 0x70, 0x17];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert!((float_field(&value, "body_fat_percentage") - 20.5).abs() < 1e-9);
        assert!((float_field(&value, "muscle_mass_kg") - 30.0).abs() < 1e-9);
        assert!(!value.has_field("muscle_mass_lb"));
    }
}
