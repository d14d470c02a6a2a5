//! User Data service characteristics.

use btsig_types::ids;

use crate::scalar::{Scalar, Scale};
use crate::schema::{FieldSchema, FieldSpec};
use crate::unit::{LengthRule, Unit};

// Bare calendar date, no time-of-day part.
static DATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("year", Scalar::U16),
    FieldSpec::always("month", Scalar::U8),
    FieldSpec::always("day", Scalar::U8),
];
static DATE_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: DATE_FIELDS,
};

pub(crate) fn register(units: &mut Vec<Unit>) {
    for (id, name, tail) in [
        (
            ids::AEROBIC_HEART_RATE_LOWER_LIMIT,
            "Aerobic Heart Rate Lower Limit",
            "aerobic_heart_rate_lower_limit",
        ),
        (
            ids::AEROBIC_HEART_RATE_UPPER_LIMIT,
            "Aerobic Heart Rate Upper Limit",
            "aerobic_heart_rate_upper_limit",
        ),
        (ids::AEROBIC_THRESHOLD, "Aerobic Threshold", "aerobic_threshold"),
        (
            ids::ANAEROBIC_HEART_RATE_LOWER_LIMIT,
            "Anaerobic Heart Rate Lower Limit",
            "anaerobic_heart_rate_lower_limit",
        ),
        (
            ids::ANAEROBIC_HEART_RATE_UPPER_LIMIT,
            "Anaerobic Heart Rate Upper Limit",
            "anaerobic_heart_rate_upper_limit",
        ),
        (
            ids::ANAEROBIC_THRESHOLD,
            "Anaerobic Threshold",
            "anaerobic_threshold",
        ),
        (ids::HEART_RATE_MAX, "Heart Rate Max", "heart_rate_max"),
        (
            ids::MAXIMUM_RECOMMENDED_HEART_RATE,
            "Maximum Recommended Heart Rate",
            "maximum_recommended_heart_rate",
        ),
        (ids::RESTING_HEART_RATE, "Resting Heart Rate", "resting_heart_rate"),
    ] {
        units.push(Unit::scalar(id, name, tail, Scalar::U8).with_unit("bpm"));
    }

    units.push(
        Unit::scalar(ids::AGE, "Age", "age", Scalar::U8)
            .with_unit("years"),
    );
    units.push(
        Unit::composite(ids::DATE_OF_BIRTH, "Date of Birth", "date_of_birth", &DATE_SCHEMA)
            .with_length(LengthRule::Exact(4)),
    );
    units.push(
        Unit::composite(
            ids::DATE_OF_THRESHOLD_ASSESSMENT,
            "Date of Threshold Assessment",
            "date_of_threshold_assessment",
            &DATE_SCHEMA,
        )
        .with_length(LengthRule::Exact(4)),
    );
    units.push(Unit::scalar(
        ids::EMAIL_ADDRESS,
        "Email Address",
        "email_address",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(
        ids::FIRST_NAME,
        "First Name",
        "first_name",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(
        ids::LAST_NAME,
        "Last Name",
        "last_name",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(ids::GENDER, "Gender", "gender", Scalar::U8).with_range(0.0, 2.0));
    units.push(
        Unit::scaled(ids::HEIGHT, "Height", "height", Scalar::U16, Scale::decimal(-2))
            .with_unit("m"),
    );
    units.push(
        Unit::scaled(
            ids::HIP_CIRCUMFERENCE,
            "Hip Circumference",
            "hip_circumference",
            Scalar::U16,
            Scale::decimal(-2),
        )
        .with_unit("m"),
    );
    units.push(
        Unit::scaled(
            ids::WAIST_CIRCUMFERENCE,
            "Waist Circumference",
            "waist_circumference",
            Scalar::U16,
            Scale::decimal(-2),
        )
        .with_unit("m"),
    );
    units.push(
        Unit::scaled(ids::WEIGHT, "Weight", "weight", Scalar::U16, Scale::new(5, -3, 0))
            .with_unit("kg"),
    );
    units.push(Unit::scalar(
        ids::SPORT_TYPE,
        "Sport Type for Aerobic and Anaerobic Thresholds",
        "sport_type_for_aerobic_and_anaerobic_thresholds",
        Scalar::U8,
    ));
    units.push(
        Unit::scalar(ids::VO2_MAX, "VO2 Max", "vo2_max", Scalar::U8)
            .with_unit("ml/kg/min"),
    );
    units.push(Unit::scalar(
        ids::DATABASE_CHANGE_INCREMENT,
        "Database Change Increment",
        "database_change_increment",
        Scalar::U32,
    ));
    units.push(Unit::scalar(
        ids::USER_INDEX,
        "User Index",
        "user_index",
        Scalar::U8,
    ));
    units.push(Unit::scalar(
        ids::LANGUAGE,
        "Language",
        "language",
        Scalar::Utf8,
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

    #[test]
    fn test_date_of_birth_layout() {
        let unit = find(ids::DATE_OF_BIRTH);
        let ctx = DependencyContext::new();
        let value = unit.raw_decode(&[0xC5, 0x07, 6, 21], &ctx).unwrap();
        assert_eq!(value.field("year"), Some(&Value::Unsigned(1989)));
        assert_eq!(value.field("month"), Some(&Value::Unsigned(6)));
        assert_eq!(value.field("day"), Some(&Value::Unsigned(21)));
    }

    #[test]
    fn test_height_is_centimetre_resolution() {
        let unit = find(ids::HEIGHT);
        let ctx = DependencyContext::new();
        let value = unit.raw_decode(&[0xAF, 0x00], &ctx).unwrap();
        match value {
            Value::Float(v) => assert!((v - 1.75).abs() < 1e-9),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_weight_uses_5g_resolution() {
        let unit = find(ids::WEIGHT);
        let ctx = DependencyContext::new();
        let value = unit.raw_decode(&[0xB0, 0x36], &ctx).unwrap();
        match value {
            Value::Float(v) => assert!((v - 70.0).abs() < 1e-9),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_language_is_text() {
        let unit = find(ids::LANGUAGE);
        let ctx = DependencyContext::new();
        assert_eq!(
            unit.raw_decode(b"en", &ctx).unwrap(),
            Value::Text("en".into())
        );
    }
}
