//! Heart Rate service characteristics.

use btsig_types::ids;

use crate::scalar::{Scalar, Scale};
use crate::schema::{FieldSchema, FieldSpec, FlagCond};
use crate::unit::Unit;

static HEART_RATE_MEASUREMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::switch("heart_rate", 0, Scalar::U8, Scalar::U16),
    // only meaningful when the sensor reports contact support
    FieldSpec::flag_bit("sensor_contact_detected", 1, &[FlagCond::set(2)]),
    FieldSpec::when("energy_expended", Scalar::U16, &[FlagCond::set(3)]),
    // 1/1024ths of a second
    FieldSpec::repeated_when("rr_intervals", Scalar::U16, &[FlagCond::set(4)])
        .with_scale(Scale::binary(-10)),
];
static HEART_RATE_MEASUREMENT_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: HEART_RATE_MEASUREMENT_FIELDS,
};

pub(crate) fn register(units: &mut Vec<Unit>) {
    units.push(
        Unit::composite(
            ids::HEART_RATE_MEASUREMENT,
            "Heart Rate Measurement",
            "heart_rate_measurement",
            &HEART_RATE_MEASUREMENT_SCHEMA,
        )
        .with_unit("bpm"),
    );
    units.push(
        Unit::scalar(
            ids::BODY_SENSOR_LOCATION,
            "Body Sensor Location",
            "body_sensor_location",
            Scalar::U8,
        )
        .with_range(0.0, 6.0),
    );
    units.push(
        Unit::scalar(
            ids::HEART_RATE_CONTROL_POINT,
            "Heart Rate Control Point",
            "heart_rate_control_point",
            Scalar::U8,
        )
        // only Reset Energy Expended is defined
        .with_range(1.0, 1.0),
    );
}
