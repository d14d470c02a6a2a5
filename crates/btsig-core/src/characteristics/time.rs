//! Time service characteristics.

use btsig_types::ids;

use crate::scalar::{Scalar, Scale};
use crate::schema::{FieldSchema, FieldSpec};
use crate::unit::{LengthRule, Unit};

static LOCAL_TIME_FIELDS: &[FieldSpec] = &[
    // offset from UTC in 15-minute increments
    FieldSpec::always("time_zone", Scalar::I8),
    FieldSpec::always("dst_offset", Scalar::U8),
];
static LOCAL_TIME_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: LOCAL_TIME_FIELDS,
};

static REFERENCE_TIME_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("time_source", Scalar::U8),
    FieldSpec::always("time_accuracy", Scalar::U8),
    FieldSpec::always("days_since_update", Scalar::U8),
    FieldSpec::always("hours_since_update", Scalar::U8),
];
static REFERENCE_TIME_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: REFERENCE_TIME_FIELDS,
};

static CURRENT_TIME_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("date_time", Scalar::DateTime),
    FieldSpec::always("day_of_week", Scalar::U8),
    // 1/256ths of a second
    FieldSpec::always("fractions256", Scalar::U8).with_scale(Scale::binary(-8)),
    FieldSpec::always("adjust_reason", Scalar::U8),
];
static CURRENT_TIME_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: CURRENT_TIME_FIELDS,
};

pub(crate) fn register(units: &mut Vec<Unit>) {
    units.push(Unit::scalar(
        ids::DATE_TIME,
        "Date Time",
        "date_time",
        Scalar::DateTime,
    ));
    units.push(
        Unit::scalar(ids::DAY_OF_WEEK, "Day of Week", "day_of_week", Scalar::U8)
            .with_range(0.0, 7.0),
    );
    units.push(
        Unit::composite(
            ids::LOCAL_TIME_INFORMATION,
            "Local Time Information",
            "local_time_information",
            &LOCAL_TIME_SCHEMA,
        )
        .with_length(LengthRule::Exact(2)),
    );
    units.push(
        Unit::composite(
            ids::REFERENCE_TIME_INFORMATION,
            "Reference Time Information",
            "reference_time_information",
            &REFERENCE_TIME_SCHEMA,
        )
        .with_length(LengthRule::Exact(4)),
    );
    units.push(
        Unit::composite(
            ids::CURRENT_TIME,
            "Current Time",
            "current_time",
            &CURRENT_TIME_SCHEMA,
        )
        .with_length(LengthRule::Exact(10)),
    );
}
