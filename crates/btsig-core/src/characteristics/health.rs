//! Health Thermometer, Blood Pressure, Glucose and Pulse Oximeter
//! characteristics.

use std::sync::Arc;

use btsig_types::{CodecError, Result, Value, ValueKind, ids};

use crate::context::DependencyContext;
use crate::scalar::Scalar;
use crate::schema::{FieldSchema, FieldSpec, FlagCond};
use crate::unit::{CharacteristicCodec, Unit};

static TEMPERATURE_MEASUREMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::when("temperature_celsius", Scalar::MedFloat, &[FlagCond::clear(0)]),
    FieldSpec::when("temperature_fahrenheit", Scalar::MedFloat, &[FlagCond::set(0)]),
    FieldSpec::when("timestamp", Scalar::DateTime, &[FlagCond::set(1)]),
    FieldSpec::when("temperature_type", Scalar::U8, &[FlagCond::set(2)]),
];
static TEMPERATURE_MEASUREMENT_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: TEMPERATURE_MEASUREMENT_FIELDS,
};

static BLOOD_PRESSURE_FIELDS: &[FieldSpec] = &[
    FieldSpec::when("systolic_mmhg", Scalar::SFloat, &[FlagCond::clear(0)]),
    FieldSpec::when("diastolic_mmhg", Scalar::SFloat, &[FlagCond::clear(0)]),
    FieldSpec::when("mean_arterial_pressure_mmhg", Scalar::SFloat, &[FlagCond::clear(0)]),
    FieldSpec::when("systolic_kpa", Scalar::SFloat, &[FlagCond::set(0)]),
    FieldSpec::when("diastolic_kpa", Scalar::SFloat, &[FlagCond::set(0)]),
    FieldSpec::when("mean_arterial_pressure_kpa", Scalar::SFloat, &[FlagCond::set(0)]),
    FieldSpec::when("timestamp", Scalar::DateTime, &[FlagCond::set(1)]),
    FieldSpec::when("pulse_rate", Scalar::SFloat, &[FlagCond::set(2)]),
    FieldSpec::when("user_id", Scalar::U8, &[FlagCond::set(3)]),
    FieldSpec::when("measurement_status", Scalar::U16, &[FlagCond::set(4)]),
];
static BLOOD_PRESSURE_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: BLOOD_PRESSURE_FIELDS,
};

static GLUCOSE_MEASUREMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("sequence_number", Scalar::U16),
    FieldSpec::always("base_time", Scalar::DateTime),
    // minutes
    FieldSpec::when("time_offset", Scalar::I16, &[FlagCond::set(0)]),
    FieldSpec::when(
        "glucose_concentration_kg_per_l",
        Scalar::SFloat,
        &[FlagCond::set(1), FlagCond::clear(2)],
    ),
    FieldSpec::when(
        "glucose_concentration_mol_per_l",
        Scalar::SFloat,
        &[FlagCond::set(1), FlagCond::set(2)],
    ),
    FieldSpec::when("type_and_sample_location", Scalar::U8, &[FlagCond::set(1)]),
    FieldSpec::when("sensor_status_annunciation", Scalar::U16, &[FlagCond::set(3)]),
];
static GLUCOSE_MEASUREMENT_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: GLUCOSE_MEASUREMENT_FIELDS,
};

static GLUCOSE_CONTEXT_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("sequence_number", Scalar::U16),
    FieldSpec::when("extended_flags", Scalar::U8, &[FlagCond::set(7)]),
    FieldSpec::when("carbohydrate_id", Scalar::U8, &[FlagCond::set(0)]),
    FieldSpec::when("carbohydrate_kg", Scalar::SFloat, &[FlagCond::set(0)]),
    FieldSpec::when("meal", Scalar::U8, &[FlagCond::set(1)]),
    FieldSpec::when("tester_health", Scalar::U8, &[FlagCond::set(2)]),
    // seconds
    FieldSpec::when("exercise_duration", Scalar::U16, &[FlagCond::set(3)]),
    FieldSpec::when("exercise_intensity", Scalar::U8, &[FlagCond::set(3)]),
    FieldSpec::when("medication_id", Scalar::U8, &[FlagCond::set(4)]),
    FieldSpec::when("medication_kg", Scalar::SFloat, &[FlagCond::set(4)]),
    FieldSpec::when("hba1c", Scalar::SFloat, &[FlagCond::set(5)]),
];
static GLUCOSE_CONTEXT_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: GLUCOSE_CONTEXT_FIELDS,
};

/// Glucose Measurement Context decoder.
///
/// The context record only makes sense next to the measurement it
/// annotates; both carry a sequence number, and a context whose number
/// disagrees with the sibling measurement is rejected.
struct GlucoseContextCodec;

impl CharacteristicCodec for GlucoseContextCodec {
    fn decode(&self, data: &[u8], ctx: &DependencyContext) -> Result<Value> {
        let value =
            crate::schema::decode(&GLUCOSE_CONTEXT_SCHEMA, data).map_err(|failure| failure.error)?;
        let own = value
            .field("sequence_number")
            .and_then(Value::as_u64)
            .ok_or_else(|| CodecError::insufficient(3, data.len()))?;
        let sibling = ctx
            .value(ids::GLUCOSE_MEASUREMENT)
            .and_then(|m| m.field("sequence_number"))
            .and_then(Value::as_u64);
        if let Some(sibling) = sibling {
            if own != sibling {
                #[allow(clippy::cast_precision_loss)]
                return Err(CodecError::out_of_range(
                    own as f64,
                    sibling as f64,
                    sibling as f64,
                ));
            }
        }
        Ok(value)
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        crate::schema::encode(&GLUCOSE_CONTEXT_SCHEMA, value)
    }
}

static PLX_SPOT_CHECK_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("spo2", Scalar::SFloat),
    FieldSpec::always("pulse_rate", Scalar::SFloat),
    FieldSpec::when("timestamp", Scalar::DateTime, &[FlagCond::set(0)]),
    FieldSpec::when("measurement_status", Scalar::U16, &[FlagCond::set(1)]),
    FieldSpec::when("device_and_sensor_status", Scalar::U24, &[FlagCond::set(2)]),
    FieldSpec::when("pulse_amplitude_index", Scalar::SFloat, &[FlagCond::set(3)]),
];
static PLX_SPOT_CHECK_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: PLX_SPOT_CHECK_FIELDS,
};

static PLX_CONTINUOUS_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("spo2_normal", Scalar::SFloat),
    FieldSpec::always("pulse_rate_normal", Scalar::SFloat),
    FieldSpec::when("spo2_fast", Scalar::SFloat, &[FlagCond::set(0)]),
    FieldSpec::when("pulse_rate_fast", Scalar::SFloat, &[FlagCond::set(0)]),
    FieldSpec::when("spo2_slow", Scalar::SFloat, &[FlagCond::set(1)]),
    FieldSpec::when("pulse_rate_slow", Scalar::SFloat, &[FlagCond::set(1)]),
    FieldSpec::when("measurement_status", Scalar::U16, &[FlagCond::set(2)]),
    FieldSpec::when("device_and_sensor_status", Scalar::U24, &[FlagCond::set(3)]),
    FieldSpec::when("pulse_amplitude_index", Scalar::SFloat, &[FlagCond::set(4)]),
];
static PLX_CONTINUOUS_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U8),
    fields: PLX_CONTINUOUS_FIELDS,
};

static PLX_FEATURES_FIELDS: &[FieldSpec] = &[
    FieldSpec::flag_bit("measurement_storage_supported", 2, &[]),
    FieldSpec::flag_bit("timestamp_supported", 3, &[]),
    FieldSpec::when("measurement_status_support", Scalar::U16, &[FlagCond::set(0)]),
    FieldSpec::when("device_and_sensor_status_support", Scalar::U24, &[FlagCond::set(1)]),
];
static PLX_FEATURES_SCHEMA: FieldSchema = FieldSchema {
    flags: Some(Scalar::U16),
    fields: PLX_FEATURES_FIELDS,
};

pub(crate) fn register(units: &mut Vec<Unit>) {
    units.push(
        Unit::composite(
            ids::TEMPERATURE_MEASUREMENT,
            "Temperature Measurement",
            "temperature_measurement",
            &TEMPERATURE_MEASUREMENT_SCHEMA,
        )
        .with_unit("degC"),
    );
    units.push(
        Unit::scalar(
            ids::TEMPERATURE_TYPE,
            "Temperature Type",
            "temperature_type",
            Scalar::U8,
        )
        .with_range(1.0, 9.0),
    );
    units.push(Unit::composite(
        ids::INTERMEDIATE_TEMPERATURE,
        "Intermediate Temperature",
        "intermediate_temperature",
        &TEMPERATURE_MEASUREMENT_SCHEMA,
    ));
    units.push(
        Unit::scalar(
            ids::MEASUREMENT_INTERVAL,
            "Measurement Interval",
            "measurement_interval",
            Scalar::U16,
        )
        .with_unit("s"),
    );
    units.push(
        Unit::composite(
            ids::BLOOD_PRESSURE_MEASUREMENT,
            "Blood Pressure Measurement",
            "blood_pressure_measurement",
            &BLOOD_PRESSURE_SCHEMA,
        )
        .with_unit("mmHg"),
    );
    units.push(Unit::composite(
        ids::INTERMEDIATE_CUFF_PRESSURE,
        "Intermediate Cuff Pressure",
        "intermediate_cuff_pressure",
        &BLOOD_PRESSURE_SCHEMA,
    ));
    units.push(Unit::scalar(
        ids::BLOOD_PRESSURE_FEATURE,
        "Blood Pressure Feature",
        "blood_pressure_feature",
        Scalar::U16,
    ));
    units.push(Unit::composite(
        ids::GLUCOSE_MEASUREMENT,
        "Glucose Measurement",
        "glucose_measurement",
        &GLUCOSE_MEASUREMENT_SCHEMA,
    ));
    units.push(
        Unit::routine(
            ids::GLUCOSE_MEASUREMENT_CONTEXT,
            "Glucose Measurement Context",
            "glucose_measurement_context",
            ValueKind::Struct,
            Arc::new(GlucoseContextCodec),
        )
        .with_length(crate::unit::LengthRule::AtLeast(3))
        .with_requires(&[ids::GLUCOSE_MEASUREMENT]),
    );
    units.push(Unit::scalar(
        ids::GLUCOSE_FEATURE,
        "Glucose Feature",
        "glucose_feature",
        Scalar::U16,
    ));
    units.push(
        Unit::composite(
            ids::PLX_SPOT_CHECK_MEASUREMENT,
            "PLX Spot-Check Measurement",
            "plx_spot_check_measurement",
            &PLX_SPOT_CHECK_SCHEMA,
        )
        .with_unit("%"),
    );
    units.push(
        Unit::composite(
            ids::PLX_CONTINUOUS_MEASUREMENT,
            "PLX Continuous Measurement",
            "plx_continuous_measurement",
            &PLX_CONTINUOUS_SCHEMA,
        )
        .with_unit("%"),
    );
    units.push(Unit::composite(
        ids::PLX_FEATURES,
        "PLX Features",
        "plx_features",
        &PLX_FEATURES_SCHEMA,
    ));
}
