//! Generic Access, Generic Attribute and Battery characteristics.

use btsig_types::ids;

use crate::scalar::{Scalar, Scale};
use crate::schema::{FieldSchema, FieldSpec};
use crate::unit::{LengthRule, Unit};

// Connection intervals tick in 1.25 ms units, the timeout in 10 ms units.
static PPCP_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("minimum_connection_interval", Scalar::U16).with_scale(Scale::new(125, -2, 0)),
    FieldSpec::always("maximum_connection_interval", Scalar::U16).with_scale(Scale::new(125, -2, 0)),
    FieldSpec::always("slave_latency", Scalar::U16),
    FieldSpec::always("supervision_timeout", Scalar::U16).with_scale(Scale::decimal(1)),
];
static PPCP_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: PPCP_FIELDS,
};

static SERVICE_CHANGED_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("start_of_affected_attribute_handle_range", Scalar::U16),
    FieldSpec::always("end_of_affected_attribute_handle_range", Scalar::U16),
];
static SERVICE_CHANGED_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: SERVICE_CHANGED_FIELDS,
};

pub(crate) fn register(units: &mut Vec<Unit>) {
    units.push(Unit::scalar(
        ids::DEVICE_NAME,
        "Device Name",
        "gap.device_name",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(
        ids::APPEARANCE,
        "Appearance",
        "gap.appearance",
        Scalar::U16,
    ));
    units.push(
        Unit::scalar(
            ids::PERIPHERAL_PRIVACY_FLAG,
            "Peripheral Privacy Flag",
            "gap.peripheral_privacy_flag",
            Scalar::U8,
        )
        .with_range(0.0, 1.0),
    );
    units.push(
        Unit::scalar(
            ids::RECONNECTION_ADDRESS,
            "Reconnection Address",
            "gap.reconnection_address",
            Scalar::Bytes,
        )
        .with_length(LengthRule::Exact(6)),
    );
    units.push(
        Unit::composite(
            ids::PERIPHERAL_PREFERRED_CONNECTION_PARAMETERS,
            "Peripheral Preferred Connection Parameters",
            "gap.peripheral_preferred_connection_parameters",
            &PPCP_SCHEMA,
        )
        .with_length(LengthRule::Exact(8))
        .with_unit("ms"),
    );
    units.push(
        Unit::composite(
            ids::SERVICE_CHANGED,
            "Service Changed",
            "gatt.service_changed",
            &SERVICE_CHANGED_SCHEMA,
        )
        .with_length(LengthRule::Exact(4)),
    );
    units.push(
        Unit::scalar(ids::ALERT_LEVEL, "Alert Level", "alert_level", Scalar::U8)
            .with_range(0.0, 2.0),
    );
    units.push(
        Unit::scalar(
            ids::TX_POWER_LEVEL,
            "Tx Power Level",
            "tx_power_level",
            Scalar::I8,
        )
        .with_range(-100.0, 20.0)
        .with_unit("dBm"),
    );
    units.push(
        Unit::scalar(
            ids::BATTERY_LEVEL,
            "Battery Level",
            "battery_level",
            Scalar::U8,
        )
        .with_range(0.0, 100.0)
        .with_unit("%"),
    );
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
    fn test_ppcp_scales_intervals_to_ms() {
        let unit = find(ids::PERIPHERAL_PREFERRED_CONNECTION_PARAMETERS);
        let ctx = DependencyContext::new();
        // min 80 ticks (100 ms), max 160 ticks (200 ms), latency 4, timeout 100 (1000 ms)
        let data = [0x50, 0x00, 0xA0, 0x00, 0x04, 0x00, 0x64, 0x00];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert!((float_field(&value, "minimum_connection_interval") - 100.0).abs() < 1e-9);
        assert!((float_field(&value, "maximum_connection_interval") - 200.0).abs() < 1e-9);
        assert_eq!(value.field("slave_latency"), Some(&Value::Unsigned(4)));
        assert!((float_field(&value, "supervision_timeout") - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_reconnection_address_is_exactly_six_bytes() {
        let unit = find(ids::RECONNECTION_ADDRESS);
        assert_eq!(unit.descriptor.length, LengthRule::Exact(6));
    }

    #[test]
    fn test_device_name_decodes_text() {
        let unit = find(ids::DEVICE_NAME);
        let ctx = DependencyContext::new();
        let value = unit.raw_decode(b"Aranet4 17C3F", &ctx).unwrap();
        assert_eq!(value, Value::Text("Aranet4 17C3F".into()));
    }
}
