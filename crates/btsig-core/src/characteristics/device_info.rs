//! Device Information service characteristics.

use btsig_types::ids;

use crate::scalar::Scalar;
use crate::schema::{FieldSchema, FieldSpec};
use crate::unit::{LengthRule, Unit};

static SYSTEM_ID_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("manufacturer_identifier", Scalar::U40),
    FieldSpec::always("organizationally_unique_identifier", Scalar::U24),
];
static SYSTEM_ID_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: SYSTEM_ID_FIELDS,
};

static PNP_ID_FIELDS: &[FieldSpec] = &[
    FieldSpec::always("vendor_id_source", Scalar::U8),
    FieldSpec::always("vendor_id", Scalar::U16),
    FieldSpec::always("product_id", Scalar::U16),
    FieldSpec::always("product_version", Scalar::U16),
];
static PNP_ID_SCHEMA: FieldSchema = FieldSchema {
    flags: None,
    fields: PNP_ID_FIELDS,
};

pub(crate) fn register(units: &mut Vec<Unit>) {
    units.push(
        Unit::composite(ids::SYSTEM_ID, "System ID", "system_id", &SYSTEM_ID_SCHEMA)
            .with_length(LengthRule::Exact(8)),
    );
    units.push(Unit::scalar(
        ids::MODEL_NUMBER,
        "Model Number String",
        "model_number_string",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(
        ids::SERIAL_NUMBER,
        "Serial Number String",
        "serial_number_string",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(
        ids::FIRMWARE_REVISION,
        "Firmware Revision String",
        "firmware_revision_string",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(
        ids::HARDWARE_REVISION,
        "Hardware Revision String",
        "hardware_revision_string",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(
        ids::SOFTWARE_REVISION,
        "Software Revision String",
        "software_revision_string",
        Scalar::Utf8,
    ));
    units.push(Unit::scalar(
        ids::MANUFACTURER_NAME,
        "Manufacturer Name String",
        "manufacturer_name_string",
        Scalar::Utf8,
    ));
    units.push(
        Unit::composite(ids::PNP_ID, "PnP ID", "pnp_id", &PNP_ID_SCHEMA)
            .with_length(LengthRule::Exact(7)),
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

    #[test]
    fn test_system_id_splits_oui() {
        let unit = find(ids::SYSTEM_ID);
        let ctx = DependencyContext::new();
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0xAA, 0xBB, 0xCC];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert_eq!(
            value.field("manufacturer_identifier"),
            Some(&Value::Unsigned(0x05_0403_0201))
        );
        assert_eq!(
            value.field("organizationally_unique_identifier"),
            Some(&Value::Unsigned(0x00CC_BBAA))
        );
    }

    #[test]
    fn test_pnp_id_layout() {
        let unit = find(ids::PNP_ID);
        let ctx = DependencyContext::new();
        // USB-IF vendor 0x045E, product 0x0040, version 1.0.0
        let data = [0x02, 0x5E, 0x04, 0x40, 0x00, 0x00, 0x01];
        let value = unit.raw_decode(&data, &ctx).unwrap();
        assert_eq!(value.field("vendor_id_source"), Some(&Value::Unsigned(2)));
        assert_eq!(value.field("vendor_id"), Some(&Value::Unsigned(0x045E)));
        assert_eq!(value.field("product_id"), Some(&Value::Unsigned(0x0040)));
        assert_eq!(
            value.field("product_version"),
            Some(&Value::Unsigned(0x0100))
        );
    }

    #[test]
    fn test_revision_strings_trim_padding() {
        let unit = find(ids::FIRMWARE_REVISION);
        let ctx = DependencyContext::new();
        let value = unit.raw_decode(b"v1.2.0\0", &ctx).unwrap();
        assert_eq!(value, Value::Text("v1.2.0".into()));
    }
}
