//! End-to-end decode/encode tests against the public API.

use btsig_core::{
    CodecError, DependencyContext, Field, Scalar, SpecId, Translator, Unit, Value, ids, registry,
};

/// Route registry-load and decode diagnostics through the test harness;
/// visible under `--nocapture` with `RUST_LOG=btsig_core=debug`.
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[test]
fn test_battery_level_happy_path() {
    init_tracing();
    let translator = Translator::new();
    let outcome = translator.parse("2A19", &[100]);
    assert!(outcome.is_success());
    assert!(!outcome.non_compliant);
    assert_eq!(outcome.id, Some(ids::BATTERY_LEVEL));
    assert_eq!(outcome.value().and_then(Value::as_u64), Some(100));
}

#[test]
fn test_battery_level_out_of_range_strict_and_permissive() {
    let strict = Translator::new();
    let outcome = strict.parse("2A19", &[200]);
    assert!(!outcome.is_success());
    assert_eq!(
        outcome.error,
        Some(CodecError::out_of_range(200.0, 0.0, 100.0))
    );

    let permissive = Translator::new().permissive(true);
    let outcome = permissive.parse("2A19", &[200]);
    assert!(outcome.is_success());
    assert!(outcome.non_compliant);
    assert_eq!(outcome.value().and_then(Value::as_u64), Some(200));
}

#[test]
fn test_empty_payload_is_insufficient_even_permissive() {
    for translator in [Translator::new(), Translator::new().permissive(true)] {
        let outcome = translator.parse("2A19", &[]);
        assert!(!outcome.is_success());
        assert_eq!(outcome.error, Some(CodecError::insufficient(1, 0)));
    }
}

#[test]
fn test_temperature_scaled_decode_and_encode() {
    let translator = Translator::new();
    let outcome = translator.parse("2A6E", &[0x64, 0x09]);
    match outcome.value() {
        Some(Value::Float(v)) => assert!((v - 24.04).abs() < 1e-9),
        other => panic!("expected float, got {other:?}"),
    }

    let bytes = translator
        .encode("org.bluetooth.characteristic.temperature", &Value::Float(24.04))
        .unwrap();
    assert_eq!(bytes, vec![0x64, 0x09]);
}

#[test]
fn test_heart_rate_width_switch() {
    let translator = Translator::new();

    let outcome = translator.parse("2A37", &[0x00, 72]);
    let value = outcome.value().expect("narrow rate decodes");
    assert_eq!(value.field("heart_rate").and_then(Value::as_u64), Some(72));

    let outcome = translator.parse("2A37", &[0x01, 0x2C, 0x01]);
    let value = outcome.value().expect("wide rate decodes");
    assert_eq!(value.field("heart_rate").and_then(Value::as_u64), Some(300));

    // wide flag with a single payload byte is short one byte
    let outcome = translator.parse("2A37", &[0x01, 0x2C]);
    assert_eq!(outcome.error, Some(CodecError::insufficient(3, 2)));
    assert_eq!(outcome.field_errors.len(), 1);
    assert_eq!(outcome.field_errors[0].field, "heart_rate");
}

#[test]
fn test_unresolved_identifier() {
    let translator = Translator::new();
    let outcome = translator.parse("FFFF-unregistered", &[0x01]);
    assert!(!outcome.is_success());
    assert_eq!(outcome.id, None);
    assert_eq!(
        outcome.error,
        Some(CodecError::UnresolvedIdentifier("FFFF-unregistered".into()))
    );
}

#[test]
fn test_identifier_spellings_resolve_to_one_unit() {
    let translator = Translator::new();
    for spelling in [
        "2A37",
        "0x2A37",
        "00002a37-0000-1000-8000-00805f9b34fb",
        "Heart Rate Measurement",
        "heart_rate_measurement",
        "org.bluetooth.characteristic.heart_rate_measurement",
    ] {
        let unit = translator.descriptor(spelling).unwrap();
        assert_eq!(unit.descriptor.id, ids::HEART_RATE_MEASUREMENT, "{spelling}");
    }
}

#[test]
fn test_concurrent_first_touch() {
    init_tracing();
    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                scope.spawn(|| {
                    let translator = Translator::new();
                    translator.parse("2A19", &[50]).is_success()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(results.into_iter().all(|ok| ok));
}

#[test]
fn test_batch_resolves_dependencies_in_any_order() {
    let translator = Translator::new();
    let mut measurement = vec![0x00, 0x2A, 0x00];
    measurement.extend_from_slice(&[0xE8, 0x07, 3, 15, 14, 30, 45]);
    let context_payload = [0x00, 0x2A, 0x00];
    let battery = [77u8];

    let batch: Vec<(&str, &[u8])> = vec![
        ("2A34", &context_payload),
        ("2A19", &battery),
        ("2A18", &measurement),
    ];
    let outcomes = translator.parse_many(&batch);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes["2A18"].is_success());
    assert!(outcomes["2A34"].is_success());
    assert!(outcomes["2A19"].is_success());
}

#[test]
fn test_batch_sequence_mismatch_fails_only_the_context() {
    let translator = Translator::new();
    let mut measurement = vec![0x00, 0x2A, 0x00];
    measurement.extend_from_slice(&[0xE8, 0x07, 3, 15, 14, 30, 45]);
    let context_payload = [0x00, 0x2B, 0x00]; // sequence 43 against measurement's 42

    let batch: Vec<(&str, &[u8])> = vec![("2A18", &measurement), ("2A34", &context_payload)];
    let outcomes = translator.parse_many(&batch);
    assert!(outcomes["2A18"].is_success());
    assert_eq!(
        outcomes["2A34"].error,
        Some(CodecError::out_of_range(43.0, 42.0, 42.0))
    );
}

#[test]
fn test_aggregate_reads_siblings_from_batch() {
    let translator = Translator::new();
    let digital = [0b0101_0101u8];
    let analog = [0x34u8, 0x12];
    let aggregate = [0b0101_0101u8, 0x34, 0x12];
    let batch: Vec<(&str, &[u8])> =
        vec![("2A5A", &aggregate), ("2A56", &digital), ("2A58", &analog)];
    let outcomes = translator.parse_many(&batch);
    let value = outcomes["2A5A"].value().expect("aggregate decodes");
    assert_eq!(
        value.field("digital"),
        Some(&Value::Bytes(vec![0b0101_0101]))
    );
    assert_eq!(value.field("analog").and_then(Value::as_u64), Some(0x1234));
}

#[test]
fn test_context_range_override() {
    let translator = Translator::new();
    let ctx = DependencyContext::new()
        .with_valid_range(ids::BATTERY_LEVEL, btsig_core::Range::new(20.0, 80.0));
    let outcome = translator.parse_with_context("2A19", &[90], &ctx);
    assert_eq!(outcome.error, Some(CodecError::out_of_range(90.0, 20.0, 80.0)));
}

#[test]
fn test_encode_composite_round_trip() {
    let translator = Translator::new();
    let value = Value::Struct(vec![
        Field::new("heart_rate", Value::Unsigned(72)),
        Field::new("energy_expended", Value::Unsigned(500)),
    ]);
    let bytes = translator.encode("2A37", &value).unwrap();
    let outcome = translator.parse("2A37", &bytes);
    assert_eq!(outcome.value(), Some(&value));
}

#[test]
fn test_decoded_value_round_trips_through_json() {
    let translator = Translator::new();
    let outcome = translator.parse("2A37", &[0b0001_0001, 0x2C, 0x01, 0x00, 0x04]);
    let value = outcome.value().expect("decodes");
    let json = serde_json::to_string(value).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, value);
}

#[test]
fn test_encode_rejections() {
    let translator = Translator::new();
    assert!(matches!(
        translator.encode("2A19", &Value::Unsigned(200)),
        Err(CodecError::EncodeRejected(_))
    ));
    assert!(matches!(
        translator.encode("2A19", &Value::Text("full".into())),
        Err(CodecError::TypeMismatch { .. })
    ));
    assert!(matches!(
        translator.encode("FFFF-unregistered", &Value::Unsigned(1)),
        Err(CodecError::UnresolvedIdentifier(_))
    ));
}

// Custom registration tests share the process-global overlay, so they all
// live in one test to keep their ordering deterministic.
#[test]
fn test_custom_units_and_circular_dependencies() {
    let translator = Translator::new();

    let vendor_a = SpecId::from_u32(0xF100_0001);
    let vendor_b = SpecId::from_u32(0xF100_0002);
    registry::register_custom(
        Unit::scalar(vendor_a, "Vendor A", "vendor_a", Scalar::U8).with_requires(&[vendor_b]),
        false,
    );
    registry::register_custom(
        Unit::scalar(vendor_b, "Vendor B", "vendor_b", Scalar::U8).with_requires(&[vendor_a]),
        false,
    );

    // a circular pair can never make progress; both fail, neither hangs
    let a_payload = [1u8];
    let b_payload = [2u8];
    let batch: Vec<(&str, &[u8])> = vec![
        ("vendor_a", &a_payload),
        ("vendor_b", &b_payload),
    ];
    let outcomes = translator.parse_many(&batch);
    assert_eq!(
        outcomes["vendor_a"].error,
        Some(CodecError::MissingDependency {
            dependent: vendor_a,
            missing: vendor_b,
        })
    );
    assert_eq!(
        outcomes["vendor_b"].error,
        Some(CodecError::MissingDependency {
            dependent: vendor_b,
            missing: vendor_a,
        })
    );

    // pre-seeding the context breaks the cycle
    let ctx = DependencyContext::new().with_value(vendor_b, Value::Unsigned(2));
    let batch: Vec<(&str, &[u8])> = vec![("vendor_a", &a_payload)];
    let outcomes = translator.parse_many_with_context(&batch, ctx);
    assert!(outcomes["vendor_a"].is_success());

    // plain custom registration resolves by name and decodes
    let vendor_c = SpecId::from_u32(0xF100_0003);
    registry::register_custom(
        Unit::scalar(vendor_c, "Vendor Counter", "vendor_counter", Scalar::U32),
        false,
    );
    let outcome = translator.parse("Vendor Counter", &[0x40, 0x30, 0x20, 0x10]);
    assert_eq!(outcome.value().and_then(Value::as_u64), Some(0x1020_3040));

    registry::clear_custom();
    assert!(translator.parse("Vendor Counter", &[0, 0, 0, 0]).error.is_some());
}
