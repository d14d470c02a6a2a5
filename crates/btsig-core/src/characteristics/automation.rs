//! Automation IO service characteristics.

use std::sync::Arc;

use bytes::Buf;

use btsig_types::{CodecError, Field, Result, Value, ValueKind, ids};

use crate::context::DependencyContext;
use crate::scalar::Scalar;
use crate::unit::{CharacteristicCodec, LengthRule, Unit};

/// Aggregate decoder.
///
/// The Aggregate characteristic concatenates the server's Digital state
/// bytes with the Analog reading. Its layout is only known from the
/// sibling characteristics: the Digital section is as long as the
/// sibling Digital value, and the Analog section is present when the
/// server exposes Analog at all. With neither sibling available the
/// payload stays opaque.
struct AggregateCodec;

impl CharacteristicCodec for AggregateCodec {
    fn decode(&self, data: &[u8], ctx: &DependencyContext) -> Result<Value> {
        let digital_len = ctx.value(ids::DIGITAL).map(|v| match v {
            Value::Bytes(bytes) => bytes.len().max(1),
            _ => 1,
        });
        let has_analog = ctx.contains(ids::ANALOG);
        if digital_len.is_none() && !has_analog {
            return Ok(Value::Struct(vec![Field::new(
                "raw",
                Value::Bytes(data.to_vec()),
            )]));
        }

        let mut fields = Vec::new();
        let mut offset = 0usize;
        if let Some(len) = digital_len {
            if data.len() < len {
                return Err(CodecError::insufficient(len, data.len()));
            }
            fields.push(Field::new("digital", Value::Bytes(data[..len].to_vec())));
            offset = len;
        }
        if has_analog {
            let mut buf = data.get(offset..).unwrap_or(&[]);
            if buf.remaining() < 2 {
                return Err(CodecError::insufficient(offset + 2, data.len()));
            }
            fields.push(Field::new(
                "analog",
                Value::Unsigned(u64::from(buf.get_u16_le())),
            ));
        }
        Ok(Value::Struct(fields))
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let fields = match value {
            Value::Struct(fields) => fields,
            other => return Err(CodecError::type_mismatch(ValueKind::Struct, other.kind())),
        };
        let mut out = Vec::new();
        for field in fields {
            match (field.name.as_str(), &field.value) {
                ("raw" | "digital", Value::Bytes(bytes)) => out.extend_from_slice(bytes),
                ("analog", analog) => Scalar::U16.encode_into(analog, &mut out)?,
                (name, _) => {
                    return Err(CodecError::encode_rejected(format!("unknown field {name}")));
                }
            }
        }
        Ok(out)
    }
}

pub(crate) fn register(units: &mut Vec<Unit>) {
    units.push(
        Unit::scalar(ids::DIGITAL, "Digital", "digital", Scalar::Bytes)
            .with_length(LengthRule::AtLeast(1)),
    );
    units.push(Unit::scalar(ids::ANALOG, "Analog", "analog", Scalar::U16));
    units.push(
        Unit::routine(
            ids::AGGREGATE,
            "Aggregate",
            "aggregate",
            ValueKind::Struct,
            Arc::new(AggregateCodec),
        )
        .with_length(LengthRule::AtLeast(1))
        .with_optional(&[ids::DIGITAL, ids::ANALOG]),
    );
}
