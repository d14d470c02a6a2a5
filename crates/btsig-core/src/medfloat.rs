//! IEEE-11073 medical float formats.
//!
//! Health-profile characteristics carry numbers as SFLOAT (16-bit) or
//! FLOAT (32-bit): a two's-complement mantissa and a base-10 exponent
//! packed into one little-endian word. A handful of mantissa patterns are
//! reserved for non-finite results; those decode to [`SpecialValue`]
//! rather than a finite number, and encode back to the reserved pattern.

use btsig_types::{CodecError, Result, SpecialValue, Value};

// SFLOAT reserved mantissa patterns (12-bit).
const SFLOAT_NAN: u16 = 0x07FF;
const SFLOAT_POS_INFINITY: u16 = 0x07FE;
const SFLOAT_NEG_INFINITY: u16 = 0x0802;
const SFLOAT_NRES: u16 = 0x0800;
const SFLOAT_RESERVED: u16 = 0x0801;

/// Largest usable SFLOAT mantissa magnitude; larger values collide with
/// the reserved patterns.
const SFLOAT_MANTISSA_MAX: f64 = 2045.0;

// FLOAT reserved mantissa patterns (24-bit).
const FLOAT_NAN: u32 = 0x007F_FFFF;
const FLOAT_POS_INFINITY: u32 = 0x007F_FFFE;
const FLOAT_NEG_INFINITY: u32 = 0x0080_0002;
const FLOAT_NRES: u32 = 0x0080_0000;
const FLOAT_RESERVED: u32 = 0x0080_0001;

const FLOAT_MANTISSA_MAX: f64 = 8_388_605.0;

/// Decode a 16-bit SFLOAT word.
#[must_use]
pub fn decode_sfloat(raw: u16) -> Value {
    let mantissa = raw & 0x0FFF;
    match mantissa {
        SFLOAT_NAN | SFLOAT_NRES | SFLOAT_RESERVED => Value::Special(SpecialValue::NotANumber),
        SFLOAT_POS_INFINITY => Value::Special(SpecialValue::PositiveInfinity),
        SFLOAT_NEG_INFINITY => Value::Special(SpecialValue::NegativeInfinity),
        _ => {
            // Sign-extend the 4-bit exponent and 12-bit mantissa.
            let exponent = ((raw as i16) >> 12) as i32;
            let mantissa = ((mantissa as i16) << 4) >> 4;
            Value::Float(f64::from(mantissa) * 10f64.powi(exponent))
        }
    }
}

/// Decode a 32-bit FLOAT word.
#[must_use]
pub fn decode_float(raw: u32) -> Value {
    let mantissa = raw & 0x00FF_FFFF;
    match mantissa {
        FLOAT_NAN | FLOAT_NRES | FLOAT_RESERVED => Value::Special(SpecialValue::NotANumber),
        FLOAT_POS_INFINITY => Value::Special(SpecialValue::PositiveInfinity),
        FLOAT_NEG_INFINITY => Value::Special(SpecialValue::NegativeInfinity),
        _ => {
            let exponent = i32::from((raw >> 24) as u8 as i8);
            let mantissa = ((mantissa as i32) << 8) >> 8;
            Value::Float(f64::from(mantissa) * 10f64.powi(exponent))
        }
    }
}

/// Encode a finite value or a reserved state as a 16-bit SFLOAT word.
///
/// # Errors
///
/// Returns [`CodecError::EncodeRejected`] when the magnitude cannot be
/// represented in a 12-bit mantissa with a 4-bit exponent.
pub fn encode_sfloat(value: &Value) -> Result<u16> {
    match value {
        Value::Special(SpecialValue::NotANumber) => Ok(SFLOAT_NAN),
        Value::Special(SpecialValue::PositiveInfinity) => Ok(SFLOAT_POS_INFINITY),
        Value::Special(SpecialValue::NegativeInfinity) => Ok(SFLOAT_NEG_INFINITY),
        other => {
            let v = numeric(other)?;
            let (mantissa, exponent) = fit(v, SFLOAT_MANTISSA_MAX, 7, -8)?;
            Ok((((exponent as u16) & 0xF) << 12) | ((mantissa as u16) & 0x0FFF))
        }
    }
}

/// Encode a finite value or a reserved state as a 32-bit FLOAT word.
///
/// # Errors
///
/// Returns [`CodecError::EncodeRejected`] when the magnitude cannot be
/// represented in a 24-bit mantissa with an 8-bit exponent.
pub fn encode_float(value: &Value) -> Result<u32> {
    match value {
        Value::Special(SpecialValue::NotANumber) => Ok(FLOAT_NAN),
        Value::Special(SpecialValue::PositiveInfinity) => Ok(FLOAT_POS_INFINITY),
        Value::Special(SpecialValue::NegativeInfinity) => Ok(FLOAT_NEG_INFINITY),
        other => {
            let v = numeric(other)?;
            let (mantissa, exponent) = fit(v, FLOAT_MANTISSA_MAX, 127, -128)?;
            Ok((((exponent as u32) & 0xFF) << 24) | ((mantissa as u32) & 0x00FF_FFFF))
        }
    }
}

fn numeric(value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        CodecError::encode_rejected(format!("medical float expects a number, got {value}"))
    })
}

/// Pick a (mantissa, exponent) pair for `value`, preferring the smallest
/// exponent that keeps the mantissa in range so precision is maximized.
fn fit(value: f64, mantissa_max: f64, exp_max: i32, exp_min: i32) -> Result<(i32, i32)> {
    if !value.is_finite() {
        return Err(CodecError::encode_rejected(
            "non-finite numbers must be passed as reserved special values",
        ));
    }

    let mut mantissa = value;
    let mut exponent = 0i32;

    while mantissa.round().abs() > mantissa_max {
        if exponent >= exp_max {
            return Err(CodecError::encode_rejected(format!(
                "{value} exceeds the medical float range"
            )));
        }
        mantissa /= 10.0;
        exponent += 1;
    }

    while exponent > exp_min
        && (mantissa - mantissa.round()).abs() > 1e-9
        && (mantissa * 10.0).round().abs() <= mantissa_max
    {
        mantissa *= 10.0;
        exponent -= 1;
    }

    #[allow(clippy::cast_possible_truncation)]
    Ok((mantissa.round() as i32, exponent))
}
