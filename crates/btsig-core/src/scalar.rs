//! Scalar wire codecs.
//!
//! Every field of every characteristic bottoms out in one of these: a
//! fixed-width little-endian number, a medical float, the 7-byte GATT
//! `date_time`, or a variable-length tail (UTF-8 text or raw bytes).
//! Decoding is positional; a scalar reads at a byte offset and reports
//! how many bytes it consumed.

use bytes::Buf;
use time::{Date, Month, PrimitiveDateTime, Time};

use btsig_types::{CodecError, Result, Value, ValueKind};

use crate::medfloat;

/// Wire width of the GATT `date_time` structure.
pub const DATE_TIME_WIDTH: usize = 7;

/// A primitive wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit little-endian integer.
    U16,
    /// Unsigned 24-bit little-endian integer.
    U24,
    /// Unsigned 32-bit little-endian integer.
    U32,
    /// Unsigned 40-bit little-endian integer.
    U40,
    /// Unsigned 48-bit little-endian integer.
    U48,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit little-endian integer.
    I16,
    /// Signed 24-bit little-endian integer.
    I24,
    /// Signed 32-bit little-endian integer.
    I32,
    /// IEEE-754 single precision, little-endian.
    F32,
    /// IEEE-754 double precision, little-endian.
    F64,
    /// IEEE-11073 16-bit SFLOAT.
    SFloat,
    /// IEEE-11073 32-bit FLOAT.
    MedFloat,
    /// UTF-8 text consuming the rest of the payload.
    Utf8,
    /// GATT `date_time`: year u16, month, day, hours, minutes, seconds.
    DateTime,
    /// Opaque bytes consuming the rest of the payload.
    Bytes,
}

impl Scalar {
    /// Wire width in bytes, or `None` for tail formats that consume the
    /// rest of the payload.
    #[must_use]
    pub const fn width(self) -> Option<usize> {
        match self {
            Scalar::U8 | Scalar::I8 => Some(1),
            Scalar::U16 | Scalar::I16 | Scalar::SFloat => Some(2),
            Scalar::U24 | Scalar::I24 => Some(3),
            Scalar::U32 | Scalar::I32 | Scalar::F32 | Scalar::MedFloat => Some(4),
            Scalar::U40 => Some(5),
            Scalar::U48 => Some(6),
            Scalar::DateTime => Some(DATE_TIME_WIDTH),
            Scalar::F64 => Some(8),
            Scalar::Utf8 | Scalar::Bytes => None,
        }
    }

    /// Shape of the value this scalar decodes to.
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Scalar::U8 | Scalar::U16 | Scalar::U24 | Scalar::U32 | Scalar::U40 | Scalar::U48 => {
                ValueKind::Unsigned
            }
            Scalar::I8 | Scalar::I16 | Scalar::I24 | Scalar::I32 => ValueKind::Signed,
            Scalar::F32 | Scalar::F64 | Scalar::SFloat | Scalar::MedFloat => ValueKind::Float,
            Scalar::Utf8 => ValueKind::Text,
            Scalar::DateTime => ValueKind::DateTime,
            Scalar::Bytes => ValueKind::Bytes,
        }
    }

    /// Whether a raw integer fits this scalar's wire range. Used by
    /// variable-width encoders to pick the narrowest representation.
    #[must_use]
    pub fn admits_raw(self, raw: i64) -> bool {
        match self {
            Scalar::U8 => u8::try_from(raw).is_ok(),
            Scalar::U16 => u16::try_from(raw).is_ok(),
            Scalar::U24 => (0..=0x00FF_FFFF).contains(&raw),
            Scalar::U32 => u32::try_from(raw).is_ok(),
            Scalar::U40 => (0..=0xFF_FFFF_FFFF).contains(&raw),
            Scalar::U48 => (0..=0xFFFF_FFFF_FFFF).contains(&raw),
            Scalar::I8 => i8::try_from(raw).is_ok(),
            Scalar::I16 => i16::try_from(raw).is_ok(),
            Scalar::I24 => (-0x0080_0000..=0x007F_FFFF).contains(&raw),
            Scalar::I32 => i32::try_from(raw).is_ok(),
            _ => false,
        }
    }

    /// Decode one value at `offset` within `data`.
    ///
    /// Returns the value and the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientData`] when the payload is too
    /// short, [`CodecError::TypeMismatch`] when a `Utf8` tail is not valid
    /// UTF-8, and [`CodecError::ValueOutOfRange`] for impossible
    /// `date_time` components.
    pub fn decode(self, data: &[u8], offset: usize) -> Result<(Value, usize)> {
        let mut buf = data.get(offset..).unwrap_or(&[]);
        let available = buf.remaining();
        if let Some(width) = self.width() {
            if available < width {
                return Err(CodecError::insufficient(offset + width, data.len()));
            }
        }
        let value = match self {
            Scalar::U8 => Value::Unsigned(u64::from(buf.get_u8())),
            Scalar::U16 => Value::Unsigned(u64::from(buf.get_u16_le())),
            Scalar::U24 => Value::Unsigned(buf.get_uint_le(3)),
            Scalar::U32 => Value::Unsigned(u64::from(buf.get_u32_le())),
            Scalar::U40 => Value::Unsigned(buf.get_uint_le(5)),
            Scalar::U48 => Value::Unsigned(buf.get_uint_le(6)),
            Scalar::I8 => Value::Signed(i64::from(buf.get_i8())),
            Scalar::I16 => Value::Signed(i64::from(buf.get_i16_le())),
            Scalar::I24 => Value::Signed(buf.get_int_le(3)),
            Scalar::I32 => Value::Signed(i64::from(buf.get_i32_le())),
            Scalar::F32 => Value::Float(f64::from(buf.get_f32_le())),
            Scalar::F64 => Value::Float(buf.get_f64_le()),
            Scalar::SFloat => medfloat::decode_sfloat(buf.get_u16_le()),
            Scalar::MedFloat => medfloat::decode_float(buf.get_u32_le()),
            Scalar::DateTime => decode_date_time(&mut buf)?,
            Scalar::Utf8 => {
                let text = core::str::from_utf8(buf)
                    .map_err(|_| CodecError::type_mismatch(ValueKind::Text, ValueKind::Bytes))?;
                Value::Text(text.trim_end_matches('\0').to_owned())
            }
            Scalar::Bytes => Value::Bytes(buf.to_vec()),
        };
        Ok((value, self.width().unwrap_or(available)))
    }

    /// Append the wire form of `value` to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for the wrong value shape and
    /// [`CodecError::EncodeRejected`] when the value does not fit the wire
    /// format.
    pub fn encode_into(self, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Scalar::U8 | Scalar::U16 | Scalar::U24 | Scalar::U32 | Scalar::U40 | Scalar::U48 => {
                let v = value
                    .as_u64()
                    .ok_or_else(|| CodecError::type_mismatch(ValueKind::Unsigned, value.kind()))?;
                self.encode_unsigned(v, out)
            }
            Scalar::I8 | Scalar::I16 | Scalar::I24 | Scalar::I32 => {
                let v = value
                    .as_i64()
                    .ok_or_else(|| CodecError::type_mismatch(ValueKind::Signed, value.kind()))?;
                self.encode_signed(v, out)
            }
            Scalar::F32 => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| CodecError::type_mismatch(ValueKind::Float, value.kind()))?;
                #[allow(clippy::cast_possible_truncation)]
                out.extend_from_slice(&(v as f32).to_le_bytes());
                Ok(())
            }
            Scalar::F64 => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| CodecError::type_mismatch(ValueKind::Float, value.kind()))?;
                out.extend_from_slice(&v.to_le_bytes());
                Ok(())
            }
            Scalar::SFloat => {
                let raw = medfloat::encode_sfloat(value)?;
                out.extend_from_slice(&raw.to_le_bytes());
                Ok(())
            }
            Scalar::MedFloat => {
                let raw = medfloat::encode_float(value)?;
                out.extend_from_slice(&raw.to_le_bytes());
                Ok(())
            }
            Scalar::Utf8 => {
                let text = value
                    .as_str()
                    .ok_or_else(|| CodecError::type_mismatch(ValueKind::Text, value.kind()))?;
                out.extend_from_slice(text.as_bytes());
                Ok(())
            }
            Scalar::DateTime => match value {
                Value::DateTime(dt) => {
                    encode_date_time(*dt, out);
                    Ok(())
                }
                other => Err(CodecError::type_mismatch(ValueKind::DateTime, other.kind())),
            },
            Scalar::Bytes => match value {
                Value::Bytes(bytes) => {
                    out.extend_from_slice(bytes);
                    Ok(())
                }
                other => Err(CodecError::type_mismatch(ValueKind::Bytes, other.kind())),
            },
        }
    }

    fn encode_unsigned(self, v: u64, out: &mut Vec<u8>) -> Result<()> {
        let width = match self.width() {
            Some(w) => w,
            None => return Err(CodecError::encode_rejected("not an integer format")),
        };
        let max = if width == 8 { u64::MAX } else { (1u64 << (width * 8)) - 1 };
        if v > max {
            return Err(CodecError::encode_rejected(format!(
                "{v} does not fit in {width} unsigned bytes"
            )));
        }
        out.extend_from_slice(&v.to_le_bytes()[..width]);
        Ok(())
    }

    fn encode_signed(self, v: i64, out: &mut Vec<u8>) -> Result<()> {
        let width = match self.width() {
            Some(w) => w,
            None => return Err(CodecError::encode_rejected("not an integer format")),
        };
        let bits = width as u32 * 8;
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        if v < min || v > max {
            return Err(CodecError::encode_rejected(format!(
                "{v} does not fit in {width} signed bytes"
            )));
        }
        out.extend_from_slice(&v.to_le_bytes()[..width]);
        Ok(())
    }
}

/// Decimal/binary scaling applied after raw decode: the interpreted value
/// is `raw * multiplier * 10^decimal * 2^binary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scale {
    /// Integer multiplier.
    pub multiplier: i32,
    /// Base-10 exponent.
    pub decimal: i32,
    /// Base-2 exponent.
    pub binary: i32,
}

impl Scale {
    /// Full scale with multiplier and both exponents.
    #[must_use]
    pub const fn new(multiplier: i32, decimal: i32, binary: i32) -> Self {
        Self {
            multiplier,
            decimal,
            binary,
        }
    }

    /// Pure decimal scale: `raw * 10^decimal`.
    #[must_use]
    pub const fn decimal(decimal: i32) -> Self {
        Self::new(1, decimal, 0)
    }

    /// Pure binary scale: `raw * 2^binary`.
    #[must_use]
    pub const fn binary(binary: i32) -> Self {
        Self::new(1, 0, binary)
    }

    /// The combined multiplicative factor.
    #[must_use]
    pub fn factor(self) -> f64 {
        f64::from(self.multiplier) * 10f64.powi(self.decimal) * 2f64.powi(self.binary)
    }

    /// Scale a freshly decoded raw value into its interpreted form.
    ///
    /// Integers become floats; reserved medical-float states pass through
    /// untouched.
    #[must_use]
    pub fn apply(self, value: Value) -> Value {
        match value {
            Value::Special(s) => Value::Special(s),
            other => match other.as_f64() {
                Some(v) => Value::Float(v * self.factor()),
                None => other,
            },
        }
    }

    /// Invert the scale, producing the raw integer nearest the
    /// interpreted value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] when the value is not numeric.
    pub fn unapply(self, value: &Value) -> Result<Value> {
        match value {
            Value::Special(s) => Ok(Value::Special(*s)),
            other => {
                let v = other
                    .as_f64()
                    .ok_or_else(|| CodecError::type_mismatch(ValueKind::Float, other.kind()))?;
                let raw = (v / self.factor()).round();
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let raw = if raw < 0.0 {
                    Value::Signed(raw as i64)
                } else {
                    Value::Unsigned(raw as u64)
                };
                Ok(raw)
            }
        }
    }
}

/// Decode the 7-byte GATT `date_time` structure.
///
/// A zero in any component means "unknown" on the wire; those payloads
/// are rejected as out of range rather than mapped to a sentinel.
fn decode_date_time(buf: &mut &[u8]) -> Result<Value> {
    let year = buf.get_u16_le();
    let month = buf.get_u8();
    let day = buf.get_u8();
    let hours = buf.get_u8();
    let minutes = buf.get_u8();
    let seconds = buf.get_u8();

    if !(1582..=9999).contains(&year) {
        return Err(CodecError::out_of_range(f64::from(year), 1582.0, 9999.0));
    }
    let month = Month::try_from(month)
        .map_err(|_| CodecError::out_of_range(f64::from(month), 1.0, 12.0))?;
    let date = Date::from_calendar_date(i32::from(year), month, day)
        .map_err(|_| CodecError::out_of_range(f64::from(day), 1.0, 31.0))?;
    if hours > 23 {
        return Err(CodecError::out_of_range(f64::from(hours), 0.0, 23.0));
    }
    if minutes > 59 {
        return Err(CodecError::out_of_range(f64::from(minutes), 0.0, 59.0));
    }
    let time = Time::from_hms(hours, minutes, seconds)
        .map_err(|_| CodecError::out_of_range(f64::from(seconds), 0.0, 59.0))?;
    Ok(Value::DateTime(PrimitiveDateTime::new(date, time)))
}

fn encode_date_time(dt: PrimitiveDateTime, out: &mut Vec<u8>) {
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    out.extend_from_slice(&(dt.year() as u16).to_le_bytes());
    out.push(u8::from(dt.month()));
    out.push(dt.day());
    out.push(dt.hour());
    out.push(dt.minute());
    out.push(dt.second());
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::macros::datetime;

    #[test]
    fn test_widths() {
        assert_eq!(Scalar::U8.width(), Some(1));
        assert_eq!(Scalar::SFloat.width(), Some(2));
        assert_eq!(Scalar::U24.width(), Some(3));
        assert_eq!(Scalar::MedFloat.width(), Some(4));
        assert_eq!(Scalar::U40.width(), Some(5));
        assert_eq!(Scalar::DateTime.width(), Some(7));
        assert_eq!(Scalar::F64.width(), Some(8));
        assert_eq!(Scalar::Utf8.width(), None);
        assert_eq!(Scalar::Bytes.width(), None);
    }

    #[test]
    fn test_decode_unsigned_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        assert_eq!(
            Scalar::U16.decode(&data, 0).unwrap(),
            (Value::Unsigned(0x0201), 2)
        );
        assert_eq!(
            Scalar::U24.decode(&data, 0).unwrap(),
            (Value::Unsigned(0x0003_0201), 3)
        );
        assert_eq!(
            Scalar::U48.decode(&data, 0).unwrap(),
            (Value::Unsigned(0x0605_0403_0201), 6)
        );
        // offset moves the read window
        assert_eq!(
            Scalar::U16.decode(&data, 4).unwrap(),
            (Value::Unsigned(0x0605), 2)
        );
    }

    #[test]
    fn test_decode_signed_sign_extension() {
        assert_eq!(
            Scalar::I8.decode(&[0xFF], 0).unwrap(),
            (Value::Signed(-1), 1)
        );
        assert_eq!(
            Scalar::I16.decode(&[0x00, 0x80], 0).unwrap(),
            (Value::Signed(-32768), 2)
        );
        assert_eq!(
            Scalar::I24.decode(&[0xFF, 0xFF, 0xFF], 0).unwrap(),
            (Value::Signed(-1), 3)
        );
    }

    #[test]
    fn test_decode_insufficient_reports_boundary() {
        let err = Scalar::U16.decode(&[0x01], 0).unwrap_err();
        assert_eq!(err, CodecError::insufficient(2, 1));
        // offset counts toward the requirement
        let err = Scalar::U16.decode(&[0x01, 0x02, 0x03], 2).unwrap_err();
        assert_eq!(err, CodecError::insufficient(4, 3));
    }

    #[test]
    fn test_decode_utf8_tail() {
        let (value, consumed) = Scalar::Utf8.decode(b"Aranet4 17C3F\0\0", 0).unwrap();
        assert_eq!(value, Value::Text("Aranet4 17C3F".into()));
        assert_eq!(consumed, 15);

        let err = Scalar::Utf8.decode(&[0xFF, 0xFE], 0).unwrap_err();
        assert_eq!(
            err,
            CodecError::type_mismatch(ValueKind::Text, ValueKind::Bytes)
        );
    }

    #[test]
    fn test_decode_bytes_tail_consumes_rest() {
        let (value, consumed) = Scalar::Bytes.decode(&[1, 2, 3], 1).unwrap();
        assert_eq!(value, Value::Bytes(vec![2, 3]));
        assert_eq!(consumed, 2);
        // an empty tail is an empty byte string, not an error
        let (value, consumed) = Scalar::Bytes.decode(&[1], 1).unwrap();
        assert_eq!(value, Value::Bytes(vec![]));
        assert_eq!(consumed, 0);
    }

    #[test]
    fn test_date_time_round_trip() {
        let dt = datetime!(2024-03-15 14:30:45);
        let mut out = Vec::new();
        Scalar::DateTime
            .encode_into(&Value::DateTime(dt), &mut out)
            .unwrap();
        assert_eq!(out, [0xE8, 0x07, 3, 15, 14, 30, 45]);
        let (value, consumed) = Scalar::DateTime.decode(&out, 0).unwrap();
        assert_eq!(value, Value::DateTime(dt));
        assert_eq!(consumed, 7);
    }

    #[test]
    fn test_date_time_rejects_bad_components() {
        // year 0 ("unknown" on the wire)
        let err = Scalar::DateTime
            .decode(&[0, 0, 1, 1, 0, 0, 0], 0)
            .unwrap_err();
        assert!(matches!(err, CodecError::ValueOutOfRange { .. }));
        // month 13
        let err = Scalar::DateTime
            .decode(&[0xE8, 0x07, 13, 1, 0, 0, 0], 0)
            .unwrap_err();
        assert!(matches!(err, CodecError::ValueOutOfRange { .. }));
        // Feb 30
        let err = Scalar::DateTime
            .decode(&[0xE8, 0x07, 2, 30, 0, 0, 0], 0)
            .unwrap_err();
        assert!(matches!(err, CodecError::ValueOutOfRange { .. }));
        // hour 24
        let err = Scalar::DateTime
            .decode(&[0xE8, 0x07, 3, 15, 24, 0, 0], 0)
            .unwrap_err();
        assert!(matches!(err, CodecError::ValueOutOfRange { .. }));
    }

    #[test]
    fn test_encode_rejects_wrong_shape() {
        let mut out = Vec::new();
        let err = Scalar::U8
            .encode_into(&Value::Text("x".into()), &mut out)
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::type_mismatch(ValueKind::Unsigned, ValueKind::Text)
        );
    }

    #[test]
    fn test_encode_rejects_overflow() {
        let mut out = Vec::new();
        let err = Scalar::U8
            .encode_into(&Value::Unsigned(256), &mut out)
            .unwrap_err();
        assert!(matches!(err, CodecError::EncodeRejected(_)));
        let err = Scalar::I16
            .encode_into(&Value::Signed(40000), &mut out)
            .unwrap_err();
        assert!(matches!(err, CodecError::EncodeRejected(_)));
    }

    #[test]
    fn test_admits_raw_boundaries() {
        assert!(Scalar::U8.admits_raw(255));
        assert!(!Scalar::U8.admits_raw(256));
        assert!(!Scalar::U8.admits_raw(-1));
        assert!(Scalar::I16.admits_raw(-32768));
        assert!(!Scalar::I16.admits_raw(32768));
        assert!(Scalar::U24.admits_raw(0x00FF_FFFF));
        assert!(!Scalar::U24.admits_raw(0x0100_0000));
    }

    #[test]
    fn test_scale_factor_and_apply() {
        // temperature: i16 raw 2404 at 10^-2 -> 24.04 C
        let scale = Scale::decimal(-2);
        let scaled = scale.apply(Value::Signed(2404));
        match scaled {
            Value::Float(v) => assert!((v - 24.04).abs() < 1e-9),
            other => panic!("expected float, got {other:?}"),
        }
        // RR interval: u16 raw 1024 at 2^-10 -> 1.0 s
        let scale = Scale::binary(-10);
        assert_eq!(scale.apply(Value::Unsigned(1024)), Value::Float(1.0));
        // weight: u16 raw 14000 at 5 * 10^-3 -> 70.0 kg
        let scale = Scale::new(5, -3, 0);
        match scale.apply(Value::Unsigned(14000)) {
            Value::Float(v) => assert!((v - 70.0).abs() < 1e-9),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_scale_passes_special_through() {
        use btsig_types::SpecialValue;
        let scale = Scale::decimal(-2);
        let special = Value::Special(SpecialValue::NotANumber);
        assert_eq!(scale.apply(special.clone()), special);
        assert_eq!(scale.unapply(&special).unwrap(), special);
    }

    #[test]
    fn test_scale_unapply_rounds_to_raw() {
        let scale = Scale::decimal(-2);
        assert_eq!(
            scale.unapply(&Value::Float(24.04)).unwrap(),
            Value::Unsigned(2404)
        );
        assert_eq!(
            scale.unapply(&Value::Float(-0.5)).unwrap(),
            Value::Signed(-50)
        );
    }

    proptest! {
        #[test]
        fn test_prop_u16_round_trip(v in 0u16..=u16::MAX) {
            let mut out = Vec::new();
            Scalar::U16.encode_into(&Value::Unsigned(u64::from(v)), &mut out).unwrap();
            let (value, consumed) = Scalar::U16.decode(&out, 0).unwrap();
            prop_assert_eq!(value, Value::Unsigned(u64::from(v)));
            prop_assert_eq!(consumed, 2);
        }

        #[test]
        fn test_prop_i24_round_trip(v in -0x0080_0000i64..=0x007F_FFFF) {
            let mut out = Vec::new();
            Scalar::I24.encode_into(&Value::Signed(v), &mut out).unwrap();
            let (value, _) = Scalar::I24.decode(&out, 0).unwrap();
            prop_assert_eq!(value, Value::Signed(v));
        }
    }
}
