//! The decoded value model.
//!
//! Every characteristic decode produces a [`Value`]: a small tagged union
//! covering the shapes the GATT registry actually uses. The engine itself
//! treats values as opaque beyond shape and numeric bounds checks.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use time::PrimitiveDateTime;

/// Reserved IEEE-11073 medical float states.
///
/// SFLOAT/FLOAT payloads reserve a handful of mantissa patterns for
/// non-finite results; they decode to one of these rather than a finite
/// number, and encode back to the reserved pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpecialValue {
    /// Positive infinity.
    PositiveInfinity,
    /// Negative infinity.
    NegativeInfinity,
    /// Not a number (includes the reserved NRes pattern).
    NotANumber,
}

impl fmt::Display for SpecialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialValue::PositiveInfinity => write!(f, "+INFINITY"),
            SpecialValue::NegativeInfinity => write!(f, "-INFINITY"),
            SpecialValue::NotANumber => write!(f, "NaN"),
        }
    }
}

/// One named field inside a [`Value::Struct`].
///
/// Fields keep their schema order, which is also wire order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Field name from the characteristic's schema.
    pub name: String,
    /// Decoded field value.
    pub value: Value,
}

impl Field {
    /// Create a field.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A decoded characteristic value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Unsigned integer (any width up to 64 bits).
    Unsigned(u64),
    /// Signed integer (any width up to 64 bits).
    Signed(i64),
    /// Finite floating-point value, after scaling.
    Float(f64),
    /// Boolean, typically derived from a flag bit.
    Bool(bool),
    /// Reserved medical-float state.
    Special(SpecialValue),
    /// UTF-8 text.
    Text(String),
    /// GATT `date_time` (7-byte calendar timestamp).
    DateTime(PrimitiveDateTime),
    /// Ordered multi-field record produced by composite decoders.
    Struct(Vec<Field>),
    /// Homogeneous trailing array (e.g. RR intervals).
    Array(Vec<Value>),
    /// Raw bytes for opaque payloads.
    Bytes(Vec<u8>),
}

impl Value {
    /// The shape of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Unsigned(_) => ValueKind::Unsigned,
            Value::Signed(_) => ValueKind::Signed,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Special(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Struct(_) => ValueKind::Struct,
            Value::Array(_) => ValueKind::Array,
            Value::Bytes(_) => ValueKind::Bytes,
        }
    }

    /// Numeric view of the value, if it has one.
    ///
    /// [`Value::Special`] deliberately has no numeric view; reserved
    /// medical-float states are exempt from range checks.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Unsigned(v) => Some(*v as f64),
            Value::Signed(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Unsigned view of the value, if it is one.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    /// Signed view of the value, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Signed(v) => Some(*v),
            Value::Unsigned(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Text view of the value, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean view of the value, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Look up a named field of a [`Value::Struct`].
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(fields) => fields.iter().find(|f| f.name == name).map(|f| &f.value),
            _ => None,
        }
    }

    /// Whether a [`Value::Struct`] contains the named field.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unsigned(v) => write!(f, "{v}"),
            Value::Signed(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Special(s) => write!(f, "{s}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                write!(f, "}}")
            }
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Bytes(bytes) => {
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// Declared shape of a characteristic's decoded value.
///
/// Descriptors declare one of these; the validation pipeline checks the
/// decoded [`Value`] against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    /// Unsigned integer.
    Unsigned,
    /// Signed integer.
    Signed,
    /// Floating-point (finite or a reserved medical-float state).
    Float,
    /// Boolean.
    Bool,
    /// UTF-8 text.
    Text,
    /// Calendar timestamp.
    DateTime,
    /// Multi-field record.
    Struct,
    /// Homogeneous array.
    Array,
    /// Raw bytes.
    Bytes,
    /// Any shape; disables the shape check.
    Any,
}

impl ValueKind {
    /// Whether a decoded value satisfies this declared shape.
    #[must_use]
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            ValueKind::Any => true,
            kind => value.kind() == *kind,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Unsigned => "unsigned integer",
            ValueKind::Signed => "signed integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "boolean",
            ValueKind::Text => "text",
            ValueKind::DateTime => "date-time",
            ValueKind::Struct => "struct",
            ValueKind::Array => "array",
            ValueKind::Bytes => "bytes",
            ValueKind::Any => "any",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_each_variant() {
        assert_eq!(Value::Unsigned(1).kind(), ValueKind::Unsigned);
        assert_eq!(Value::Signed(-1).kind(), ValueKind::Signed);
        assert_eq!(Value::Float(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::Text("x".into()).kind(), ValueKind::Text);
        assert_eq!(Value::Bytes(vec![0]).kind(), ValueKind::Bytes);
    }

    #[test]
    fn test_special_counts_as_float_shape() {
        let special = Value::Special(SpecialValue::NotANumber);
        assert!(ValueKind::Float.admits(&special));
        // but it has no numeric view, so range checks skip it
        assert_eq!(special.as_f64(), None);
    }

    #[test]
    fn test_any_admits_everything() {
        assert!(ValueKind::Any.admits(&Value::Unsigned(5)));
        assert!(ValueKind::Any.admits(&Value::Struct(vec![])));
    }

    #[test]
    fn test_struct_field_lookup() {
        let v = Value::Struct(vec![
            Field::new("heart_rate", Value::Unsigned(72)),
            Field::new("energy_expended", Value::Unsigned(120)),
        ]);
        assert_eq!(v.field("heart_rate"), Some(&Value::Unsigned(72)));
        assert!(v.has_field("energy_expended"));
        assert_eq!(v.field("missing"), None);
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::Unsigned(100).as_f64(), Some(100.0));
        assert_eq!(Value::Signed(-3).as_f64(), Some(-3.0));
        assert_eq!(Value::Float(24.04).as_f64(), Some(24.04));
        assert_eq!(Value::Unsigned(7).as_i64(), Some(7));
        assert_eq!(Value::Text("x".into()).as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Unsigned(100).to_string(), "100");
        assert_eq!(
            Value::Special(SpecialValue::PositiveInfinity).to_string(),
            "+INFINITY"
        );
        let v = Value::Struct(vec![Field::new("battery", Value::Unsigned(85))]);
        assert_eq!(v.to_string(), "{battery: 85}");
        assert_eq!(Value::Bytes(vec![0xAB, 0x01]).to_string(), "ab01");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_value_serialization() {
        let v = Value::Struct(vec![Field::new("heart_rate", Value::Unsigned(72))]);
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("heart_rate"));
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
