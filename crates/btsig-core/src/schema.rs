//! Flag-driven composite schemas.
//!
//! Measurement characteristics lead with a flags word whose bits select
//! which optional fields follow, which width a field uses, and what a few
//! boolean readings are. A [`FieldSchema`] is a static description of that
//! layout; decode walks it left to right, encode derives a consistent
//! flags word from the fields supplied and emits them in schema order.

use btsig_types::{CodecError, Field, Result, Value, ValueKind};

use crate::scalar::{Scalar, Scale};

/// A single condition on the flags word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagCond {
    /// Bit position within the flags word.
    pub bit: u8,
    /// Required state of the bit.
    pub set: bool,
}

impl FlagCond {
    /// Condition met when the bit is set.
    #[must_use]
    pub const fn set(bit: u8) -> Self {
        Self { bit, set: true }
    }

    /// Condition met when the bit is clear.
    #[must_use]
    pub const fn clear(bit: u8) -> Self {
        Self { bit, set: false }
    }

    fn met(self, flags: u64) -> bool {
        (flags & (1 << self.bit) != 0) == self.set
    }
}

/// When a field appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The field is always present.
    Always,
    /// The field is present when every condition holds.
    If(&'static [FlagCond]),
}

impl Presence {
    fn met(self, flags: u64) -> bool {
        match self {
            Presence::Always => true,
            Presence::If(conds) => conds.iter().all(|c| c.met(flags)),
        }
    }
}

/// How a field's bytes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCodec {
    /// One scalar at the current offset.
    Fixed(Scalar),
    /// One of two scalar widths, chosen by a flag bit.
    WidthSwitch {
        /// Selector bit in the flags word.
        bit: u8,
        /// Format when the bit is clear.
        clear: Scalar,
        /// Format when the bit is set.
        set: Scalar,
    },
    /// A boolean carried in the flags word itself; consumes no bytes.
    FlagBit(u8),
    /// A trailing array of fixed-width elements consuming the rest of the
    /// payload. Must be the last field in the schema.
    Repeated(Scalar),
}

/// One field of a composite characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, also the key in the decoded struct.
    pub name: &'static str,
    /// Wire format.
    pub codec: FieldCodec,
    /// Scaling from raw to interpreted value.
    pub scale: Option<Scale>,
    /// When the field appears.
    pub presence: Presence,
}

impl FieldSpec {
    /// An unconditional scalar field.
    #[must_use]
    pub const fn always(name: &'static str, scalar: Scalar) -> Self {
        Self {
            name,
            codec: FieldCodec::Fixed(scalar),
            scale: None,
            presence: Presence::Always,
        }
    }

    /// A scalar field gated on flag conditions.
    #[must_use]
    pub const fn when(name: &'static str, scalar: Scalar, conds: &'static [FlagCond]) -> Self {
        Self {
            name,
            codec: FieldCodec::Fixed(scalar),
            scale: None,
            presence: Presence::If(conds),
        }
    }

    /// An unconditional field whose width a flag bit selects.
    #[must_use]
    pub const fn switch(name: &'static str, bit: u8, clear: Scalar, set: Scalar) -> Self {
        Self {
            name,
            codec: FieldCodec::WidthSwitch { bit, clear, set },
            scale: None,
            presence: Presence::Always,
        }
    }

    /// A boolean surfaced from a flag bit, gated on flag conditions.
    #[must_use]
    pub const fn flag_bit(name: &'static str, bit: u8, conds: &'static [FlagCond]) -> Self {
        Self {
            name,
            codec: FieldCodec::FlagBit(bit),
            scale: None,
            presence: Presence::If(conds),
        }
    }

    /// A trailing repeated array gated on flag conditions.
    #[must_use]
    pub const fn repeated_when(
        name: &'static str,
        scalar: Scalar,
        conds: &'static [FlagCond],
    ) -> Self {
        Self {
            name,
            codec: FieldCodec::Repeated(scalar),
            scale: None,
            presence: Presence::If(conds),
        }
    }

    /// Attach a scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    fn scaled(&self, value: Value) -> Value {
        match self.scale {
            Some(scale) => scale.apply(value),
            None => value,
        }
    }

    fn unscaled(&self, value: &Value) -> Result<Value> {
        match self.scale {
            Some(scale) => scale.unapply(value),
            None => Ok(value.clone()),
        }
    }
}

/// Layout of a composite characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    /// Format of the leading flags word, if the layout has one.
    pub flags: Option<Scalar>,
    /// Fields in wire order.
    pub fields: &'static [FieldSpec],
}

impl FieldSchema {
    /// Bytes required by the flags word and every unconditional field,
    /// assuming the narrower branch of each width switch.
    #[must_use]
    pub fn min_len(&self) -> usize {
        let mut len = self.flags.and_then(Scalar::width).unwrap_or(0);
        for spec in self.fields {
            if !matches!(spec.presence, Presence::Always) {
                continue;
            }
            len += match spec.codec {
                FieldCodec::Fixed(scalar) => scalar.width().unwrap_or(0),
                FieldCodec::WidthSwitch { clear, set, .. } => {
                    let a = clear.width().unwrap_or(0);
                    let b = set.width().unwrap_or(0);
                    a.min(b)
                }
                FieldCodec::FlagBit(_) | FieldCodec::Repeated(_) => 0,
            };
        }
        len
    }
}

/// A decode or encode problem attributed to one schema field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldFailure {
    /// The offending field, or `None` for the flags word itself.
    pub field: Option<&'static str>,
    pub error: CodecError,
}

impl FieldFailure {
    fn new(field: &'static str, error: CodecError) -> Self {
        Self {
            field: Some(field),
            error,
        }
    }
}

/// Decode a payload against a schema, producing a [`Value::Struct`].
///
/// Bytes past the last decoded field are ignored unless a repeated field
/// claims them.
pub(crate) fn decode(schema: &FieldSchema, data: &[u8]) -> std::result::Result<Value, FieldFailure> {
    let mut offset = 0usize;
    let flags = match schema.flags {
        Some(scalar) => {
            let (value, consumed) = scalar.decode(data, 0).map_err(|error| FieldFailure {
                field: None,
                error,
            })?;
            offset += consumed;
            value.as_u64().unwrap_or(0)
        }
        None => 0,
    };

    let mut fields = Vec::with_capacity(schema.fields.len());
    for spec in schema.fields {
        if !spec.presence.met(flags) {
            continue;
        }
        match spec.codec {
            FieldCodec::FlagBit(bit) => {
                fields.push(Field::new(spec.name, Value::Bool(flags & (1 << bit) != 0)));
            }
            FieldCodec::Fixed(scalar) => {
                let (value, consumed) = scalar
                    .decode(data, offset)
                    .map_err(|e| FieldFailure::new(spec.name, e))?;
                offset += consumed;
                fields.push(Field::new(spec.name, spec.scaled(value)));
            }
            FieldCodec::WidthSwitch { bit, clear, set } => {
                let scalar = if flags & (1 << bit) != 0 { set } else { clear };
                let (value, consumed) = scalar
                    .decode(data, offset)
                    .map_err(|e| FieldFailure::new(spec.name, e))?;
                offset += consumed;
                fields.push(Field::new(spec.name, spec.scaled(value)));
            }
            FieldCodec::Repeated(scalar) => {
                let width = scalar.width().unwrap_or(1);
                let remaining = data.len().saturating_sub(offset);
                let leftover = remaining % width;
                if leftover != 0 {
                    // report the next whole-element boundary
                    return Err(FieldFailure::new(
                        spec.name,
                        CodecError::insufficient(data.len() + width - leftover, data.len()),
                    ));
                }
                let mut items = Vec::with_capacity(remaining / width);
                while offset < data.len() {
                    let (value, consumed) = scalar
                        .decode(data, offset)
                        .map_err(|e| FieldFailure::new(spec.name, e))?;
                    offset += consumed;
                    items.push(spec.scaled(value));
                }
                fields.push(Field::new(spec.name, Value::Array(items)));
            }
        }
    }
    Ok(Value::Struct(fields))
}

/// Bit demands accumulated while deriving a flags word.
#[derive(Debug, Default)]
struct FlagDemands {
    set: u64,
    clear: u64,
}

impl FlagDemands {
    fn require(&mut self, bit: u8, set: bool, field: &str) -> Result<()> {
        let mask = 1u64 << bit;
        let (this, other) = if set {
            (&mut self.set, self.clear)
        } else {
            (&mut self.clear, self.set)
        };
        if other & mask != 0 {
            return Err(CodecError::encode_rejected(format!(
                "field {field} needs flag bit {bit} {} but another field needs it {}",
                if set { "set" } else { "clear" },
                if set { "clear" } else { "set" },
            )));
        }
        *this |= mask;
        Ok(())
    }
}

/// Encode a [`Value::Struct`] against a schema.
///
/// The flags word is derived from the fields supplied: presence
/// conditions, flag-bit booleans and width switches each demand bit
/// states, and any contradiction or presence mismatch is rejected.
pub(crate) fn encode(schema: &FieldSchema, value: &Value) -> Result<Vec<u8>> {
    let fields = match value {
        Value::Struct(fields) => fields,
        other => return Err(CodecError::type_mismatch(ValueKind::Struct, other.kind())),
    };
    for field in fields {
        if !schema.fields.iter().any(|s| s.name == field.name) {
            return Err(CodecError::encode_rejected(format!(
                "unknown field {}",
                field.name
            )));
        }
    }

    let mut demands = FlagDemands::default();
    for spec in schema.fields {
        let Some(field) = fields.iter().find(|f| f.name == spec.name) else {
            continue;
        };
        if let Presence::If(conds) = spec.presence {
            for cond in conds {
                demands.require(cond.bit, cond.set, spec.name)?;
            }
        }
        match spec.codec {
            FieldCodec::FlagBit(bit) => {
                let b = field
                    .value
                    .as_bool()
                    .ok_or_else(|| CodecError::type_mismatch(ValueKind::Bool, field.value.kind()))?;
                demands.require(bit, b, spec.name)?;
            }
            FieldCodec::WidthSwitch { bit, clear, set } => {
                let raw = spec.unscaled(&field.value)?;
                let raw = raw.as_i64().ok_or_else(|| {
                    CodecError::type_mismatch(clear.kind(), field.value.kind())
                })?;
                if clear.admits_raw(raw) {
                    demands.require(bit, false, spec.name)?;
                } else if set.admits_raw(raw) {
                    demands.require(bit, true, spec.name)?;
                } else {
                    return Err(CodecError::encode_rejected(format!(
                        "field {} value {raw} fits neither width",
                        spec.name
                    )));
                }
            }
            FieldCodec::Fixed(_) | FieldCodec::Repeated(_) => {}
        }
    }

    let flags = demands.set;
    for spec in schema.fields {
        let present = fields.iter().any(|f| f.name == spec.name);
        let expected = spec.presence.met(flags);
        if present != expected {
            return Err(CodecError::encode_rejected(if present {
                format!("field {} conflicts with the derived flags", spec.name)
            } else {
                format!("field {} is required by the derived flags", spec.name)
            }));
        }
    }

    let mut out = Vec::new();
    if let Some(scalar) = schema.flags {
        scalar.encode_into(&Value::Unsigned(flags), &mut out)?;
    }
    for spec in schema.fields {
        if !spec.presence.met(flags) {
            continue;
        }
        let Some(field) = fields.iter().find(|f| f.name == spec.name) else {
            continue;
        };
        match spec.codec {
            FieldCodec::FlagBit(_) => {}
            FieldCodec::Fixed(scalar) => {
                scalar.encode_into(&spec.unscaled(&field.value)?, &mut out)?;
            }
            FieldCodec::WidthSwitch { bit, clear, set } => {
                let scalar = if flags & (1 << bit) != 0 { set } else { clear };
                scalar.encode_into(&spec.unscaled(&field.value)?, &mut out)?;
            }
            FieldCodec::Repeated(scalar) => {
                let items = match &field.value {
                    Value::Array(items) => items,
                    other => {
                        return Err(CodecError::type_mismatch(ValueKind::Array, other.kind()));
                    }
                };
                for item in items {
                    scalar.encode_into(&spec.unscaled(item)?, &mut out)?;
                }
            }
        }
    }
    Ok(out)
}
