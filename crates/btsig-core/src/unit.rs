//! Characteristic units: descriptor metadata plus a codec.

use std::fmt;
use std::sync::Arc;

use btsig_types::{CodecError, Result, SpecId, Value, ValueKind};

use crate::context::DependencyContext;
use crate::scalar::{Scalar, Scale};
use crate::schema::FieldSchema;

/// A decoder/encoder routine for characteristics whose layout cannot be
/// expressed as a scalar or a static field schema.
///
/// Implementations receive the sibling context so they can consult
/// prerequisite values.
pub trait CharacteristicCodec: Send + Sync {
    /// Decode a payload.
    ///
    /// # Errors
    ///
    /// Any [`CodecError`] appropriate to the failure.
    fn decode(&self, data: &[u8], ctx: &DependencyContext) -> Result<Value>;

    /// Encode a value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncodeRejected`] when the value cannot be
    /// represented, or [`CodecError::TypeMismatch`] for a wrong shape.
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;
}

/// How a unit's payload is coded.
#[derive(Clone)]
pub enum UnitKind {
    /// A single scalar, optionally scaled.
    Scalar {
        /// Wire format.
        scalar: Scalar,
        /// Scaling from raw to interpreted value.
        scale: Option<Scale>,
    },
    /// A flag-driven composite layout.
    Composite(&'static FieldSchema),
    /// A bespoke routine.
    Routine(Arc<dyn CharacteristicCodec>),
}

impl fmt::Debug for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Scalar { scalar, scale } => f
                .debug_struct("Scalar")
                .field("scalar", scalar)
                .field("scale", scale)
                .finish(),
            UnitKind::Composite(schema) => f.debug_tuple("Composite").field(schema).finish(),
            UnitKind::Routine(_) => f.debug_tuple("Routine").field(&"..").finish(),
        }
    }
}

/// Payload length requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    /// Exactly this many bytes.
    Exact(usize),
    /// At least this many bytes.
    AtLeast(usize),
}

impl LengthRule {
    /// Check a payload length.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InsufficientData`] naming the requirement.
    pub fn check(self, actual: usize) -> Result<()> {
        match self {
            LengthRule::Exact(required) if actual != required => {
                Err(CodecError::insufficient(required, actual))
            }
            LengthRule::AtLeast(required) if actual < required => {
                Err(CodecError::insufficient(required, actual))
            }
            _ => Ok(()),
        }
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl Range {
    /// A range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether a value lies within the bounds.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Registry metadata for one characteristic.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Normalized identifier.
    pub id: SpecId,
    /// Display name, e.g. `"Battery Level"`.
    pub name: String,
    /// Org identifier, e.g. `"org.bluetooth.characteristic.battery_level"`.
    pub org_id: String,
    /// Payload length requirement.
    pub length: LengthRule,
    /// Declared shape of the decoded value.
    pub shape: ValueKind,
    /// Declared numeric bounds, for scalar units.
    pub range: Option<Range>,
    /// Unit of measure, e.g. `"%"` or `"degC"`.
    pub unit_of_measure: Option<String>,
    /// Siblings that must decode before this unit can.
    pub requires: Vec<SpecId>,
    /// Siblings this unit consults when present.
    pub optional: Vec<SpecId>,
}

impl Descriptor {
    /// All name-shaped aliases this descriptor resolves under: the display
    /// name (case-insensitively), its snake_case form, and the org id.
    #[must_use]
    pub fn aliases(&self) -> Vec<String> {
        let lower = self.name.to_lowercase();
        let snake = lower.replace([' ', '-'], "_");
        let mut aliases = vec![lower];
        if !aliases.contains(&snake) {
            aliases.push(snake);
        }
        aliases.push(self.org_id.clone());
        aliases
    }
}

/// A registered characteristic: descriptor plus codec.
#[derive(Debug, Clone)]
pub struct Unit {
    /// Registry metadata.
    pub descriptor: Descriptor,
    /// Payload codec.
    pub kind: UnitKind,
}

impl Unit {
    /// A scalar unit.
    #[must_use]
    pub fn scalar(id: SpecId, name: &str, org_tail: &str, scalar: Scalar) -> Self {
        let length = match scalar.width() {
            Some(w) => LengthRule::Exact(w),
            None => LengthRule::AtLeast(0),
        };
        Self {
            descriptor: Descriptor {
                id,
                name: name.to_owned(),
                org_id: format!("org.bluetooth.characteristic.{org_tail}"),
                length,
                shape: scalar.kind(),
                range: None,
                unit_of_measure: None,
                requires: Vec::new(),
                optional: Vec::new(),
            },
            kind: UnitKind::Scalar {
                scalar,
                scale: None,
            },
        }
    }

    /// A scaled scalar unit. The decoded shape becomes float.
    #[must_use]
    pub fn scaled(id: SpecId, name: &str, org_tail: &str, scalar: Scalar, scale: Scale) -> Self {
        let mut unit = Self::scalar(id, name, org_tail, scalar);
        unit.descriptor.shape = ValueKind::Float;
        unit.kind = UnitKind::Scalar {
            scalar,
            scale: Some(scale),
        };
        unit
    }

    /// A composite unit.
    #[must_use]
    pub fn composite(id: SpecId, name: &str, org_tail: &str, schema: &'static FieldSchema) -> Self {
        Self {
            descriptor: Descriptor {
                id,
                name: name.to_owned(),
                org_id: format!("org.bluetooth.characteristic.{org_tail}"),
                length: LengthRule::AtLeast(schema.min_len()),
                shape: ValueKind::Struct,
                range: None,
                unit_of_measure: None,
                requires: Vec::new(),
                optional: Vec::new(),
            },
            kind: UnitKind::Composite(schema),
        }
    }

    /// A bespoke-routine unit.
    #[must_use]
    pub fn routine(
        id: SpecId,
        name: &str,
        org_tail: &str,
        shape: ValueKind,
        codec: Arc<dyn CharacteristicCodec>,
    ) -> Self {
        Self {
            descriptor: Descriptor {
                id,
                name: name.to_owned(),
                org_id: format!("org.bluetooth.characteristic.{org_tail}"),
                length: LengthRule::AtLeast(0),
                shape,
                range: None,
                unit_of_measure: None,
                requires: Vec::new(),
                optional: Vec::new(),
            },
            kind: UnitKind::Routine(codec),
        }
    }

    /// Set the declared numeric range.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.descriptor.range = Some(Range::new(min, max));
        self
    }

    /// Set the unit of measure.
    #[must_use]
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.descriptor.unit_of_measure = Some(unit.to_owned());
        self
    }

    /// Override the payload length rule.
    #[must_use]
    pub fn with_length(mut self, length: LengthRule) -> Self {
        self.descriptor.length = length;
        self
    }

    /// Declare required sibling dependencies.
    #[must_use]
    pub fn with_requires(mut self, requires: &[SpecId]) -> Self {
        self.descriptor.requires = requires.to_vec();
        self
    }

    /// Declare optional sibling dependencies.
    #[must_use]
    pub fn with_optional(mut self, optional: &[SpecId]) -> Self {
        self.descriptor.optional = optional.to_vec();
        self
    }

    /// Decode the payload without validation.
    ///
    /// # Errors
    ///
    /// Any [`CodecError`] the codec reports. Composite field attribution is
    /// carried separately by the validation pipeline.
    pub fn raw_decode(&self, data: &[u8], ctx: &DependencyContext) -> Result<Value> {
        match &self.kind {
            UnitKind::Scalar { scalar, scale } => {
                let (value, _) = scalar.decode(data, 0)?;
                Ok(match scale {
                    Some(scale) => scale.apply(value),
                    None => value,
                })
            }
            UnitKind::Composite(schema) => {
                crate::schema::decode(schema, data).map_err(|failure| failure.error)
            }
            UnitKind::Routine(codec) => codec.decode(data, ctx),
        }
    }

    /// Encode a value, enforcing the descriptor's shape and range first.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] for a wrong shape,
    /// [`CodecError::EncodeRejected`] for an out-of-range or unfittable
    /// value.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        if !self.descriptor.shape.admits(value) {
            return Err(CodecError::type_mismatch(
                self.descriptor.shape,
                value.kind(),
            ));
        }
        if let (Some(range), Some(v)) = (self.descriptor.range, value.as_f64()) {
            if !range.contains(v) {
                return Err(CodecError::encode_rejected(format!(
                    "{v} is outside the valid range ({} to {})",
                    range.min, range.max
                )));
            }
        }
        match &self.kind {
            UnitKind::Scalar { scalar, scale } => {
                let raw = match scale {
                    Some(scale) => scale.unapply(value)?,
                    None => value.clone(),
                };
                let mut out = Vec::new();
                scalar.encode_into(&raw, &mut out)?;
                Ok(out)
            }
            UnitKind::Composite(schema) => crate::schema::encode(schema, value),
            UnitKind::Routine(codec) => codec.encode(value),
        }
    }
}
