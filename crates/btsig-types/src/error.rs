//! Error taxonomy for characteristic decode/encode.

use thiserror::Error;

use crate::id::SpecId;
use crate::value::ValueKind;

/// Errors that can occur while decoding or encoding a characteristic.
///
/// Every kind attaches to a single attribute's outcome; a batch decode
/// never aborts siblings because one attribute failed.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error
/// variants in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The raw payload is shorter than the unit requires.
    ///
    /// Also reported when a trailing repeated group does not divide evenly
    /// into the remaining bytes; `required` then names the next whole
    /// element boundary.
    #[error("insufficient data: requires {required} bytes, got {actual}")]
    InsufficientData {
        /// Bytes required by the unit or field.
        required: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The decoded value's shape disagrees with the descriptor.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Shape declared by the descriptor.
        expected: ValueKind,
        /// Shape actually produced.
        actual: ValueKind,
    },

    /// A decoded numeric value is outside the declared (or overridden) bounds.
    #[error("value {value} is outside valid range ({min} to {max})")]
    ValueOutOfRange {
        /// The offending value.
        value: f64,
        /// Lower bound, inclusive.
        min: f64,
        /// Upper bound, inclusive.
        max: f64,
    },

    /// No registry entry, canonical or custom, matches the identifier.
    #[error("unresolved identifier: {0}")]
    UnresolvedIdentifier(String),

    /// A required sibling value was absent at decode time.
    #[error("missing dependency: {dependent} requires {missing}")]
    MissingDependency {
        /// The unit that could not decode.
        dependent: SpecId,
        /// The sibling it needed.
        missing: SpecId,
    },

    /// The value cannot be represented in the unit's wire format.
    #[error("cannot encode value: {0}")]
    EncodeRejected(String),
}

impl CodecError {
    /// Create an [`CodecError::InsufficientData`] error.
    pub fn insufficient(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Create a [`CodecError::TypeMismatch`] error.
    pub fn type_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Create a [`CodecError::ValueOutOfRange`] error.
    pub fn out_of_range(value: f64, min: f64, max: f64) -> Self {
        Self::ValueOutOfRange { value, min, max }
    }

    /// Create an [`CodecError::EncodeRejected`] error.
    pub fn encode_rejected(message: impl Into<String>) -> Self {
        Self::EncodeRejected(message.into())
    }

    /// Whether permissive mode may downgrade this error to a flagged
    /// success. Only range and shape violations qualify; a value that
    /// could not be produced at all stays a hard failure.
    #[must_use]
    pub fn is_permissible(&self) -> bool {
        matches!(
            self,
            CodecError::ValueOutOfRange { .. } | CodecError::TypeMismatch { .. }
        )
    }
}

/// Result type alias using [`CodecError`].
pub type Result<T> = std::result::Result<T, CodecError>;
