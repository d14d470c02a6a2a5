//! Codec engine for Bluetooth SIG GATT characteristics.
//!
//! This crate turns raw characteristic payloads into strongly-typed,
//! validated values and back. It knows the SIG assigned-numbers registry
//! (battery, heart rate, blood pressure, glucose, environmental sensing
//! and the rest), the IEEE-11073 medical float formats, and the
//! flag-driven composite layouts measurement characteristics use.
//!
//! # Features
//!
//! - **Translation**: [`Translator`] resolves any identifier spelling
//!   (hex, UUID, display name, `org.bluetooth.characteristic.*`) and runs
//!   the decode pipeline, producing a [`ParseOutcome`] per attribute
//! - **Batch decodes**: [`Translator::parse_many`] resolves
//!   cross-characteristic dependencies in any batch order
//! - **Validation**: length, shape and range checks with an optional
//!   permissive mode that flags instead of rejects
//! - **Extensibility**: [`registry::register_custom`] adds vendor
//!   characteristics, optionally shadowing canonical entries
//!
//! # Example
//!
//! ```
//! use btsig_core::Translator;
//!
//! let translator = Translator::new();
//!
//! let outcome = translator.parse("Heart Rate Measurement", &[0x00, 72]);
//! let value = outcome.value().expect("decodes");
//! assert_eq!(value.field("heart_rate").and_then(|v| v.as_u64()), Some(72));
//! ```

mod characteristics;
pub mod context;
pub mod medfloat;
pub mod registry;
pub mod scalar;
pub mod schema;
pub mod translator;
pub mod unit;
mod validation;

pub use context::DependencyContext;
pub use scalar::{Scalar, Scale};
pub use schema::{FieldCodec, FieldSchema, FieldSpec, FlagCond, Presence};
pub use translator::Translator;
pub use unit::{CharacteristicCodec, Descriptor, LengthRule, Range, Unit, UnitKind};

pub use btsig_types::{
    CodecError, Field, FieldError, ParseOutcome, Result, SpecId, SpecialValue, Value, ValueKind,
    ids,
};
