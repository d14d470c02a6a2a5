//! Platform-agnostic types for Bluetooth SIG GATT characteristic codecs.
//!
//! This crate provides the shared data model consumed by the codec engine
//! (`btsig-core`) and by anything built on top of it.
//!
//! # Features
//!
//! - [`SpecId`]: normalized specification identifiers (16/32/128-bit forms)
//! - [`ids`]: well-known SIG characteristic identifier constants
//! - [`Value`] / [`ValueKind`]: the decoded value model
//! - [`ParseOutcome`]: per-attribute decode results
//! - [`CodecError`]: the decode/encode error taxonomy
//!
//! # Example
//!
//! ```
//! use btsig_types::{SpecId, ids};
//!
//! let id = SpecId::parse("0x2A19").unwrap();
//! assert_eq!(id, ids::BATTERY_LEVEL);
//! ```

pub mod error;
pub mod id;
pub mod ids;
pub mod outcome;
pub mod value;

pub use error::{CodecError, Result};
pub use id::SpecId;
pub use outcome::{FieldError, ParseOutcome};
pub use value::{Field, SpecialValue, Value, ValueKind};
