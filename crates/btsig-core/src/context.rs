//! Cross-characteristic decode context.

use std::collections::HashMap;

use btsig_types::{SpecId, Value};

use crate::unit::Range;

/// Previously decoded sibling values plus per-characteristic range
/// overrides, shared across one batch decode.
///
/// Dependent characteristics (e.g. Glucose Measurement Context, Aggregate)
/// read their prerequisites out of this; callers can also pre-seed it.
#[derive(Debug, Clone, Default)]
pub struct DependencyContext {
    values: HashMap<SpecId, Value>,
    range_overrides: HashMap<SpecId, Range>,
}

impl DependencyContext {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decoded value for an identifier.
    pub fn insert(&mut self, id: SpecId, value: Value) {
        self.values.insert(id, value);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_value(mut self, id: SpecId, value: Value) -> Self {
        self.insert(id, value);
        self
    }

    /// Look up a previously decoded value.
    #[must_use]
    pub fn value(&self, id: SpecId) -> Option<&Value> {
        self.values.get(&id)
    }

    /// Whether a value for the identifier is available.
    #[must_use]
    pub fn contains(&self, id: SpecId) -> bool {
        self.values.contains_key(&id)
    }

    /// Override the valid range for one characteristic, replacing its
    /// descriptor's declared range for this context.
    pub fn set_valid_range(&mut self, id: SpecId, range: Range) {
        self.range_overrides.insert(id, range);
    }

    /// Builder-style [`set_valid_range`](Self::set_valid_range).
    #[must_use]
    pub fn with_valid_range(mut self, id: SpecId, range: Range) -> Self {
        self.set_valid_range(id, range);
        self
    }

    /// The effective range override for an identifier, if any.
    #[must_use]
    pub fn valid_range(&self, id: SpecId) -> Option<Range> {
        self.range_overrides.get(&id).copied()
    }
}
