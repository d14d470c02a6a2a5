//! Per-attribute decode outcomes.

use crate::error::CodecError;
use crate::id::SpecId;
use crate::value::Value;

/// A problem with one field of a composite decode.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Schema name of the offending field.
    pub field: String,
    /// The decoded value, when one was produced before the check failed.
    pub value: Option<Value>,
    /// What the schema expected there.
    pub expected: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, value: Option<Value>, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value,
            expected: expected.into(),
        }
    }
}

/// The outcome of one decode attempt.
///
/// Immutable once constructed. A batch decode produces one of these per
/// requested identifier; a failure here never aborts siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// The resolved identifier, when resolution succeeded.
    pub id: Option<SpecId>,
    /// The decoded value on (possibly flagged) success.
    pub value: Option<Value>,
    /// The original payload bytes.
    pub raw: Vec<u8>,
    /// The failure, if the decode did not produce a value.
    pub error: Option<CodecError>,
    /// Per-field problems surfaced by composite decoders.
    pub field_errors: Vec<FieldError>,
    /// True when permissive mode accepted a value that failed range or
    /// shape validation.
    pub non_compliant: bool,
    /// Ordered diagnostic trace of the pipeline steps taken.
    pub trace: Vec<String>,
}

impl ParseOutcome {
    /// A fully compliant success.
    #[must_use]
    pub fn success(id: SpecId, value: Value, raw: Vec<u8>) -> Self {
        Self {
            id: Some(id),
            value: Some(value),
            raw,
            error: None,
            field_errors: Vec::new(),
            non_compliant: false,
            trace: Vec::new(),
        }
    }

    /// A permissive-mode success carrying a value that failed validation.
    #[must_use]
    pub fn flagged(id: SpecId, value: Value, raw: Vec<u8>) -> Self {
        Self {
            non_compliant: true,
            ..Self::success(id, value, raw)
        }
    }

    /// A hard failure.
    #[must_use]
    pub fn failure(id: Option<SpecId>, raw: Vec<u8>, error: CodecError) -> Self {
        Self {
            id,
            value: None,
            raw,
            error: Some(error),
            field_errors: Vec::new(),
            non_compliant: false,
            trace: Vec::new(),
        }
    }

    /// Whether a value was produced (compliant or flagged).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }

    /// Borrow the decoded value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Append a diagnostic trace line.
    #[must_use]
    pub fn with_trace(mut self, line: impl Into<String>) -> Self {
        self.trace.push(line.into());
        self
    }

    /// Attach per-field errors.
    #[must_use]
    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.field_errors = errors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids;

    #[test]
    fn test_success_outcome() {
        let outcome = ParseOutcome::success(ids::BATTERY_LEVEL, Value::Unsigned(100), vec![100]);
        assert!(outcome.is_success());
        assert!(!outcome.non_compliant);
        assert_eq!(outcome.value(), Some(&Value::Unsigned(100)));
        assert_eq!(outcome.raw, vec![100]);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_flagged_outcome() {
        let outcome = ParseOutcome::flagged(ids::BATTERY_LEVEL, Value::Unsigned(200), vec![200]);
        assert!(outcome.is_success());
        assert!(outcome.non_compliant);
    }

    #[test]
    fn test_failure_outcome() {
        let outcome = ParseOutcome::failure(
            Some(ids::BATTERY_LEVEL),
            vec![],
            CodecError::insufficient(1, 0),
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.error, Some(CodecError::insufficient(1, 0)));
    }

    #[test]
    fn test_trace_and_field_errors() {
        let outcome = ParseOutcome::success(ids::BATTERY_LEVEL, Value::Unsigned(1), vec![1])
            .with_trace("length ok (1 byte)")
            .with_field_errors(vec![FieldError::new("level", None, "0 to 100")]);
        assert_eq!(outcome.trace.len(), 1);
        assert_eq!(outcome.field_errors[0].field, "level");
    }
}
