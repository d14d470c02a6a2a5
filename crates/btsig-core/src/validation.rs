//! The decode validation pipeline.
//!
//! Every decode runs the same stages in order: payload length, required
//! sibling dependencies, the codec itself, declared shape, then numeric
//! range (context overrides beat the descriptor). Permissive mode can
//! downgrade shape and range violations to flagged successes; anything
//! that prevented producing a value at all stays a hard failure.

use tracing::{debug, trace};

use btsig_types::{CodecError, FieldError, ParseOutcome};

use crate::context::DependencyContext;
use crate::unit::{Unit, UnitKind};

pub(crate) fn decode_unit(
    unit: &Unit,
    data: &[u8],
    ctx: &DependencyContext,
    permissive: bool,
) -> ParseOutcome {
    let desc = &unit.descriptor;
    let mut lines = Vec::new();

    if let Err(error) = desc.length.check(data.len()) {
        debug!(id = %desc.id, len = data.len(), %error, "length check failed");
        return ParseOutcome::failure(Some(desc.id), data.to_vec(), error);
    }
    lines.push(format!("length ok ({} bytes)", data.len()));

    for required in &desc.requires {
        if !ctx.contains(*required) {
            let error = CodecError::MissingDependency {
                dependent: desc.id,
                missing: *required,
            };
            debug!(id = %desc.id, missing = %required, "dependency unavailable");
            return ParseOutcome::failure(Some(desc.id), data.to_vec(), error);
        }
        lines.push(format!("dependency {required} available"));
    }

    let decoded = match &unit.kind {
        UnitKind::Composite(schema) => crate::schema::decode(schema, data).map_err(|failure| {
            let field = failure.field.unwrap_or("flags");
            (
                failure.error.clone(),
                vec![FieldError::new(field, None, failure.error.to_string())],
            )
        }),
        _ => unit
            .raw_decode(data, ctx)
            .map_err(|error| (error, Vec::new())),
    };
    let value = match decoded {
        Ok(value) => value,
        Err((error, field_errors)) => {
            debug!(id = %desc.id, %error, "decode failed");
            return ParseOutcome::failure(Some(desc.id), data.to_vec(), error)
                .with_field_errors(field_errors);
        }
    };
    lines.push(format!("decoded {}", value.kind()));

    let mut violation: Option<(CodecError, Vec<FieldError>)> = None;

    if desc.shape.admits(&value) {
        lines.push(format!("shape ok ({})", desc.shape));
    } else {
        violation = Some((
            CodecError::type_mismatch(desc.shape, value.kind()),
            Vec::new(),
        ));
    }

    if violation.is_none() {
        let range = ctx.valid_range(desc.id).or(desc.range);
        if let (Some(range), Some(v)) = (range, value.as_f64()) {
            if range.contains(v) {
                lines.push(format!("range ok ({} to {})", range.min, range.max));
            } else {
                violation = Some((
                    CodecError::out_of_range(v, range.min, range.max),
                    vec![FieldError::new(
                        "value",
                        Some(value.clone()),
                        format!("{} to {}", range.min, range.max),
                    )],
                ));
            }
        }
    }

    let mut outcome = match violation {
        None => {
            trace!(id = %desc.id, %value, "decode ok");
            ParseOutcome::success(desc.id, value, data.to_vec())
        }
        Some((error, field_errors)) if permissive && error.is_permissible() => {
            debug!(id = %desc.id, %error, "accepted non-compliant value");
            lines.push(format!("accepted despite: {error}"));
            ParseOutcome::flagged(desc.id, value, data.to_vec()).with_field_errors(field_errors)
        }
        Some((error, field_errors)) => {
            debug!(id = %desc.id, %error, "validation failed");
            return ParseOutcome::failure(Some(desc.id), data.to_vec(), error)
                .with_field_errors(field_errors);
        }
    };
    outcome.trace = lines;
    outcome
}
