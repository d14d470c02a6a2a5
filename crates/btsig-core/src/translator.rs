//! The translation façade.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use btsig_types::{CodecError, ParseOutcome, Result, SpecId, Value};

use crate::context::DependencyContext;
use crate::registry;
use crate::unit::Unit;
use crate::validation;

/// Decodes and encodes characteristic payloads against the registry.
///
/// Cheap to construct and stateless apart from its mode flags; the
/// registry behind it is shared and thread-safe.
///
/// # Examples
///
/// ```
/// use btsig_core::Translator;
///
/// let translator = Translator::new();
/// let outcome = translator.parse("2A19", &[100]);
/// assert_eq!(outcome.value().and_then(|v| v.as_u64()), Some(100));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    permissive: bool,
}

impl Translator {
    /// A strict translator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set permissive mode: shape and range violations yield flagged
    /// values instead of failures.
    #[must_use]
    pub fn permissive(mut self, permissive: bool) -> Self {
        self.permissive = permissive;
        self
    }

    /// Decode one payload.
    ///
    /// Never panics and never returns `Err`; every problem lands in the
    /// outcome. `Translator` is `Copy`, so a per-call permissive decode
    /// is just `Translator::new().permissive(true).parse(..)`.
    #[must_use]
    pub fn parse(&self, identifier: &str, data: &[u8]) -> ParseOutcome {
        self.parse_with_context(identifier, data, &DependencyContext::new())
    }

    /// Decode one payload with sibling values available.
    #[must_use]
    pub fn parse_with_context(
        &self,
        identifier: &str,
        data: &[u8],
        ctx: &DependencyContext,
    ) -> ParseOutcome {
        match registry::resolve(identifier) {
            Ok(unit) => validation::decode_unit(&unit, data, ctx, self.permissive),
            Err(error) => {
                debug!(identifier, %error, "identifier did not resolve");
                ParseOutcome::failure(None, data.to_vec(), error)
            }
        }
    }

    /// Decode a batch of payloads, resolving dependencies between them.
    ///
    /// Attributes decode in dependency order regardless of batch order:
    /// each pass decodes every attribute whose prerequisites are already
    /// in the context and feeds the results back in, until nothing more
    /// can make progress. Leftovers fail with
    /// [`CodecError::MissingDependency`]; one attribute's failure never
    /// aborts its siblings.
    #[must_use]
    pub fn parse_many(&self, batch: &[(&str, &[u8])]) -> BTreeMap<String, ParseOutcome> {
        self.parse_many_with_context(batch, DependencyContext::new())
    }

    /// [`parse_many`](Self::parse_many) with a pre-seeded context.
    #[must_use]
    pub fn parse_many_with_context(
        &self,
        batch: &[(&str, &[u8])],
        mut ctx: DependencyContext,
    ) -> BTreeMap<String, ParseOutcome> {
        let mut outcomes = BTreeMap::new();
        let mut pending: Vec<(&str, Arc<Unit>, &[u8])> = Vec::with_capacity(batch.len());
        for &(identifier, data) in batch {
            match registry::resolve(identifier) {
                Ok(unit) => pending.push((identifier, unit, data)),
                Err(error) => {
                    outcomes.insert(
                        identifier.to_owned(),
                        ParseOutcome::failure(None, data.to_vec(), error),
                    );
                }
            }
        }
        let batch_ids: HashSet<SpecId> =
            pending.iter().map(|(_, unit, _)| unit.descriptor.id).collect();
        let mut settled: HashSet<SpecId> = HashSet::new();

        while !pending.is_empty() {
            let mut progressed = false;
            let mut deferred = Vec::new();
            for (identifier, unit, data) in pending {
                // wait for required siblings, and for optional ones that
                // are part of this batch but have not settled yet
                let ready = unit.descriptor.requires.iter().all(|r| ctx.contains(*r))
                    && unit.descriptor.optional.iter().all(|o| {
                        !batch_ids.contains(o) || ctx.contains(*o) || settled.contains(o)
                    });
                if !ready {
                    deferred.push((identifier, unit, data));
                    continue;
                }
                let outcome = validation::decode_unit(&unit, data, &ctx, self.permissive);
                if let Some(value) = outcome.value() {
                    ctx.insert(unit.descriptor.id, value.clone());
                }
                settled.insert(unit.descriptor.id);
                outcomes.insert(identifier.to_owned(), outcome);
                progressed = true;
            }
            pending = deferred;
            if !progressed {
                break;
            }
        }

        for (identifier, unit, data) in pending {
            let outcome = match unit
                .descriptor
                .requires
                .iter()
                .find(|r| !ctx.contains(**r))
            {
                Some(missing) => {
                    debug!(identifier, %missing, "dependency never became available");
                    ParseOutcome::failure(
                        Some(unit.descriptor.id),
                        data.to_vec(),
                        CodecError::MissingDependency {
                            dependent: unit.descriptor.id,
                            missing: *missing,
                        },
                    )
                }
                // only optional siblings were outstanding; decode without them
                None => validation::decode_unit(&unit, data, &ctx, self.permissive),
            };
            outcomes.insert(identifier.to_owned(), outcome);
        }
        outcomes
    }

    /// Encode a value for a characteristic.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnresolvedIdentifier`] for an unknown
    /// identifier, and the codec's own errors otherwise.
    pub fn encode(&self, identifier: &str, value: &Value) -> Result<Vec<u8>> {
        let unit = registry::resolve(identifier)?;
        unit.encode(value)
    }

    /// Resolve an identifier to its registered unit.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnresolvedIdentifier`] when nothing matches.
    pub fn descriptor(&self, identifier: &str) -> Result<Arc<Unit>> {
        registry::resolve(identifier)
    }
}
