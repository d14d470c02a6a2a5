//! The characteristic registry.
//!
//! The canonical table is built once, on first use, and is immutable and
//! lock-free afterwards. Vendor characteristics live in a separate
//! overlay behind a `RwLock`; a custom entry can either extend the table
//! or, when registered as a shadow, take precedence over the canonical
//! entry with the same identifier.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, OnceLock, RwLock, RwLockReadGuard};

use tracing::debug;

use btsig_types::{CodecError, Result, SpecId};

use crate::characteristics;
use crate::unit::Unit;

struct Tables {
    units: HashMap<SpecId, Arc<Unit>>,
    names: HashMap<String, SpecId>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        let mut units = HashMap::new();
        let mut names = HashMap::new();
        for unit in characteristics::builtin() {
            let id = unit.descriptor.id;
            for alias in unit.descriptor.aliases() {
                names.insert(alias, id);
            }
            units.insert(id, Arc::new(unit));
        }
        debug!(count = units.len(), "canonical characteristic table built");
        Tables { units, names }
    })
}

struct CustomEntry {
    unit: Arc<Unit>,
    shadow: bool,
}

#[derive(Default)]
struct Overlay {
    units: HashMap<SpecId, CustomEntry>,
    names: HashMap<String, SpecId>,
}

static OVERLAY: LazyLock<RwLock<Overlay>> = LazyLock::new(|| RwLock::new(Overlay::default()));

fn overlay_read() -> RwLockReadGuard<'static, Overlay> {
    OVERLAY.read().unwrap_or_else(|e| e.into_inner())
}

/// Register a custom characteristic.
///
/// With `shadow` set the entry takes precedence over a canonical entry
/// with the same identifier; otherwise the canonical entry wins and the
/// custom one only fills gaps.
pub fn register_custom(unit: Unit, shadow: bool) {
    let id = unit.descriptor.id;
    let aliases = unit.descriptor.aliases();
    debug!(%id, name = %unit.descriptor.name, shadow, "registering custom characteristic");
    let mut overlay = OVERLAY.write().unwrap_or_else(|e| e.into_inner());
    for alias in aliases {
        overlay.names.insert(alias, id);
    }
    overlay.units.insert(
        id,
        CustomEntry {
            unit: Arc::new(unit),
            shadow,
        },
    );
}

/// Remove every custom characteristic, restoring the canonical table.
pub fn clear_custom() {
    let mut overlay = OVERLAY.write().unwrap_or_else(|e| e.into_inner());
    overlay.units.clear();
    overlay.names.clear();
}

/// Look up a unit by identifier.
#[must_use]
pub fn lookup(id: SpecId) -> Option<Arc<Unit>> {
    {
        let overlay = overlay_read();
        if let Some(entry) = overlay.units.get(&id) {
            if entry.shadow {
                return Some(Arc::clone(&entry.unit));
            }
        }
    }
    if let Some(unit) = tables().units.get(&id) {
        return Some(Arc::clone(unit));
    }
    let overlay = overlay_read();
    overlay.units.get(&id).map(|e| Arc::clone(&e.unit))
}

/// Look up an identifier by one of its name aliases (already lowercased).
fn lookup_name(key: &str) -> Option<SpecId> {
    {
        let overlay = overlay_read();
        if let Some(id) = overlay.names.get(key) {
            if overlay.units.get(id).is_some_and(|e| e.shadow) {
                return Some(*id);
            }
        }
    }
    if let Some(id) = tables().names.get(key) {
        return Some(*id);
    }
    overlay_read().names.get(key).copied()
}

/// Resolve an identifier string to a unit.
///
/// Accepts every [`SpecId::parse`] spelling as well as display names
/// (case-insensitively), their snake_case forms, and
/// `org.bluetooth.characteristic.*` ids.
///
/// # Errors
///
/// Returns [`CodecError::UnresolvedIdentifier`] when nothing matches.
pub fn resolve(identifier: &str) -> Result<Arc<Unit>> {
    if let Some(id) = SpecId::parse(identifier) {
        return lookup(id).ok_or_else(|| CodecError::UnresolvedIdentifier(identifier.to_owned()));
    }
    let key = identifier.trim().to_lowercase();
    lookup_name(&key)
        .and_then(lookup)
        .ok_or_else(|| CodecError::UnresolvedIdentifier(identifier.to_owned()))
}
