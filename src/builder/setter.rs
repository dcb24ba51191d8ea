use smol_str::SmolStr;
use std::cell::RefCell;
use tracing::trace;

use super::Builder;
use crate::types::SETTER_PREFIX;
use crate::value::{FastMap, RecordValue};

/// Field a property name sets, if the name is setter-shaped.
///
/// A name is a setter when it starts with `set`, is longer than the prefix,
/// and the character right after the prefix is its own uppercase form. That
/// admits caseless characters too, so `set_id` targets `_id` and `set2fa`
/// targets `2fa`, while `settings` stays a plain field. The target is that
/// character lowercased followed by the rest of the name unchanged.
pub fn setter_target(name: &str) -> Option<SmolStr> {
    let rest = name.strip_prefix(SETTER_PREFIX)?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.to_uppercase().eq(std::iter::once(first)) {
        return None;
    }
    let mut field = String::with_capacity(rest.len());
    field.extend(first.to_lowercase());
    field.push_str(chars.as_str());
    Some(SmolStr::from(field))
}

/// Setter name that targets `field`.
///
/// `None` when no setter-shaped name maps back onto `field`, e.g. for `""`
/// or `"Name"` (a setter always lowercases its first letter).
pub fn setter_name(field: &str) -> Option<SmolStr> {
    let mut chars = field.chars();
    let first = chars.next()?;
    let mut name = String::with_capacity(SETTER_PREFIX.len() + field.len());
    name.push_str(SETTER_PREFIX);
    name.extend(first.to_uppercase());
    name.push_str(chars.as_str());
    match setter_target(&name) {
        Some(target) if target == field => Some(SmolStr::from(name)),
        _ => None,
    }
}

// ─── Setter ─────────────────────────────────────────────────────────────────

/// A synthesized setter, bound to the field it writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Setter {
    target: SmolStr,
}

impl Setter {
    /// Field this setter writes.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Write `value` into the builder's target field and hand the same
    /// builder back for chaining.
    pub fn call<'b>(&self, builder: &'b mut Builder, value: impl Into<RecordValue>) -> &'b mut Builder {
        builder.set(self.target.clone(), value);
        builder
    }
}

// ─── SetterTable ────────────────────────────────────────────────────────────

/// Lazily populated property-name → setter dispatch table.
///
/// Entries are added the first time a setter is invoked and are kept in
/// invocation order; lookups through [`SetterTable::peek`] read the table
/// without growing it. The table is unbounded and lives as long as its
/// builder; cloning a builder clones its table.
#[derive(Debug, Clone, Default)]
pub(crate) struct SetterTable {
    entries: RefCell<FastMap<SmolStr, Setter>>,
}

impl SetterTable {
    /// Resolve `name` without caching it.
    pub(crate) fn peek(&self, name: &str) -> Option<Setter> {
        if let Some(hit) = self.entries.borrow().get(name) {
            return Some(hit.clone());
        }
        setter_target(name).map(|target| Setter { target })
    }

    /// Resolve `name`, caching the setter on first use.
    pub(crate) fn resolve(&self, name: &str) -> Option<Setter> {
        if let Some(hit) = self.entries.borrow().get(name) {
            trace!(name, target = hit.target(), "setter cache hit");
            return Some(hit.clone());
        }
        let setter = Setter {
            target: setter_target(name)?,
        };
        trace!(name, target = setter.target(), "synthesized setter");
        self.entries
            .borrow_mut()
            .insert(SmolStr::new(name), setter.clone());
        Some(setter)
    }

    /// Snapshot of `(setter name, target field)` pairs.
    pub(crate) fn snapshot(&self) -> Vec<(SmolStr, SmolStr)> {
        self.entries
            .borrow()
            .iter()
            .map(|(name, setter)| (name.clone(), setter.target.clone()))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
