/*!
 * Capability Namespace
 * Ordered entry table with policy-enforced access and one-way freezing
 */

use super::descriptor::{PropertyDescriptor, PropertyPolicy};
use super::entry::{CapabilityValue, NamespaceError, NamespaceResult};
use crate::core::errors::{assert_invariant, AssertionError};
use log::warn;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// The single object exposed to scripts: capability name -> bound entry
///
/// Once frozen, no entry may be added, removed, or reassigned.
pub struct CapabilityNamespace {
    entries: RwLock<HashMap<String, PropertyDescriptor>>,
    // Definition order; fixed at build time.
    order: Vec<String>,
    frozen: AtomicBool,
}

impl std::fmt::Debug for CapabilityNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityNamespace")
            .field("order", &self.order)
            .field("frozen", &self.frozen.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Staged construction of a [`CapabilityNamespace`]
#[derive(Default, Debug)]
pub struct NamespaceBuilder {
    entries: HashMap<String, PropertyDescriptor>,
    order: Vec<String>,
}

impl NamespaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define an entry; duplicate names violate an internal invariant
    pub fn define(
        mut self,
        name: impl Into<String>,
        descriptor: PropertyDescriptor,
    ) -> Result<Self, AssertionError> {
        let name = name.into();
        assert_invariant(
            !self.entries.contains_key(&name),
            &format!("duplicate namespace entry: {name}"),
        )?;
        self.order.push(name.clone());
        self.entries.insert(name, descriptor);
        Ok(self)
    }

    pub fn build(self) -> CapabilityNamespace {
        CapabilityNamespace {
            entries: RwLock::new(self.entries),
            order: self.order,
            frozen: AtomicBool::new(false),
        }
    }
}

impl CapabilityNamespace {
    /// Resolve an entry, evaluating getter-only entries on each access
    pub fn get(&self, name: &str) -> Option<CapabilityValue> {
        let entries = self.entries.read();
        let descriptor = entries.get(name)?;
        match &descriptor.value {
            CapabilityValue::Computed(getter) => Some(getter()),
            value => Some(value.clone()),
        }
    }

    /// Policy flags of an entry
    pub fn policy(&self, name: &str) -> Option<PropertyPolicy> {
        self.entries.read().get(name).map(|d| d.policy)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Reassign a writable entry
    ///
    /// A write to a non-writable entry is ignored and reported as `false`;
    /// a frozen namespace rejects every write.
    pub fn set(&self, name: &str, value: CapabilityValue) -> NamespaceResult<bool> {
        if self.is_frozen() {
            warn!("Write to frozen namespace entry {:?} rejected", name);
            return Err(NamespaceError::Frozen(name.to_string()));
        }
        let mut entries = self.entries.write();
        let descriptor = entries
            .get_mut(name)
            .ok_or_else(|| NamespaceError::NotFound(name.to_string()))?;
        if !descriptor.policy.is_writable() {
            warn!("Write to non-writable entry {:?} ignored", name);
            return Ok(false);
        }
        descriptor.value = value;
        Ok(true)
    }

    /// Enumerable entry names, in definition order
    pub fn names(&self) -> Vec<String> {
        let entries = self.entries.read();
        self.order
            .iter()
            .filter(|name| {
                entries
                    .get(*name)
                    .map(|d| d.policy.is_enumerable())
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    /// One-way freeze: no entry may be added, removed, or reassigned after
    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }
}
