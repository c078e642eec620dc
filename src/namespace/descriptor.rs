/*!
 * Descriptor Utilities
 * Property descriptors with explicit mutability/visibility semantics
 */

use super::entry::{CapabilityValue, ComputedValue};
use serde::{Deserialize, Serialize};

/// Mutability/visibility policy attached to a namespace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyPolicy {
    /// Enumerable, not writable; trusted constants
    ReadOnly,
    /// Enumerable, writable; host-bindable entries legitimate code may override
    Writable,
    /// Writable, hidden from enumeration; internal objects that should not
    /// leak via reflection
    NonEnumerable,
    /// Enumerable, computed on each access
    GetterOnly,
}

impl PropertyPolicy {
    pub fn is_writable(&self) -> bool {
        matches!(self, PropertyPolicy::Writable | PropertyPolicy::NonEnumerable)
    }

    pub fn is_enumerable(&self) -> bool {
        !matches!(self, PropertyPolicy::NonEnumerable)
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, PropertyPolicy::GetterOnly)
    }
}

/// A value paired with the policy its semantic role implies
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub policy: PropertyPolicy,
    pub value: CapabilityValue,
}

/// Descriptor for a host-bindable entry that legitimate code may override
pub fn writable(value: CapabilityValue) -> PropertyDescriptor {
    PropertyDescriptor {
        policy: PropertyPolicy::Writable,
        value,
    }
}

/// Descriptor hidden from enumeration
pub fn non_enumerable(value: CapabilityValue) -> PropertyDescriptor {
    PropertyDescriptor {
        policy: PropertyPolicy::NonEnumerable,
        value,
    }
}

/// Descriptor for trusted constants
pub fn read_only(value: CapabilityValue) -> PropertyDescriptor {
    PropertyDescriptor {
        policy: PropertyPolicy::ReadOnly,
        value,
    }
}

/// Descriptor computed on each access
pub fn getter_only(getter: ComputedValue) -> PropertyDescriptor {
    PropertyDescriptor {
        policy: PropertyPolicy::GetterOnly,
        value: CapabilityValue::Computed(getter),
    }
}
