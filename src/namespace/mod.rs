/*!
 * Namespace Module
 * Capability namespace assembly with per-entry mutability policies
 */

pub mod descriptor;
pub mod entry;
pub mod table;

pub use descriptor::{
    getter_only, non_enumerable, read_only, writable, PropertyDescriptor, PropertyPolicy,
};
pub use entry::{CapabilityValue, ComputedValue, NamespaceError, NamespaceResult};
pub use table::{CapabilityNamespace, NamespaceBuilder};
