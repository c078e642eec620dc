/*!
 * Namespace Entries
 * What a capability entry may hold, and the namespace error taxonomy
 */

use super::table::CapabilityNamespace;
use crate::console::ConsoleSink;
use crate::device::DeviceBinding;
use crate::host::{DispatchMetrics, HostRuntime, MemoryUsage};
use crate::net::NetworkBinding;
use crate::timers::TimerController;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Namespace operation result
///
/// # Must Use
/// Namespace operations can fail and must be handled
#[must_use = "namespace operations can fail and must be handled"]
pub type NamespaceResult<T> = Result<T, NamespaceError>;

/// Capability namespace failures
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum NamespaceError {
    #[error("namespace is frozen, write to {0:?} rejected")]
    Frozen(String),

    #[error("entry not found: {0}")]
    NotFound(String),
}

/// Getter resolved on each access
pub type ComputedValue = Arc<dyn Fn() -> CapabilityValue + Send + Sync>;

/// What a namespace entry holds
///
/// Entries are either immutable values or handles bound to fixed native
/// operations; nothing outside the namespace is reachable from scripts.
#[derive(Clone)]
pub enum CapabilityValue {
    /// Plain text value
    Text(String),
    /// Boolean flag
    Flag(bool),
    /// Environment mapping
    Environment(HashMap<String, String>),
    /// Script logging sink
    Console(Arc<ConsoleSink>),
    /// Timer control handle
    Timers(Arc<TimerController>),
    /// Device operation handle
    Devices(Arc<DeviceBinding>),
    /// Network ability handle
    Network(Arc<NetworkBinding>),
    /// Core host handle
    Host(Arc<dyn HostRuntime>),
    /// Nested (frozen) namespace
    Scope(Arc<CapabilityNamespace>),
    /// Reference back to the enclosing scope
    SelfRef,
    /// Memory usage snapshot
    Memory(MemoryUsage),
    /// Dispatch counters snapshot
    Metrics(DispatchMetrics),
    /// Computed on each access
    Computed(ComputedValue),
}

impl CapabilityValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CapabilityValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            CapabilityValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_environment(&self) -> Option<&HashMap<String, String>> {
        match self {
            CapabilityValue::Environment(env) => Some(env),
            _ => None,
        }
    }

    pub fn as_console(&self) -> Option<&Arc<ConsoleSink>> {
        match self {
            CapabilityValue::Console(console) => Some(console),
            _ => None,
        }
    }

    pub fn as_timers(&self) -> Option<&Arc<TimerController>> {
        match self {
            CapabilityValue::Timers(timers) => Some(timers),
            _ => None,
        }
    }

    pub fn as_devices(&self) -> Option<&Arc<DeviceBinding>> {
        match self {
            CapabilityValue::Devices(devices) => Some(devices),
            _ => None,
        }
    }

    pub fn as_network(&self) -> Option<&Arc<NetworkBinding>> {
        match self {
            CapabilityValue::Network(network) => Some(network),
            _ => None,
        }
    }

    pub fn as_scope(&self) -> Option<&Arc<CapabilityNamespace>> {
        match self {
            CapabilityValue::Scope(scope) => Some(scope),
            _ => None,
        }
    }

    pub fn as_memory(&self) -> Option<MemoryUsage> {
        match self {
            CapabilityValue::Memory(usage) => Some(*usage),
            _ => None,
        }
    }

    pub fn as_metrics(&self) -> Option<DispatchMetrics> {
        match self {
            CapabilityValue::Metrics(metrics) => Some(*metrics),
            _ => None,
        }
    }
}

impl fmt::Debug for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            CapabilityValue::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            CapabilityValue::Environment(env) => f.debug_tuple("Environment").field(env).finish(),
            CapabilityValue::Console(_) => f.write_str("Console"),
            CapabilityValue::Timers(_) => f.write_str("Timers"),
            CapabilityValue::Devices(_) => f.write_str("Devices"),
            CapabilityValue::Network(_) => f.write_str("Network"),
            CapabilityValue::Host(_) => f.write_str("Host"),
            CapabilityValue::Scope(_) => f.write_str("Scope"),
            CapabilityValue::SelfRef => f.write_str("SelfRef"),
            CapabilityValue::Memory(usage) => f.debug_tuple("Memory").field(usage).finish(),
            CapabilityValue::Metrics(metrics) => f.debug_tuple("Metrics").field(metrics).finish(),
            CapabilityValue::Computed(_) => f.write_str("Computed"),
        }
    }
}
