/*!
 * Edge Script Host
 * Bootstrap and capability layer of the embedded automation-script runtime
 */

pub mod bootstrap;
pub mod console;
pub mod core;
pub mod device;
pub mod host;
pub mod namespace;
pub mod net;
pub mod timers;

// Re-exports
pub use crate::bootstrap::{
    bootstrap, BootstrapError, BootstrapHandles, BootstrapResult, RuntimeOptions,
};
pub use crate::console::ConsoleSink;
pub use crate::core::errors::{assert_invariant, AssertionError};
pub use crate::core::resolvable::{Resolvable, SettleHandle};
pub use crate::device::DeviceBinding;
pub use crate::host::{
    DeviceDescriptor, DispatchMetrics, HostDispatcher, HostError, HostOp, HostResult, HostRuntime,
    HostValue, MacrotaskHook, MemoryUsage, OpMode, PendingOperation, QosHint,
};
pub use crate::namespace::{
    getter_only, non_enumerable, read_only, writable, CapabilityNamespace, CapabilityValue,
    NamespaceBuilder, NamespaceError, NamespaceResult, PropertyDescriptor, PropertyPolicy,
};
pub use crate::net::NetworkBinding;
pub use crate::timers::{TimerCallback, TimerController, TimerId};
