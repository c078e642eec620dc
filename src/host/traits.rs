/*!
 * Host Traits
 * Dispatch and embedding abstractions implemented by the native host
 */

use super::dispatch::PendingOperation;
use super::types::{DispatchMetrics, HostOp, HostResult, HostValue, MemoryUsage};
use std::sync::Arc;

/// Callback drained by the host's event loop between script turns
pub type MacrotaskHook = Arc<dyn Fn() -> usize + Send + Sync>;

/// Uniform invocation contract for native operations
///
/// Every capability ultimately resolves to one named operation, invoked
/// either synchronously (immediate value, must not block on I/O) or
/// asynchronously (deferred outcome settled by the host exactly once, in
/// host-determined completion order).
pub trait HostDispatcher: Send + Sync {
    /// Invoke a blocking operation and return its value immediately
    fn call_sync(&self, op: HostOp) -> HostResult<HostValue>;

    /// Submit a deferred operation
    fn call_async(&self, op: HostOp) -> PendingOperation;
}

/// Embedding surface wired once by the bootstrap orchestrator
pub trait HostRuntime: HostDispatcher {
    /// Install the callback invoked by the host's task-draining hook
    fn set_macrotask_hook(&self, hook: MacrotaskHook);

    /// Memory usage introspection
    fn memory_usage(&self) -> MemoryUsage;

    /// Dispatch counters
    fn metrics(&self) -> DispatchMetrics;
}
