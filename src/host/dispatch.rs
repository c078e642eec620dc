/*!
 * Dispatch Contract
 * Classification between blocking and deferred invocation paths
 */

use super::traits::HostDispatcher;
use super::types::{HostOp, HostResult, HostValue};
use crate::core::resolvable::Resolvable;
use tracing::debug;

/// An in-flight asynchronous host call
///
/// Owned by the calling context until resolved or rejected; at most one
/// outcome is ever delivered.
pub type PendingOperation = Resolvable<HostValue>;

/// Suspension behavior of a host operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Returns a value immediately; must never perform network I/O
    Sync,
    /// Suspends the calling script flow until the host settles the outcome
    Async,
}

impl HostOp {
    /// Classify this operation's dispatch path
    pub fn mode(&self) -> OpMode {
        match self {
            HostOp::ListReadableDevices
            | HostOp::ListWritableDevices
            | HostOp::GetDeviceStatus { .. }
            | HostOp::UpdateDeviceDesired(_) => OpMode::Sync,
            HostOp::CommitDevice { .. } | HostOp::HttpGet { .. } | HostOp::HttpPost { .. } => {
                OpMode::Async
            }
        }
    }
}

/// Invoke a blocking operation on the host
pub(crate) fn invoke_sync(host: &dyn HostDispatcher, op: HostOp) -> HostResult<HostValue> {
    debug_assert_eq!(op.mode(), OpMode::Sync);
    debug!(op = op.name(), "sync host dispatch");
    host.call_sync(op)
}

/// Submit a deferred operation to the host
pub(crate) fn invoke_async(host: &dyn HostDispatcher, op: HostOp) -> PendingOperation {
    debug_assert_eq!(op.mode(), OpMode::Async);
    debug!(op = op.name(), "async host dispatch");
    host.call_async(op)
}
