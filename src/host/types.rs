/*!
 * Host Operation Types
 * Defines the operation enum, result payloads, and the host error taxonomy
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host operation result
///
/// # Must Use
/// Host operations can fail and must be handled
#[must_use = "host operations can fail and must be handled"]
pub type HostResult<T> = Result<T, HostError>;

/// Failures surfaced by native host operations
///
/// Propagated unchanged to the calling script; this layer performs no retry,
/// no suppression, and no default substitution.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum HostError {
    #[error("host operation failed: {0}")]
    OperationFailed(String),

    #[error("unknown device or property: {0}")]
    UnknownTarget(String),

    #[error("operation canceled: {0}")]
    Canceled(String),

    #[error("unexpected host value for {op}: expected {expected}")]
    UnexpectedValue { op: String, expected: String },
}

/// Desired-value change for a single device property
///
/// Constructed per mutation call; ownership passes to the host at commit time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub name: String,
    pub property: String,
    pub value: String,
}

/// Quality-of-service hint for a device commit
///
/// Semantics are owned by the host; the hint is passed through unmodified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum QosHint {
    AtMostOnce = 0,
    AtLeastOnce = 1,
    ExactlyOnce = 2,
}

/// Native operations reachable from script capabilities
///
/// Serialized names are the wire contract with the host; argument order is
/// preserved by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", tag = "op", content = "args")]
pub enum HostOp {
    ListReadableDevices,
    ListWritableDevices,
    GetDeviceStatus {
        device: String,
        property: String,
    },
    UpdateDeviceDesired(DeviceDescriptor),
    CommitDevice {
        device: String,
        qos: Option<QosHint>,
    },
    HttpGet {
        url: String,
        body: String,
    },
    HttpPost {
        url: String,
        body: String,
    },
}

impl HostOp {
    /// Wire name of this operation
    pub fn name(&self) -> &'static str {
        match self {
            HostOp::ListReadableDevices => "list-readable-devices",
            HostOp::ListWritableDevices => "list-writable-devices",
            HostOp::GetDeviceStatus { .. } => "get-device-status",
            HostOp::UpdateDeviceDesired(_) => "update-device-desired",
            HostOp::CommitDevice { .. } => "commit-device",
            HostOp::HttpGet { .. } => "http-get",
            HostOp::HttpPost { .. } => "http-post",
        }
    }
}

/// Value returned by a host operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum HostValue {
    Unit,
    Text(String),
    Names(Vec<String>),
}

impl HostValue {
    pub fn into_unit(self, op: &HostOp) -> HostResult<()> {
        match self {
            HostValue::Unit => Ok(()),
            other => Err(other.unexpected(op, "unit")),
        }
    }

    pub fn into_text(self, op: &HostOp) -> HostResult<String> {
        match self {
            HostValue::Text(text) => Ok(text),
            other => Err(other.unexpected(op, "text")),
        }
    }

    /// `None` when the host reports no value for the requested target
    pub fn into_optional_text(self, op: &HostOp) -> HostResult<Option<String>> {
        match self {
            HostValue::Unit => Ok(None),
            HostValue::Text(text) => Ok(Some(text)),
            other => Err(other.unexpected(op, "text")),
        }
    }

    pub fn into_names(self, op: &HostOp) -> HostResult<Vec<String>> {
        match self {
            HostValue::Names(names) => Ok(names),
            other => Err(other.unexpected(op, "names")),
        }
    }

    fn unexpected(&self, op: &HostOp, expected: &str) -> HostError {
        HostError::UnexpectedValue {
            op: op.name().to_string(),
            expected: expected.to_string(),
        }
    }
}

/// Memory usage snapshot reported by the host
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct MemoryUsage {
    pub heap_used_bytes: usize,
    pub heap_total_bytes: usize,
    pub external_bytes: usize,
}

/// Dispatch counters reported by the host
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DispatchMetrics {
    pub ops_dispatched_sync: u64,
    pub ops_dispatched_async: u64,
    pub ops_completed: u64,
    pub ops_failed: u64,
}
