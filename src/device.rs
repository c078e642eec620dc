/*!
 * Device Operation Binding
 * Script-facing device reads and two-phase desired-state writes
 */

use crate::host::dispatch::{invoke_async, invoke_sync};
use crate::host::{DeviceDescriptor, HostDispatcher, HostOp, HostResult, QosHint};
use std::sync::Arc;
use tracing::debug;

/// Device operations exposed to scripts
///
/// Reads and desired-value staging are synchronous; committing staged values
/// to the physical device is asynchronous. Desired-value buffers are owned
/// and serialized by the host; this binding never holds device state.
#[derive(Clone)]
pub struct DeviceBinding {
    host: Arc<dyn HostDispatcher>,
}

impl std::fmt::Debug for DeviceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBinding").finish_non_exhaustive()
    }
}

impl DeviceBinding {
    pub fn new(host: Arc<dyn HostDispatcher>) -> Self {
        Self { host }
    }

    /// Device names readable by this script context
    pub fn list_readable_devices(&self) -> HostResult<Vec<String>> {
        let op = HostOp::ListReadableDevices;
        invoke_sync(self.host.as_ref(), op.clone())?.into_names(&op)
    }

    /// Device names writable by this script context
    pub fn list_writable_devices(&self) -> HostResult<Vec<String>> {
        let op = HostOp::ListWritableDevices;
        invoke_sync(self.host.as_ref(), op.clone())?.into_names(&op)
    }

    /// Current value of `property` on `device`
    ///
    /// `None` when the host has no value for the requested target; device and
    /// property names are never pre-validated here.
    pub fn get_device_status(&self, device: &str, property: &str) -> HostResult<Option<String>> {
        let op = HostOp::GetDeviceStatus {
            device: device.to_string(),
            property: property.to_string(),
        };
        let value = invoke_sync(self.host.as_ref(), op.clone())?.into_optional_text(&op)?;
        debug!(device, property, value = ?value, "device status");
        Ok(value)
    }

    /// Stage a desired-value change at the host without touching the device
    ///
    /// Phase 1 of the two-phase write: returns as soon as the host has
    /// buffered the change. The latest staged value for a property wins when
    /// the buffer is flushed.
    pub fn set_device_status(&self, device: &str, property: &str, value: &str) -> HostResult<()> {
        let op = HostOp::UpdateDeviceDesired(DeviceDescriptor {
            name: device.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        });
        invoke_sync(self.host.as_ref(), op.clone())?.into_unit(&op)
    }

    /// Flush every staged desired value for `device` to the physical device
    ///
    /// Phase 2 of the two-phase write; suspends the calling flow until the
    /// host acknowledges or rejects the flush. A failed commit leaves staged
    /// values buffered at the host; retrying or abandoning is the caller's
    /// decision.
    pub async fn commit_device(&self, device: &str, qos: Option<QosHint>) -> HostResult<()> {
        let op = HostOp::CommitDevice {
            device: device.to_string(),
            qos,
        };
        invoke_async(self.host.as_ref(), op.clone()).await?.into_unit(&op)
    }
}
