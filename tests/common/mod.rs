/*!
 * Test Support
 * In-memory host runtime backing the integration tests
 */

#![allow(dead_code)]

use edge_script_host::{
    DispatchMetrics, HostDispatcher, HostError, HostOp, HostResult, HostRuntime, HostValue,
    MacrotaskHook, MemoryUsage, PendingOperation, QosHint, Resolvable,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// One flushed commit as observed by the mock controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub device: String,
    pub desired: HashMap<String, String>,
    pub qos: Option<QosHint>,
}

#[derive(Default)]
struct MockState {
    readable: Vec<(String, HashMap<String, String>)>,
    // Writable device name -> staged desired values, owned host-side.
    writable: Vec<(String, HashMap<String, String>)>,
    commits: Vec<CommitRecord>,
    http_responses: HashMap<String, Result<String, String>>,
    commit_failure: Option<String>,
    hook: Option<MacrotaskHook>,
    sync_calls: u64,
    async_calls: u64,
    failed_calls: u64,
}

impl MockState {
    fn writable_buffer(&mut self, device: &str) -> Option<&mut HashMap<String, String>> {
        self.writable
            .iter_mut()
            .find(|(name, _)| name == device)
            .map(|(_, buffer)| buffer)
    }
}

/// In-memory host: device registry, desired-value buffers, scripted HTTP
#[derive(Default)]
pub struct MockHost {
    state: Mutex<MockState>,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_readable_device(&self, name: &str, status: &[(&str, &str)]) {
        let status = status
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.state.lock().readable.push((name.to_string(), status));
    }

    pub fn add_writable_device(&self, name: &str) {
        self.state
            .lock()
            .writable
            .push((name.to_string(), HashMap::new()));
    }

    pub fn stage_http_response(&self, url: &str, response: Result<&str, &str>) {
        self.state.lock().http_responses.insert(
            url.to_string(),
            response.map(str::to_string).map_err(str::to_string),
        );
    }

    pub fn fail_next_commit(&self, reason: &str) {
        self.state.lock().commit_failure = Some(reason.to_string());
    }

    /// Commits flushed so far, oldest first
    pub fn commits(&self) -> Vec<CommitRecord> {
        self.state.lock().commits.clone()
    }

    /// Desired values currently staged for `device`
    pub fn staged(&self, device: &str) -> HashMap<String, String> {
        self.state
            .lock()
            .writable_buffer(device)
            .cloned()
            .unwrap_or_default()
    }

    /// Run the installed macrotask hook, as the host event loop would
    pub fn drain_macrotasks(&self) -> usize {
        let hook = self.state.lock().hook.clone();
        hook.map(|hook| hook()).unwrap_or(0)
    }

    pub fn has_macrotask_hook(&self) -> bool {
        self.state.lock().hook.is_some()
    }

    /// Clear interactions between tests, keeping devices and the hook
    pub fn reset_interactions(&self) {
        let mut state = self.state.lock();
        state.commits.clear();
        state.http_responses.clear();
        state.commit_failure = None;
        for (_, buffer) in &mut state.writable {
            buffer.clear();
        }
    }
}

impl HostDispatcher for MockHost {
    fn call_sync(&self, op: HostOp) -> HostResult<HostValue> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.sync_calls += 1;
        let result = match op {
            HostOp::ListReadableDevices => Ok(HostValue::Names(
                state.readable.iter().map(|(name, _)| name.clone()).collect(),
            )),
            HostOp::ListWritableDevices => Ok(HostValue::Names(
                state.writable.iter().map(|(name, _)| name.clone()).collect(),
            )),
            HostOp::GetDeviceStatus { device, property } => {
                match state.readable.iter().find(|(name, _)| *name == device) {
                    Some((_, status)) => Ok(status
                        .get(&property)
                        .map(|value| HostValue::Text(value.clone()))
                        .unwrap_or(HostValue::Unit)),
                    None => Err(HostError::UnknownTarget(device)),
                }
            }
            HostOp::UpdateDeviceDesired(descriptor) => {
                match state.writable_buffer(&descriptor.name) {
                    Some(buffer) => {
                        buffer.insert(descriptor.property, descriptor.value);
                        Ok(HostValue::Unit)
                    }
                    None => Err(HostError::UnknownTarget(descriptor.name)),
                }
            }
            other => Err(HostError::OperationFailed(format!(
                "{} is not a synchronous operation",
                other.name()
            ))),
        };
        if result.is_err() {
            state.failed_calls += 1;
        }
        result
    }

    fn call_async(&self, op: HostOp) -> PendingOperation {
        let (pending, handle) = Resolvable::new();
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.async_calls += 1;
        match op {
            HostOp::CommitDevice { device, qos } => {
                if let Some(reason) = state.commit_failure.take() {
                    state.failed_calls += 1;
                    handle.reject(HostError::OperationFailed(reason));
                } else if let Some(entry) =
                    state.writable.iter_mut().find(|entry| entry.0 == device)
                {
                    let desired = std::mem::take(&mut entry.1);
                    state.commits.push(CommitRecord {
                        device,
                        desired,
                        qos,
                    });
                    handle.resolve(HostValue::Unit);
                } else {
                    state.failed_calls += 1;
                    handle.reject(HostError::UnknownTarget(device));
                }
            }
            HostOp::HttpGet { url, .. } | HostOp::HttpPost { url, .. } => {
                match state.http_responses.get(&url) {
                    Some(Ok(body)) => {
                        handle.resolve(HostValue::Text(body.clone()));
                    }
                    Some(Err(reason)) => {
                        state.failed_calls += 1;
                        handle.reject(HostError::OperationFailed(reason.clone()));
                    }
                    None => {
                        state.failed_calls += 1;
                        handle.reject(HostError::OperationFailed(format!("no route to {url}")));
                    }
                }
            }
            other => {
                state.failed_calls += 1;
                handle.reject(HostError::OperationFailed(format!(
                    "{} is not an asynchronous operation",
                    other.name()
                )));
            }
        }
        pending
    }
}

impl HostRuntime for MockHost {
    fn set_macrotask_hook(&self, hook: MacrotaskHook) {
        self.state.lock().hook = Some(hook);
    }

    fn memory_usage(&self) -> MemoryUsage {
        MemoryUsage {
            heap_used_bytes: 4096,
            heap_total_bytes: 65536,
            external_bytes: 0,
        }
    }

    fn metrics(&self) -> DispatchMetrics {
        let state = self.state.lock();
        DispatchMetrics {
            ops_dispatched_sync: state.sync_calls,
            ops_dispatched_async: state.async_calls,
            ops_completed: state.sync_calls + state.async_calls - state.failed_calls,
            ops_failed: state.failed_calls,
        }
    }
}
