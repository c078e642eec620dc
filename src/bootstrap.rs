/*!
 * Bootstrap Orchestrator
 * One-time assembly and publication of the script-visible capability surface
 */

use crate::console::ConsoleSink;
use crate::core::errors::AssertionError;
use crate::device::DeviceBinding;
use crate::host::HostRuntime;
use crate::namespace::{
    getter_only, non_enumerable, read_only, writable, CapabilityNamespace, CapabilityValue,
    NamespaceBuilder,
};
use crate::net::NetworkBinding;
use crate::timers::TimerController;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Bootstrap result
///
/// # Must Use
/// Bootstrap failures are fatal and must be handled
#[must_use = "bootstrap failures are fatal and must be handled"]
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Fatal initialization failures
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum BootstrapError {
    #[error("worker runtime already bootstrapped")]
    AlreadyBootstrapped,

    #[error("bootstrap invariant violated: {0}")]
    Invariant(String),
}

impl From<AssertionError> for BootstrapError {
    fn from(err: AssertionError) -> Self {
        BootstrapError::Invariant(err.message)
    }
}

/// Options supplied once at bootstrap; immutable afterward
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RuntimeOptions {
    pub env: HashMap<String, String>,
    pub no_color: bool,
}

/// Read-only handles published by a successful bootstrap
#[derive(Clone, Debug)]
pub struct BootstrapHandles {
    /// Baseline execution scope (console, self-reference, timer control)
    pub scope: Arc<CapabilityNamespace>,
    /// Frozen runtime capability namespace
    pub capabilities: Arc<CapabilityNamespace>,
    /// Parallel device-capability handle
    pub devices: Arc<DeviceBinding>,
    pub network: Arc<NetworkBinding>,
    pub timers: Arc<TimerController>,
    pub console: Arc<ConsoleSink>,
}

/// Scope and namespace entry names
pub mod keys {
    pub const CONSOLE: &str = "console";
    pub const WINDOW: &str = "window";
    pub const SELF: &str = "self";
    pub const TIMERS: &str = "timers";
    pub const RUNTIME: &str = "runtime";
    pub const DEVICES: &str = "devices";

    pub const HOST: &str = "host";
    pub const MEMORY_USAGE: &str = "memoryUsage";
    pub const METRICS: &str = "metrics";
    pub const NETWORK: &str = "network";
    pub const ENV: &str = "env";
    pub const NO_COLOR: &str = "noColor";
}

static BOOTSTRAPPED: AtomicBool = AtomicBool::new(false);
static PUBLISHED: OnceLock<BootstrapHandles> = OnceLock::new();

/// Assemble, freeze, and publish the capability surface
///
/// Valid exactly once per process; a second call is a programming-error
/// level fault. On success the namespace and the parallel device handle
/// become reachable through [`global_scope`], [`capabilities`], and
/// [`device_handle`]; no staging state survives, so initialization cannot be
/// re-entered or introspected afterwards.
pub fn bootstrap(
    options: RuntimeOptions,
    host: Arc<dyn HostRuntime>,
) -> BootstrapResult<BootstrapHandles> {
    // Check-then-set is sound: script code runs on one logical thread.
    if BOOTSTRAPPED.swap(true, Ordering::SeqCst) {
        return Err(BootstrapError::AlreadyBootstrapped);
    }

    let console = Arc::new(ConsoleSink::new(options.no_color));
    let timers = Arc::new(TimerController::new());
    let devices = Arc::new(DeviceBinding::new(host.clone()));
    let network = Arc::new(NetworkBinding::new(host.clone()));

    // Timer callbacks run from the host's event loop, not from script flow.
    let drain = Arc::clone(&timers);
    host.set_macrotask_hook(Arc::new(move || drain.handle_timer_macrotask()));

    let capabilities = Arc::new(runtime_namespace(&options, host, network.clone())?);
    capabilities.freeze();

    let scope = Arc::new(baseline_scope(
        console.clone(),
        timers.clone(),
        capabilities.clone(),
        devices.clone(),
    )?);

    let handles = BootstrapHandles {
        scope,
        capabilities,
        devices,
        network,
        timers,
        console,
    };
    // The gate above guarantees a single writer.
    let _ = PUBLISHED.set(handles.clone());
    info!("Worker runtime bootstrapped");
    Ok(handles)
}

/// The published global scope, once the runtime has bootstrapped
pub fn global_scope() -> Option<Arc<CapabilityNamespace>> {
    PUBLISHED.get().map(|handles| handles.scope.clone())
}

/// The frozen runtime capability namespace
pub fn capabilities() -> Option<Arc<CapabilityNamespace>> {
    PUBLISHED.get().map(|handles| handles.capabilities.clone())
}

/// The parallel device-capability handle
pub fn device_handle() -> Option<Arc<DeviceBinding>> {
    PUBLISHED.get().map(|handles| handles.devices.clone())
}

fn baseline_scope(
    console: Arc<ConsoleSink>,
    timers: Arc<TimerController>,
    capabilities: Arc<CapabilityNamespace>,
    devices: Arc<DeviceBinding>,
) -> Result<CapabilityNamespace, AssertionError> {
    Ok(NamespaceBuilder::new()
        .define(keys::CONSOLE, non_enumerable(CapabilityValue::Console(console)))?
        .define(keys::WINDOW, read_only(CapabilityValue::SelfRef))?
        .define(keys::SELF, writable(CapabilityValue::SelfRef))?
        .define(keys::TIMERS, writable(CapabilityValue::Timers(timers)))?
        .define(keys::RUNTIME, read_only(CapabilityValue::Scope(capabilities)))?
        .define(keys::DEVICES, read_only(CapabilityValue::Devices(devices)))?
        .build())
}

fn runtime_namespace(
    options: &RuntimeOptions,
    host: Arc<dyn HostRuntime>,
    network: Arc<NetworkBinding>,
) -> Result<CapabilityNamespace, AssertionError> {
    let memory_host = host.clone();
    let metrics_host = host.clone();
    Ok(NamespaceBuilder::new()
        .define(keys::HOST, non_enumerable(CapabilityValue::Host(host)))?
        .define(
            keys::MEMORY_USAGE,
            getter_only(Arc::new(move || {
                CapabilityValue::Memory(memory_host.memory_usage())
            })),
        )?
        .define(
            keys::METRICS,
            getter_only(Arc::new(move || {
                CapabilityValue::Metrics(metrics_host.metrics())
            })),
        )?
        .define(keys::NETWORK, read_only(CapabilityValue::Network(network)))?
        .define(
            keys::ENV,
            read_only(CapabilityValue::Environment(options.env.clone())),
        )?
        .define(keys::NO_COLOR, read_only(CapabilityValue::Flag(options.no_color)))?
        .build())
}
