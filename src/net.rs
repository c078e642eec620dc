/*!
 * Network Ability Binding
 * Capability-gated outbound HTTP conduit
 */

use crate::host::dispatch::invoke_async;
use crate::host::{HostDispatcher, HostOp, HostResult};
use std::sync::Arc;

/// Outbound HTTP operations exposed to scripts
///
/// Each call maps onto a single host operation; no retry, timeout, or
/// redirect handling happens at this layer. Scripts reach the network only
/// through this binding.
#[derive(Clone)]
pub struct NetworkBinding {
    host: Arc<dyn HostDispatcher>,
}

impl std::fmt::Debug for NetworkBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkBinding").finish_non_exhaustive()
    }
}

impl NetworkBinding {
    pub fn new(host: Arc<dyn HostDispatcher>) -> Self {
        Self { host }
    }

    /// Issue a GET request through the host
    pub async fn http_get(&self, url: &str, body: &str) -> HostResult<String> {
        let op = HostOp::HttpGet {
            url: url.to_string(),
            body: body.to_string(),
        };
        invoke_async(self.host.as_ref(), op.clone()).await?.into_text(&op)
    }

    /// Issue a POST request through the host
    pub async fn http_post(&self, url: &str, body: &str) -> HostResult<String> {
        let op = HostOp::HttpPost {
            url: url.to_string(),
            body: body.to_string(),
        };
        invoke_async(self.host.as_ref(), op.clone()).await?.into_text(&op)
    }
}
