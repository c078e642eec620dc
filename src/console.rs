/*!
 * Console Sink
 * Script-facing logging bound to the structured logging stack
 */

use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Log target carrying script output
pub const SCRIPT_TARGET: &str = "script";

/// `console`-style logging sink exposed to scripts
///
/// Emits through the embedder's subscriber; no logging configuration
/// happens at this layer.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    no_color: bool,
}

impl ConsoleSink {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    pub fn no_color(&self) -> bool {
        self.no_color
    }

    pub fn log(&self, message: &str) {
        info!(target: "script", "{}", message);
    }

    pub fn info(&self, message: &str) {
        info!(target: "script", "{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!(target: "script", "{}", message);
    }

    pub fn error(&self, message: &str) {
        error!(target: "script", "{}", message);
    }

    pub fn debug(&self, message: &str) {
        debug!(target: "script", "{}", message);
    }

    /// Render a structured value for display
    pub fn inspect(&self, value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}
