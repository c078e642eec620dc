/*!
 * Error Types
 * Centralized error handling with thiserror and serde support
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export HostError from host module
pub use crate::host::HostError;

// Re-export NamespaceError from namespace module
pub use crate::namespace::NamespaceError;

// Re-export BootstrapError from bootstrap module
pub use crate::bootstrap::BootstrapError;

/// Internal invariant violation
///
/// Raised only from trusted initialization code; never reachable from
/// script-supplied input.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[error("{message}")]
pub struct AssertionError {
    pub message: String,
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for AssertionError {
    fn default() -> Self {
        Self::new("Assertion failed.")
    }
}

/// Guard an internal invariant, failing with `message` when `condition` is false
pub fn assert_invariant(condition: bool, message: &str) -> Result<(), AssertionError> {
    if condition {
        Ok(())
    } else {
        Err(AssertionError::new(message))
    }
}
