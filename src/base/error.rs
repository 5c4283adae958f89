//! Failures reported across the host boundary.

use std::sync::Arc;

use thiserror::Error;

/// A failure returned (or thrown) by the editor host.
///
/// Every host call in the core is wrapped so that whatever went wrong on the
/// other side arrives as this value instead of unwinding the dispatch thread.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("host call `{operation}` failed: {message}")]
pub struct HostError {
    /// Name of the host operation that failed (e.g. `apply_edit`).
    pub operation: &'static str,
    /// Host-supplied reason.
    pub message: Arc<str>,
}

impl HostError {
    pub fn new(operation: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}
