//! Error types for input resolution.

use thiserror::Error;

/// Opaque failure reported by a host platform capability.
///
/// Hosts surface whatever their platform gives them (a revoked permission,
/// a vanished device, an I/O failure) as a reason string; the engine wraps
/// it with the path context of the node that failed.
#[derive(Error, Debug)]
#[error("{reason}")]
pub struct HostError {
    pub reason: String,
}

impl HostError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        Self {
            reason: e.to_string(),
        }
    }
}

/// Errors from resolving dropped or selected inputs.
///
/// A directory resolves all-or-nothing: any of these aborts the enclosing
/// walk. Nothing is retried here; that responsibility belongs to the caller.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A single file or directory-entry capability could not be obtained.
    #[error("Failed to acquire file at '{path}': {reason}")]
    Acquisition { path: String, reason: String },

    /// A directory's batch-read operation failed.
    #[error("Directory listing failed at '{path}': {reason}")]
    Enumeration { path: String, reason: String },

    /// A spawned resolution task was cancelled or panicked.
    #[error("Resolution task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
