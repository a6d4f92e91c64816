//! Error types for canon-vdom.
//!
//! Canonicalization itself never fails. Errors only come from the edges:
//! parsing a stored payload, talking to the store, and overlay callbacks.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while persisting or restoring documents.
#[derive(Debug, Error)]
pub enum CanonError {
    /// Stored payload is not valid JSON
    #[error("malformed document JSON: {0}")]
    Deserialize(String),

    /// Stored payload is JSON but not a document tree
    #[error("document schema mismatch at {path}: {message}")]
    Schema {
        /// Location of the offending node (e.g. `root.children[2]`)
        path: String,
        /// What was wrong with it
        message: String,
    },

    /// Serializing a tree failed
    #[error("serialization error: {0}")]
    Serialize(String),

    /// The backing store failed
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The background autosave task is no longer running
    #[error("autosave task has stopped")]
    Stopped,
}

/// Result type alias for canon-vdom operations.
pub type CanonResult<T> = Result<T, CanonError>;

impl CanonError {
    /// Create a schema error for a node path.
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the stored payload is unusable.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Deserialize(_) | Self::Schema { .. })
    }
}

// =============================================================================
// StoreError
// =============================================================================

/// Store operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Read,
    Write,
    Remove,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreOp::Read => "read",
            StoreOp::Write => "write",
            StoreOp::Remove => "remove",
        })
    }
}

/// Failure reported by a snapshot store.
#[derive(Debug, Error)]
#[error("store {op} failed for key {key:?}: {message}")]
pub struct StoreError {
    /// Operation that failed
    pub op: StoreOp,
    /// Key it was applied to
    pub key: String,
    /// Backend message
    pub message: String,
}

impl StoreError {
    /// Create a store error.
    pub fn new(op: StoreOp, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            op,
            key: key.into(),
            message: message.into(),
        }
    }

    /// Wrap an I/O error.
    pub fn io(op: StoreOp, key: impl Into<String>, err: std::io::Error) -> Self {
        Self::new(op, key, err.to_string())
    }
}

// =============================================================================
// SubscriberError
// =============================================================================

/// An overlay callback failed during a publish.
#[derive(Debug, Clone, Error)]
#[error("subscriber {key:?} {}: {message}", failure_kind(.panicked))]
pub struct SubscriberError {
    /// Subscription key of the failing callback
    pub key: String,
    /// Error or panic message
    pub message: String,
    /// Whether the callback panicked rather than returning an error
    pub panicked: bool,
}

fn failure_kind(panicked: &bool) -> &'static str {
    if *panicked { "panicked" } else { "failed" }
}
