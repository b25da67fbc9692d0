//! Error types for reference operations.

use refdb_types::ErrorCategory;
use thiserror::Error;

use crate::capability::BackendOperation;

/// Errors that can occur during reference operations.
///
/// Backend implementations never surface their own error types past the
/// [`RefDatabase`](crate::RefDatabase) bridge; whatever they report arrives
/// here as [`RefError::BackendOperationFailed`].
#[derive(Debug, Error)]
pub enum RefError {
    /// The reference was not found.
    #[error("ref not found: {name}")]
    NotFound { name: String },

    /// Resolution followed more symbolic hops than allowed.
    #[error("too many symbolic redirects resolving {name} (max {max})")]
    TooManyRedirects { name: String, max: usize },

    /// A branch name did not resolve to a reference.
    #[error("unknown branch: {name}")]
    UnknownBranch { name: String },

    /// Moving a reference to a new target failed; the reference keeps its
    /// prior value.
    #[error("failed to update ref {name}: {reason}")]
    ReferenceUpdateFailed { name: String, reason: String },

    /// The backend reported a failure.
    #[error("backend {operation} failed: {message}")]
    BackendOperationFailed {
        operation: BackendOperation,
        message: String,
    },

    /// An optional operation was invoked that the active backend did not
    /// declare at registration.
    #[error("backend does not support {operation}")]
    UnsupportedOperation { operation: BackendOperation },

    /// The reference name is invalid.
    #[error("invalid ref name: {name}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The branch name is invalid.
    #[error("invalid branch name: {name}: {reason}")]
    InvalidBranchName { name: String, reason: String },
}

impl RefError {
    /// The taxonomy category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RefError::UnsupportedOperation { .. } => ErrorCategory::Configuration,
            _ => ErrorCategory::Reference,
        }
    }

    /// Returns `true` if this is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RefError::NotFound { .. })
    }
}

/// Convenience type alias for ref operations.
pub type Result<T> = std::result::Result<T, RefError>;
