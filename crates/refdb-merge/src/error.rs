//! Error types for merge operations.

use refdb_refs::RefError;
use refdb_types::ErrorCategory;
use thiserror::Error;

/// Errors that can occur during a merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// `merge` was called with an empty source list.
    #[error("nothing to merge: no sources given")]
    NoSources,

    /// More than one source was given. Octopus merges are not evaluated.
    #[error("merging {count} sources at once is not supported")]
    UnsupportedMultiSourceMerge { count: usize },

    /// The fast-forward check could not be completed, typically because
    /// history is unreachable.
    #[error("merge failed: {reason}")]
    MergeFailed { reason: String },

    /// Resolving or moving a reference failed.
    #[error(transparent)]
    Ref(#[from] RefError),
}

impl MergeError {
    /// The taxonomy category this error belongs to. Reference failures keep
    /// the category of the underlying [`RefError`].
    pub fn category(&self) -> ErrorCategory {
        match self {
            MergeError::Ref(err) => err.category(),
            _ => ErrorCategory::Merge,
        }
    }
}

/// Convenience type alias for merge operations.
pub type MergeResult<T> = std::result::Result<T, MergeError>;
