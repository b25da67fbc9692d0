//! Error types for the commit graph.

use refdb_types::ContentId;

/// Errors that can occur during graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A referenced commit is not in the graph.
    #[error("commit not found: {0}")]
    CommitNotFound(ContentId),

    /// A parent reference points to a commit that does not exist.
    #[error("dangling parent reference: commit {commit} references missing parent {parent}")]
    DanglingParent {
        /// The commit containing the bad reference.
        commit: ContentId,
        /// The missing parent.
        parent: ContentId,
    },

    /// Attempted to add a commit with an id that already exists.
    #[error("duplicate commit: {0}")]
    DuplicateCommit(ContentId),

    /// History could not be read from the underlying object store.
    ///
    /// [`InMemoryCommitGraph`](crate::InMemoryCommitGraph) never returns
    /// this; it is for [`CommitGraph`](crate::CommitGraph) implementations
    /// backed by external storage.
    #[error("history unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias for graph results.
pub type GraphResult<T> = Result<T, GraphError>;
