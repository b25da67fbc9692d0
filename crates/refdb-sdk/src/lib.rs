//! High-level SDK for refdb.
//!
//! [`Repository`] is the main entry point for applications: it registers a
//! reference backend, pairs it with a commit history, and runs merges
//! between them.

pub mod config;
pub mod error;
pub mod repository;

pub use config::RepositoryConfig;
pub use error::{SdkError, SdkResult};
pub use repository::Repository;

// Re-export key types
pub use refdb_graph::{CommitGraph, InMemoryCommitGraph};
pub use refdb_merge::{MergeCommit, MergeCommitBuilder, MergeMode, MergeOutcome, PendingMerge};
pub use refdb_refs::{
    BackendCapabilities, BackendError, BackendResult, InMemoryBackend, RefdbBackend,
    ReferenceRecord,
};
pub use refdb_types::{ContentId, ErrorCategory};
