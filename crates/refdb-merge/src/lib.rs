//! Merge engine for refdb.
//!
//! A merge takes one [`MergeSource`] (a branch or a literal content id) and
//! tries to fast-forward the current branch to it. When that is not
//! possible, or not wanted, the engine hands a [`PendingMerge`] back to the
//! caller, who finishes it with an external [`MergeCommitBuilder`].
//!
//! # Modules
//!
//! - [`source`] — [`MergeSource`] and where it came from
//! - [`mode`] — [`MergeMode`]
//! - [`engine`] — [`MergeEngine`]
//! - [`outcome`] — [`MergeOutcome`], [`PendingMerge`], [`MergeCommitBuilder`]
//! - [`error`] — [`MergeError`]

pub mod engine;
pub mod error;
pub mod mode;
pub mod outcome;
pub mod source;

pub use engine::MergeEngine;
pub use error::{MergeError, MergeResult};
pub use mode::MergeMode;
pub use outcome::{MergeCommit, MergeCommitBuilder, MergeOutcome, PendingMerge};
pub use source::{MergeSource, SourceOrigin};
