//! Commit ancestry for refdb.
//!
//! The merge engine never inspects commit contents; it only asks whether one
//! commit is a strict ancestor of another. This crate defines that question
//! as the [`CommitGraph`] trait and ships an in-memory implementation for
//! tests and embedders without their own object store.
//!
//! - [`CommitGraph`]: strict ancestry over [`ContentId`](refdb_types::ContentId)s.
//! - [`InMemoryCommitGraph`]: append-only DAG with generation numbers.
//! - [`CommitNode`]: a commit and its parent links.
//! - [`GraphError`]: failures from graph queries and mutation.

pub mod dag;
pub mod error;
pub mod node;
pub mod traits;

pub use dag::InMemoryCommitGraph;
pub use error::{GraphError, GraphResult};
pub use node::CommitNode;
pub use traits::CommitGraph;
