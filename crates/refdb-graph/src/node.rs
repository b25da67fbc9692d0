//! Commit nodes in the ancestry graph.

use refdb_types::ContentId;
use serde::{Deserialize, Serialize};

/// A commit and its parent links.
///
/// Nodes are immutable once added to the graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitNode {
    /// The commit id.
    pub id: ContentId,
    /// Parent commit ids, first parent first. Empty for root commits.
    pub parents: Vec<ContentId>,
    /// Length of the longest path from a root, counting this node; roots
    /// have generation 1. An ancestor always has a lower generation than
    /// its descendants.
    pub generation: u64,
}

impl CommitNode {
    /// Returns `true` if this commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` if this commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
