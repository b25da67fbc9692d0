//! The [`CommitGraph`] trait: the history relation the merge engine consumes.

use refdb_types::ContentId;

use crate::error::GraphResult;

/// Read access to commit ancestry.
///
/// Implemented by whatever object store holds the commits. The merge engine
/// only needs strict ancestry to decide whether a fast-forward is possible.
pub trait CommitGraph {
    /// Returns `true` if `id` names a commit known to the graph.
    fn contains(&self, id: &ContentId) -> bool;

    /// Returns `true` if `ancestor` is reachable from `descendant` by
    /// following parent links at least once. A commit is not its own
    /// ancestor.
    ///
    /// Returns an error if either id is unknown.
    fn is_ancestor(&self, ancestor: &ContentId, descendant: &ContentId) -> GraphResult<bool>;
}

impl<G: CommitGraph + ?Sized> CommitGraph for &G {
    fn contains(&self, id: &ContentId) -> bool {
        (**self).contains(id)
    }

    fn is_ancestor(&self, ancestor: &ContentId, descendant: &ContentId) -> GraphResult<bool> {
        (**self).is_ancestor(ancestor, descendant)
    }
}
