//! What a merge call reports back, and the collaborator that finishes
//! non-fast-forward merges.

use refdb_refs::BackendError;
use refdb_types::ContentId;
use serde::{Deserialize, Serialize};

/// The result of [`MergeEngine::merge`](crate::MergeEngine::merge).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// `true` if the current reference now points at the source (or already
    /// did).
    pub is_fast_forward: bool,
    /// The id the current reference was moved to. Set only for
    /// fast-forwards.
    pub resulting_tip: Option<ContentId>,
    /// `true` if the source was already the current tip and nothing was
    /// written.
    pub up_to_date: bool,
    /// Work handed to the caller. Set only when `is_fast_forward` is false.
    pub pending: Option<PendingMerge>,
}

impl MergeOutcome {
    pub(crate) fn fast_forward(tip: ContentId) -> Self {
        Self {
            is_fast_forward: true,
            resulting_tip: Some(tip),
            up_to_date: false,
            pending: None,
        }
    }

    pub(crate) fn up_to_date(tip: ContentId) -> Self {
        Self {
            up_to_date: true,
            ..Self::fast_forward(tip)
        }
    }

    pub(crate) fn delegated(pending: PendingMerge) -> Self {
        Self {
            is_fast_forward: false,
            resulting_tip: None,
            up_to_date: false,
            pending: Some(pending),
        }
    }
}

/// A merge the engine did not complete itself.
///
/// The caller builds the merge commit (see [`MergeCommitBuilder`]) and then
/// moves `target_ref` to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMerge {
    /// The reference that HEAD resolved through; the one to move.
    pub target_ref: String,
    /// Its tip when the merge was evaluated.
    pub current_tip: ContentId,
    /// Resolved source ids, in the order given.
    pub sources: Vec<ContentId>,
}

/// What a [`MergeCommitBuilder`] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeCommit {
    /// A merge commit was written with this id.
    Created(ContentId),
    /// The three-way merge hit conflicts in these paths; nothing was written.
    Conflicts(Vec<String>),
}

/// External three-way merge and commit creation.
pub trait MergeCommitBuilder {
    fn build(
        &self,
        current_tip: ContentId,
        sources: &[ContentId],
    ) -> Result<MergeCommit, BackendError>;
}
