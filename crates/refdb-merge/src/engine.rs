//! The merge engine: fast-forward evaluation against the current branch.
//!
//! One call runs a fixed sequence of states:
//!
//! ```text
//! Start -> SourcesResolved -> FastForwardEvaluated -> FastForwardApplied
//!                                                  \-> DelegatedToCaller
//! ```
//!
//! Sources are resolved before ancestry is checked, and ancestry is checked
//! before any reference is written. A failure at any step ends the call with
//! no reference changed.

use refdb_graph::CommitGraph;
use refdb_refs::names::HEAD;
use refdb_refs::{RefDatabase, RefError};
use refdb_types::ContentId;
use tracing::{debug, info};

use crate::error::{MergeError, MergeResult};
use crate::mode::MergeMode;
use crate::outcome::{MergeOutcome, PendingMerge};
use crate::source::MergeSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MergeState {
    Start,
    SourcesResolved,
    FastForwardEvaluated,
    FastForwardApplied,
    DelegatedToCaller,
}

impl std::fmt::Display for MergeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MergeState::Start => "start",
            MergeState::SourcesResolved => "sources_resolved",
            MergeState::FastForwardEvaluated => "fast_forward_evaluated",
            MergeState::FastForwardApplied => "fast_forward_applied",
            MergeState::DelegatedToCaller => "delegated_to_caller",
        };
        f.write_str(name)
    }
}

fn advance(state: &mut MergeState, next: MergeState) {
    debug!(from = %state, to = %next, "merge state");
    *state = next;
}

/// Merges sources into whatever HEAD currently resolves to.
///
/// The engine only ever fast-forwards. Anything else is returned to the
/// caller as a [`PendingMerge`].
#[derive(Debug)]
pub struct MergeEngine<'a, G> {
    refdb: &'a RefDatabase,
    graph: G,
}

impl<'a, G: CommitGraph> MergeEngine<'a, G> {
    pub fn new(refdb: &'a RefDatabase, graph: G) -> Self {
        Self { refdb, graph }
    }

    /// Merge `sources` into the current branch.
    ///
    /// Exactly one source is supported. With [`MergeMode::Normal`], if the
    /// current tip is a strict ancestor of the source, the reference HEAD
    /// resolves through is moved to the source. A source equal to the
    /// current tip is reported as an up-to-date fast-forward and nothing is
    /// written. Every other case, and every [`MergeMode::NoFastForward`]
    /// call, is delegated.
    ///
    /// # Errors
    ///
    /// - [`MergeError::NoSources`] / [`MergeError::UnsupportedMultiSourceMerge`]
    ///   for anything but one source.
    /// - [`RefError::NotFound`] if HEAD or its branch does not exist yet.
    /// - [`MergeError::MergeFailed`] if ancestry cannot be determined.
    /// - [`RefError::ReferenceUpdateFailed`] if moving the branch fails; the
    ///   branch keeps its prior value.
    pub fn merge(&self, sources: Vec<MergeSource>, mode: MergeMode) -> MergeResult<MergeOutcome> {
        let mut state = MergeState::Start;
        debug!(sources = sources.len(), %mode, state = %state, "merge requested");

        let source = match sources.as_slice() {
            [] => return Err(MergeError::NoSources),
            [one] => one,
            many => {
                return Err(MergeError::UnsupportedMultiSourceMerge { count: many.len() });
            }
        };
        let source_id = source.id();

        let head = self.refdb.resolve_chain(HEAD)?;
        let target_ref = head.direct_name().to_string();
        let current_tip = head.target;
        advance(&mut state, MergeState::SourcesResolved);

        let fast_forward = match mode {
            MergeMode::NoFastForward => false,
            MergeMode::Normal => {
                current_tip == source_id || self.is_strict_ancestor(&current_tip, &source_id)?
            }
        };
        advance(&mut state, MergeState::FastForwardEvaluated);

        if !fast_forward {
            advance(&mut state, MergeState::DelegatedToCaller);
            return Ok(MergeOutcome::delegated(PendingMerge {
                target_ref,
                current_tip,
                sources: vec![source_id],
            }));
        }

        if current_tip == source_id {
            advance(&mut state, MergeState::FastForwardApplied);
            debug!(reference = %target_ref, "already up to date");
            return Ok(MergeOutcome::up_to_date(source_id));
        }

        self.refdb
            .write_direct(&target_ref, source_id)
            .map_err(|err| RefError::ReferenceUpdateFailed {
                name: target_ref.clone(),
                reason: err.to_string(),
            })?;
        advance(&mut state, MergeState::FastForwardApplied);
        info!(
            reference = %target_ref,
            from = %current_tip.short_hex(),
            to = %source_id.short_hex(),
            "fast-forwarded"
        );

        Ok(MergeOutcome::fast_forward(source_id))
    }

    fn is_strict_ancestor(&self, ancestor: &ContentId, descendant: &ContentId) -> MergeResult<bool> {
        self.graph
            .is_ancestor(ancestor, descendant)
            .map_err(|err| MergeError::MergeFailed {
                reason: err.to_string(),
            })
    }
}
