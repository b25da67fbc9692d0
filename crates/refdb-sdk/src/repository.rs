use refdb_graph::{CommitGraph, GraphError};
use refdb_merge::{
    MergeCommit, MergeCommitBuilder, MergeEngine, MergeError, MergeMode, MergeOutcome,
    MergeSource, PendingMerge,
};
use refdb_refs::{
    BranchDirectory, LocalBranches, RefDatabase, RefError, RefdbBackend, ReferenceRecord,
};
use refdb_types::ContentId;
use tracing::{debug, info};

use crate::config::RepositoryConfig;
use crate::error::{SdkError, SdkResult};

/// High-level repository API: a reference database, the commit history it
/// points into, and merges between them.
pub struct Repository<G> {
    refs: RefDatabase,
    graph: G,
    directory: Box<dyn BranchDirectory + Send>,
    config: RepositoryConfig,
}

impl<G: CommitGraph> Repository<G> {
    /// Open a repository over `backend` and `graph` with default settings.
    pub fn new(backend: impl RefdbBackend + 'static, graph: G) -> Self {
        Self::with_config(backend, graph, RepositoryConfig::default())
    }

    pub fn with_config(
        backend: impl RefdbBackend + 'static,
        graph: G,
        config: RepositoryConfig,
    ) -> Self {
        Self {
            refs: RefDatabase::with_config(backend, config.refdb.clone()),
            graph,
            directory: Box::new(LocalBranches),
            config,
        }
    }

    /// Replace the reference backend. The previous backend is freed first.
    pub fn set_backend(&mut self, backend: impl RefdbBackend + 'static) {
        self.refs.set_backend(backend);
    }

    /// Replace how branch short names map to reference names.
    pub fn set_branch_directory(&mut self, directory: impl BranchDirectory + Send + 'static) {
        self.directory = Box::new(directory);
    }

    // ---- Accessors ----

    pub fn refs(&self) -> &RefDatabase {
        &self.refs
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    // ---- References ----

    /// Resolve `name` to a direct record.
    pub fn resolve(&self, name: &str) -> SdkResult<ReferenceRecord> {
        Ok(self.refs.resolve(name)?)
    }

    /// The branch HEAD points at, or `None` when HEAD is detached.
    pub fn head_branch(&self) -> SdkResult<Option<String>> {
        Ok(self.refs.head_branch()?)
    }

    // ---- Merging ----

    /// Merge one branch into the current branch.
    ///
    /// `mode` defaults to [`RepositoryConfig::default_merge_mode`].
    pub fn merge_branch(&self, branch: &str, mode: Option<MergeMode>) -> SdkResult<MergeOutcome> {
        self.merge_branches(&[branch], mode)
    }

    /// Merge several branches into the current branch.
    ///
    /// All branches are resolved before the merge is evaluated; an unknown
    /// branch fails the call before anything else happens.
    pub fn merge_branches(
        &self,
        branches: &[&str],
        mode: Option<MergeMode>,
    ) -> SdkResult<MergeOutcome> {
        let sources = branches
            .iter()
            .map(|branch| MergeSource::from_branch(&self.refs, self.directory.as_ref(), branch))
            .collect::<Result<Vec<_>, _>>()?;
        self.run_merge(sources, mode)
    }

    /// Merge a literal commit id into the current branch.
    pub fn merge_content_id(&self, id: ContentId, mode: Option<MergeMode>) -> SdkResult<MergeOutcome> {
        self.run_merge(vec![MergeSource::from_content_id(id)], mode)
    }

    fn run_merge(&self, sources: Vec<MergeSource>, mode: Option<MergeMode>) -> SdkResult<MergeOutcome> {
        let mode = mode.unwrap_or(self.config.default_merge_mode);
        let engine = MergeEngine::new(&self.refs, &self.graph);
        Ok(engine.merge(sources, mode)?)
    }

    /// Finish a merge the engine delegated.
    ///
    /// Runs `builder` on the pending merge. If it creates a commit, the
    /// target reference is moved to it and its id is returned. Conflicts
    /// are returned as [`SdkError::Conflicts`] and no reference changes.
    ///
    /// Fails with [`SdkError::InvalidOperation`] if the target reference
    /// moved since the merge was evaluated.
    pub fn complete_merge(
        &self,
        pending: &PendingMerge,
        builder: &dyn MergeCommitBuilder,
    ) -> SdkResult<ContentId> {
        let tip = self.refs.resolve_chain(&pending.target_ref)?.target;
        if tip != pending.current_tip {
            return Err(SdkError::InvalidOperation(format!(
                "{} moved from {} to {} since the merge was evaluated",
                pending.target_ref,
                pending.current_tip.short_hex(),
                tip.short_hex()
            )));
        }

        let built = builder
            .build(pending.current_tip, &pending.sources)
            .map_err(|e| MergeError::MergeFailed {
                reason: e.to_string(),
            })?;

        match built {
            MergeCommit::Conflicts(paths) => {
                debug!(reference = %pending.target_ref, conflicts = paths.len(), "merge has conflicts");
                Err(SdkError::Conflicts(paths))
            }
            MergeCommit::Created(id) => {
                if !self.graph.contains(&id) {
                    return Err(GraphError::CommitNotFound(id).into());
                }
                self.refs
                    .write_direct(&pending.target_ref, id)
                    .map_err(|err| RefError::ReferenceUpdateFailed {
                        name: pending.target_ref.clone(),
                        reason: err.to_string(),
                    })?;
                info!(
                    reference = %pending.target_ref,
                    commit = %id.short_hex(),
                    "merge commit recorded"
                );
                Ok(id)
            }
        }
    }
}

impl<G: std::fmt::Debug> std::fmt::Debug for Repository<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("refs", &self.refs)
            .field("graph", &self.graph)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
