//! Merge sources: the resolved commits a merge brings in.

use refdb_refs::{BranchDirectory, RefDatabase, RefError, Result};
use refdb_types::ContentId;
use tracing::trace;

/// Where a [`MergeSource`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceOrigin {
    /// Resolved from a branch; holds the canonical reference name.
    ByBranch(String),
    /// Wrapped from a literal content id.
    ByContentId,
}

/// A commit to merge into the current branch.
///
/// Sources are owned by the merge call they are passed to and released when
/// it returns, whether it succeeds or fails.
#[derive(Debug, PartialEq, Eq)]
pub struct MergeSource {
    origin: SourceOrigin,
    id: ContentId,
}

impl MergeSource {
    /// Resolve `branch` through `directory` and the reference database.
    ///
    /// Fails with [`RefError::UnknownBranch`] if the branch does not
    /// resolve, and with [`RefError::InvalidBranchName`] if the directory
    /// rejects the name.
    pub fn from_branch(
        refdb: &RefDatabase,
        directory: &dyn BranchDirectory,
        branch: &str,
    ) -> Result<Self> {
        let canonical = directory.canonical_name(branch)?;
        let resolved = refdb.resolve_chain(&canonical).map_err(|err| match err {
            RefError::NotFound { .. } => RefError::UnknownBranch {
                name: branch.to_string(),
            },
            other => other,
        })?;

        trace!(branch = %canonical, id = %resolved.target.short_hex(), "merge source resolved");
        Ok(Self {
            origin: SourceOrigin::ByBranch(canonical),
            id: resolved.target,
        })
    }

    /// Wrap a literal id without resolution.
    pub fn from_content_id(id: ContentId) -> Self {
        Self {
            origin: SourceOrigin::ByContentId,
            id,
        }
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    /// The resolved commit id.
    pub fn id(&self) -> ContentId {
        self.id
    }

    /// The canonical branch name, for sources resolved from a branch.
    pub fn branch(&self) -> Option<&str> {
        match &self.origin {
            SourceOrigin::ByBranch(name) => Some(name),
            SourceOrigin::ByContentId => None,
        }
    }
}

impl Drop for MergeSource {
    fn drop(&mut self) {
        trace!(id = %self.id.short_hex(), "merge source released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdb_refs::{InMemoryBackend, LocalBranches, ReferenceRecord};

    fn oid(byte: u8) -> ContentId {
        ContentId::from_hash([byte; 20])
    }

    fn refdb() -> RefDatabase {
        RefDatabase::new(
            InMemoryBackend::new()
                .with_record("refs/heads/feature", ReferenceRecord::direct(oid(2)))
                .with_record("refs/heads/alias", ReferenceRecord::symbolic("refs/heads/feature"))
                .with_record("refs/heads/broken", ReferenceRecord::symbolic("refs/heads/gone")),
        )
    }

    #[test]
    fn from_branch_resolves_short_name() {
        let refdb = refdb();
        let source = MergeSource::from_branch(&refdb, &LocalBranches, "feature").unwrap();
        assert_eq!(source.id(), oid(2));
        assert_eq!(source.branch(), Some("refs/heads/feature"));
        assert_eq!(
            source.origin(),
            &SourceOrigin::ByBranch("refs/heads/feature".into())
        );
    }

    #[test]
    fn from_branch_follows_symbolic_branches() {
        let refdb = refdb();
        let source = MergeSource::from_branch(&refdb, &LocalBranches, "alias").unwrap();
        assert_eq!(source.id(), oid(2));
        assert_eq!(source.branch(), Some("refs/heads/alias"));
    }

    #[test]
    fn missing_branch_is_unknown() {
        let refdb = refdb();
        let err = MergeSource::from_branch(&refdb, &LocalBranches, "nope").unwrap_err();
        assert!(matches!(err, RefError::UnknownBranch { ref name } if name == "nope"));
    }

    #[test]
    fn dangling_branch_is_unknown() {
        let refdb = refdb();
        let err = MergeSource::from_branch(&refdb, &LocalBranches, "broken").unwrap_err();
        assert!(matches!(err, RefError::UnknownBranch { .. }));
    }

    #[test]
    fn invalid_branch_name_is_rejected() {
        let refdb = refdb();
        let err = MergeSource::from_branch(&refdb, &LocalBranches, "a..b").unwrap_err();
        assert!(matches!(err, RefError::InvalidBranchName { .. }));
    }

    #[test]
    fn from_content_id_skips_resolution() {
        let source = MergeSource::from_content_id(oid(9));
        assert_eq!(source.id(), oid(9));
        assert_eq!(source.origin(), &SourceOrigin::ByContentId);
        assert!(source.branch().is_none());
    }
}
