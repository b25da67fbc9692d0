//! Branch directory: maps branch short names to canonical reference names.

use crate::error::Result;
use crate::names::{branch_ref_name, is_pseudo_ref, validate_branch_name, REFS_PREFIX};

/// Maps a branch short name (`feature`) to its canonical reference name
/// (`refs/heads/feature`).
pub trait BranchDirectory {
    fn canonical_name(&self, branch: &str) -> Result<String>;
}

/// The default directory for local branches under `refs/heads/`.
///
/// Names already in the `refs/` namespace and pseudo refs such as `HEAD`
/// pass through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalBranches;

impl BranchDirectory for LocalBranches {
    fn canonical_name(&self, branch: &str) -> Result<String> {
        if branch.starts_with(REFS_PREFIX) || is_pseudo_ref(branch) {
            return Ok(branch.to_string());
        }
        validate_branch_name(branch)?;
        Ok(branch_ref_name(branch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefError;

    #[test]
    fn short_names_map_to_heads() {
        assert_eq!(LocalBranches.canonical_name("feature").unwrap(), "refs/heads/feature");
        assert_eq!(
            LocalBranches.canonical_name("user/alice/fix").unwrap(),
            "refs/heads/user/alice/fix"
        );
    }

    #[test]
    fn canonical_names_pass_through() {
        assert_eq!(
            LocalBranches.canonical_name("refs/remotes/origin/main").unwrap(),
            "refs/remotes/origin/main"
        );
        assert_eq!(LocalBranches.canonical_name("HEAD").unwrap(), "HEAD");
    }

    #[test]
    fn invalid_short_names_are_rejected() {
        assert!(matches!(
            LocalBranches.canonical_name("bad..name").unwrap_err(),
            RefError::InvalidBranchName { .. }
        ));
    }
}
