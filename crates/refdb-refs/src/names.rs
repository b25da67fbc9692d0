//! Reference and branch name validation following git-style conventions.
//!
//! Valid branch names:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..` (double dot) or `@{`
//! - Must not start or end with `.` or `/`
//! - Must not end with `.lock`
//! - Must not contain consecutive slashes (`//`)
//! - Components between slashes must be non-empty
//!
//! Valid reference names are either upper-case pseudo refs such as `HEAD`
//! and `MERGE_HEAD`, or `refs/` followed by a name obeying the branch rules.

use crate::error::{RefError, Result};

/// Namespace prefix for all non-pseudo references.
pub const REFS_PREFIX: &str = "refs/";

/// Namespace prefix for local branches.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// The name of the HEAD pseudo ref.
pub const HEAD: &str = "HEAD";

/// Characters that are forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

/// Validate a branch name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use refdb_refs::names::validate_branch_name;
///
/// assert!(validate_branch_name("main").is_ok());
/// assert!(validate_branch_name("feature/auth").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("bad..name").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    check_components(name).map_err(|reason| RefError::InvalidBranchName {
        name: name.to_string(),
        reason,
    })
}

/// Validate a full reference name such as `HEAD` or `refs/heads/main`.
///
/// ```
/// use refdb_refs::names::validate_reference_name;
///
/// assert!(validate_reference_name("HEAD").is_ok());
/// assert!(validate_reference_name("refs/heads/main").is_ok());
/// assert!(validate_reference_name("main").is_err());
/// ```
pub fn validate_reference_name(name: &str) -> Result<()> {
    if is_pseudo_ref(name) {
        return Ok(());
    }

    let Some(rest) = name.strip_prefix(REFS_PREFIX) else {
        return Err(RefError::InvalidName {
            name: name.to_string(),
            reason: "must be an upper-case pseudo ref or start with 'refs/'".into(),
        });
    };

    check_components(rest).map_err(|reason| RefError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Returns `true` for names like `HEAD`, `ORIG_HEAD`, or `MERGE_HEAD`.
pub fn is_pseudo_ref(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('_')
        && name.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Canonical reference name for a local branch (`main` -> `refs/heads/main`).
pub fn branch_ref_name(branch: &str) -> String {
    format!("{HEADS_PREFIX}{branch}")
}

fn check_components(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("name must not be empty".into());
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(format!("contains forbidden character: {ch:?}"));
        }
    }

    if name.contains("..") {
        return Err("must not contain '..'".into());
    }

    // Reflog syntax.
    if name.contains("@{") {
        return Err("must not contain '@{'".into());
    }

    if name.starts_with('.') || name.ends_with('.') {
        return Err("must not start or end with '.'".into());
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err("must not start or end with '/'".into());
    }

    if name.ends_with(".lock") {
        return Err("must not end with '.lock'".into());
    }

    if name.contains("//") {
        return Err("must not contain consecutive slashes '//'".into());
    }

    for component in name.split('/') {
        if component.is_empty() {
            return Err("path components must not be empty".into());
        }
        if component.starts_with('.') {
            return Err(format!("component must not start with '.': {component:?}"));
        }
    }

    Ok(())
}
