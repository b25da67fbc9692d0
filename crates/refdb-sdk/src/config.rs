//! Repository configuration.

use refdb_merge::MergeMode;
use refdb_refs::RefDbConfig;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Configuration for a [`Repository`](crate::Repository).
///
/// Every field has a default, so a TOML document only needs the keys it
/// overrides:
///
/// ```toml
/// default_merge_mode = "no_fast_forward"
///
/// [refdb]
/// max_redirects = 8
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Reference database settings.
    pub refdb: RefDbConfig,
    /// Mode used when a merge call does not name one.
    pub default_merge_mode: MergeMode,
}

impl RepositoryConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        toml::from_str(s).map_err(|e| SdkError::Config(e.to_string()))
    }
}
