use serde::{Deserialize, Serialize};

/// How the engine treats a source that could be fast-forwarded to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Fast-forward when the current tip is an ancestor of the source.
    #[default]
    Normal,
    /// Never fast-forward; always hand the merge to the caller.
    NoFastForward,
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeMode::Normal => write!(f, "normal"),
            MergeMode::NoFastForward => write!(f, "no_fast_forward"),
        }
    }
}
