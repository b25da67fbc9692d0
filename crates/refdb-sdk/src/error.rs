use refdb_types::ErrorCategory;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("ref error: {0}")]
    Ref(#[from] refdb_refs::RefError),

    #[error("merge error: {0}")]
    Merge(#[from] refdb_merge::MergeError),

    #[error("graph error: {0}")]
    Graph(#[from] refdb_graph::GraphError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("merge has conflicts in {} path(s)", .0.len())]
    Conflicts(Vec<String>),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl SdkError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SdkError::Ref(err) => err.category(),
            SdkError::Merge(err) => err.category(),
            SdkError::Config(_) => ErrorCategory::Configuration,
            SdkError::Graph(_) | SdkError::Conflicts(_) | SdkError::InvalidOperation(_) => {
                ErrorCategory::Merge
            }
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
