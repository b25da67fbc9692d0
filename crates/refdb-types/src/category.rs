use std::fmt;

use serde::{Deserialize, Serialize};

/// The unified error taxonomy shared by every refdb crate.
///
/// Each crate-level error enum maps its variants onto one of these through a
/// `category()` method, so callers can branch on the kind of failure without
/// matching on every crate's error type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Reference lookup, resolution, or backend failures.
    Reference,
    /// Merge evaluation failures.
    Merge,
    /// Programming errors: calling an operation the active backend did not
    /// declare, or an otherwise invalid setup.
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Reference => write!(f, "reference"),
            ErrorCategory::Merge => write!(f, "merge"),
            ErrorCategory::Configuration => write!(f, "configuration"),
        }
    }
}
