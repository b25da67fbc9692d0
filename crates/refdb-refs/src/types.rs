//! Core reference types.
//!
//! A reference is a name bound to a [`ReferenceRecord`]: either a symbolic
//! pointer to another reference name, or a direct pointer to a
//! [`ContentId`].

use std::fmt;

use refdb_types::ContentId;
use serde::{Deserialize, Serialize};

/// The two kinds of stored reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    Symbolic,
    Direct,
}

/// The value stored under a reference name.
///
/// Records are immutable; updating a reference replaces its record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceRecord {
    /// Points at another reference by canonical name (e.g. HEAD pointing at
    /// "refs/heads/main").
    Symbolic(String),
    /// Points directly at a content id.
    Direct(ContentId),
}

impl ReferenceRecord {
    /// Build a symbolic record.
    pub fn symbolic(target: impl Into<String>) -> Self {
        ReferenceRecord::Symbolic(target.into())
    }

    /// Build a direct record.
    pub fn direct(target: ContentId) -> Self {
        ReferenceRecord::Direct(target)
    }

    pub fn kind(&self) -> ReferenceKind {
        match self {
            ReferenceRecord::Symbolic(_) => ReferenceKind::Symbolic,
            ReferenceRecord::Direct(_) => ReferenceKind::Direct,
        }
    }

    /// The target reference name, if this record is symbolic.
    pub fn symbolic_target(&self) -> Option<&str> {
        match self {
            ReferenceRecord::Symbolic(name) => Some(name),
            ReferenceRecord::Direct(_) => None,
        }
    }

    /// The target id, if this record is direct.
    pub fn direct_target(&self) -> Option<ContentId> {
        match self {
            ReferenceRecord::Symbolic(_) => None,
            ReferenceRecord::Direct(id) => Some(*id),
        }
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, ReferenceRecord::Symbolic(_))
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, ReferenceRecord::Direct(_))
    }
}

impl fmt::Display for ReferenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceRecord::Symbolic(name) => write!(f, "ref: {name}"),
            ReferenceRecord::Direct(id) => write!(f, "{id}"),
        }
    }
}

/// The result of walking a reference through its symbolic chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
    /// Every name visited, starting with the requested one. The last entry
    /// is the reference holding the direct record.
    pub chain: Vec<String>,
    /// The id the chain ends at.
    pub target: ContentId,
}

impl ResolvedReference {
    /// The name of the direct reference at the end of the chain.
    pub fn direct_name(&self) -> &str {
        self.chain.last().map(String::as_str).unwrap_or_default()
    }

    /// Number of symbolic hops that were followed.
    pub fn hops(&self) -> usize {
        self.chain.len().saturating_sub(1)
    }

    /// The resolved value as a direct record.
    pub fn record(&self) -> ReferenceRecord {
        ReferenceRecord::Direct(self.target)
    }
}
