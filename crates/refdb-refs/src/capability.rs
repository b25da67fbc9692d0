//! Backend capability negotiation.
//!
//! A backend declares the optional operations it supports when it is
//! registered. The [`RefDatabase`](crate::RefDatabase) checks every optional
//! call against that declaration before dispatching.

use std::fmt;

bitflags::bitflags! {
    /// The set of optional operations a backend supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BackendCapabilities: u32 {
        /// The backend can compact its storage.
        const COMPRESS = 1 << 0;
        /// The backend can enumerate reference names matching a glob.
        const FOR_EACH_GLOB = 1 << 1;
    }
}

/// Every operation the bridge dispatches to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOperation {
    Exists,
    Lookup,
    Write,
    Delete,
    Compress,
    ForEachGlob,
    Free,
}

impl BackendOperation {
    /// The capability flag that must be declared before this operation may
    /// be dispatched, or `None` for mandatory operations.
    pub const fn required_capability(self) -> Option<BackendCapabilities> {
        match self {
            Self::Compress => Some(BackendCapabilities::COMPRESS),
            Self::ForEachGlob => Some(BackendCapabilities::FOR_EACH_GLOB),
            Self::Exists | Self::Lookup | Self::Write | Self::Delete | Self::Free => None,
        }
    }

    /// Returns `true` if `capabilities` permits dispatching this operation.
    pub fn is_permitted_by(self, capabilities: BackendCapabilities) -> bool {
        match self.required_capability() {
            Some(required) => capabilities.contains(required),
            None => true,
        }
    }
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exists => "exists",
            Self::Lookup => "lookup",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Compress => "compress",
            Self::ForEachGlob => "foreach_glob",
            Self::Free => "free",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandatory_operations_need_no_capability() {
        let none = BackendCapabilities::empty();
        for op in [
            BackendOperation::Exists,
            BackendOperation::Lookup,
            BackendOperation::Write,
            BackendOperation::Delete,
            BackendOperation::Free,
        ] {
            assert!(op.is_permitted_by(none), "{op} should be mandatory");
        }
    }

    #[test]
    fn optional_operations_are_gated() {
        let compress_only = BackendCapabilities::COMPRESS;
        assert!(BackendOperation::Compress.is_permitted_by(compress_only));
        assert!(!BackendOperation::ForEachGlob.is_permitted_by(compress_only));

        let all = BackendCapabilities::all();
        assert!(BackendOperation::ForEachGlob.is_permitted_by(all));
    }

    #[test]
    fn default_declares_nothing() {
        assert!(BackendCapabilities::default().is_empty());
    }
}
