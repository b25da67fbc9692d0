//! In-memory reference backend for testing and ephemeral use.
//!
//! [`InMemoryBackend`] stores all records in a `HashMap` protected by a
//! `RwLock`. It implements every [`RefdbBackend`] operation, including both
//! optional ones, and is suitable for unit tests and short-lived processes.

use std::collections::HashMap;
use std::sync::RwLock;

use glob::Pattern;

use crate::backend::{BackendError, BackendResult, RefNames, RefdbBackend};
use crate::capability::BackendCapabilities;
use crate::types::ReferenceRecord;

/// An in-memory implementation of [`RefdbBackend`].
///
/// All data lives in a `HashMap` behind a `RwLock`. Data is lost when the
/// backend is freed or dropped.
#[derive(Debug)]
pub struct InMemoryBackend {
    refs: RwLock<HashMap<String, ReferenceRecord>>,
    capabilities: BackendCapabilities,
}

impl InMemoryBackend {
    /// Create an empty backend declaring every optional capability.
    pub fn new() -> Self {
        Self::with_capabilities(BackendCapabilities::all())
    }

    /// Create an empty backend declaring only `capabilities`.
    pub fn with_capabilities(capabilities: BackendCapabilities) -> Self {
        Self {
            refs: RwLock::new(HashMap::new()),
            capabilities,
        }
    }

    /// Builder-style insert, for seeding a backend before registration.
    pub fn with_record(self, name: impl Into<String>, record: ReferenceRecord) -> Self {
        if let Ok(mut refs) = self.refs.write() {
            refs.insert(name.into(), record);
        }
        self
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.refs.read().map(|refs| refs.len()).unwrap_or(0)
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(e: impl std::fmt::Display) -> BackendError {
    format!("lock poisoned: {e}").into()
}

impl RefdbBackend for InMemoryBackend {
    fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    fn exists(&self, name: &str) -> BackendResult<bool> {
        let refs = self.refs.read().map_err(poisoned)?;
        Ok(refs.contains_key(name))
    }

    fn lookup(&self, name: &str) -> BackendResult<Option<ReferenceRecord>> {
        let refs = self.refs.read().map_err(poisoned)?;
        Ok(refs.get(name).cloned())
    }

    fn write(&self, name: &str, record: &ReferenceRecord) -> BackendResult<()> {
        let mut refs = self.refs.write().map_err(poisoned)?;
        refs.insert(name.to_string(), record.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> BackendResult<bool> {
        let mut refs = self.refs.write().map_err(poisoned)?;
        Ok(refs.remove(name).is_some())
    }

    fn compress(&self) -> BackendResult<()> {
        let mut refs = self.refs.write().map_err(poisoned)?;
        refs.shrink_to_fit();
        Ok(())
    }

    // Matches against a sorted snapshot so callers may write while iterating.
    fn for_each_glob<'a>(&'a self, pattern: &str) -> BackendResult<RefNames<'a>> {
        let pattern = Pattern::new(pattern)?;
        let refs = self.refs.read().map_err(poisoned)?;
        let mut names: Vec<String> = refs
            .keys()
            .filter(|name| pattern.matches(name))
            .cloned()
            .collect();
        names.sort();
        Ok(Box::new(names.into_iter()))
    }

    fn free(&mut self) {
        match self.refs.get_mut() {
            Ok(refs) => refs.clear(),
            Err(poison) => poison.into_inner().clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdb_types::ContentId;

    fn oid(byte: u8) -> ContentId {
        ContentId::from_hash([byte; 20])
    }

    // ---- Test 1: Write and look up a direct record ----
    #[test]
    fn write_and_lookup_direct() {
        let backend = InMemoryBackend::new();
        backend
            .write("refs/heads/main", &ReferenceRecord::direct(oid(10)))
            .unwrap();

        let read = backend.lookup("refs/heads/main").unwrap();
        assert_eq!(read, Some(ReferenceRecord::direct(oid(10))));
    }

    // ---- Test 2: Lookup of a missing name is None, not an error ----
    #[test]
    fn lookup_missing_returns_none() {
        let backend = InMemoryBackend::new();
        assert!(backend.lookup("refs/heads/nope").unwrap().is_none());
        assert!(!backend.exists("refs/heads/nope").unwrap());
    }

    // ---- Test 3: Overwrite replaces the record ----
    #[test]
    fn overwrite_replaces_record() {
        let backend = InMemoryBackend::new();
        backend
            .write("refs/heads/main", &ReferenceRecord::direct(oid(10)))
            .unwrap();
        backend
            .write("refs/heads/main", &ReferenceRecord::direct(oid(20)))
            .unwrap();

        let read = backend.lookup("refs/heads/main").unwrap().unwrap();
        assert_eq!(read.direct_target(), Some(oid(20)));
    }

    // ---- Test 4: Delete present and absent names ----
    #[test]
    fn delete_is_idempotent() {
        let backend = InMemoryBackend::new();
        backend
            .write("refs/heads/feature", &ReferenceRecord::direct(oid(20)))
            .unwrap();

        assert!(backend.delete("refs/heads/feature").unwrap());
        assert!(!backend.delete("refs/heads/feature").unwrap());
        assert!(!backend.exists("refs/heads/feature").unwrap());
    }

    // ---- Test 5: Glob enumeration is sorted and filtered ----
    #[test]
    fn glob_enumeration() {
        let backend = InMemoryBackend::new()
            .with_record("refs/heads/main", ReferenceRecord::direct(oid(1)))
            .with_record("refs/heads/develop", ReferenceRecord::direct(oid(2)))
            .with_record("refs/tags/v1.0.0", ReferenceRecord::direct(oid(3)))
            .with_record("HEAD", ReferenceRecord::symbolic("refs/heads/main"));

        let heads: Vec<String> = backend.for_each_glob("refs/heads/*").unwrap().collect();
        assert_eq!(heads, vec!["refs/heads/develop", "refs/heads/main"]);

        let all: Vec<String> = backend.for_each_glob("*").unwrap().collect();
        assert_eq!(all.len(), 4);
    }

    // ---- Test 6: Glob enumeration restarts on every call ----
    #[test]
    fn glob_enumeration_is_restartable() {
        let backend = InMemoryBackend::new()
            .with_record("refs/heads/a", ReferenceRecord::direct(oid(1)));

        let first: Vec<String> = backend.for_each_glob("refs/*").unwrap().collect();
        let second: Vec<String> = backend.for_each_glob("refs/*").unwrap().collect();
        assert_eq!(first, second);
    }

    // ---- Test 7: Invalid glob pattern is a backend error ----
    #[test]
    fn invalid_glob_is_an_error() {
        let backend = InMemoryBackend::new();
        assert!(backend.for_each_glob("refs/[").is_err());
    }

    // ---- Test 8: Compress keeps observable contents ----
    #[test]
    fn compress_preserves_contents() {
        let backend = InMemoryBackend::new()
            .with_record("refs/heads/main", ReferenceRecord::direct(oid(1)));
        backend.compress().unwrap();
        assert_eq!(
            backend.lookup("refs/heads/main").unwrap(),
            Some(ReferenceRecord::direct(oid(1)))
        );
    }

    // ---- Test 9: Free drops every record ----
    #[test]
    fn free_clears_records() {
        let mut backend = InMemoryBackend::new()
            .with_record("refs/heads/main", ReferenceRecord::direct(oid(1)));
        assert_eq!(backend.len(), 1);
        backend.free();
        assert!(backend.is_empty());
    }

    // ---- Test 10: Declared capabilities are reported ----
    #[test]
    fn reports_declared_capabilities() {
        assert_eq!(InMemoryBackend::new().capabilities(), BackendCapabilities::all());
        let limited = InMemoryBackend::with_capabilities(BackendCapabilities::COMPRESS);
        assert_eq!(limited.capabilities(), BackendCapabilities::COMPRESS);
    }
}
