//! The [`RefdbBackend`] trait: the plugin contract for reference storage.
//!
//! A backend owns every persisted [`ReferenceRecord`]. The engine never talks
//! to a backend directly; it goes through [`RefDatabase`](crate::RefDatabase),
//! which gates optional operations on the declared
//! [`BackendCapabilities`] and translates failures into
//! [`RefError`](crate::RefError).

use crate::capability::BackendCapabilities;
use crate::types::ReferenceRecord;

/// Error type reported by backend implementations.
///
/// Any error type works; the bridge only keeps its message.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Lazy sequence of reference names returned by
/// [`RefdbBackend::for_each_glob`].
pub type RefNames<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// Storage backend for a reference database.
///
/// Lifecycle: a backend is *registered* with exactly one
/// [`RefDatabase`](crate::RefDatabase), *operated* through it, and *retired*
/// when it is replaced or the database is dropped. Retirement calls
/// [`free`](RefdbBackend::free) exactly once; the backend is never invoked
/// again afterwards.
///
/// Calls are synchronous and never reentrant. Implementations that block on
/// I/O do so inside the call.
pub trait RefdbBackend: Send {
    /// Optional operations this backend supports. Read once at registration.
    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities::empty()
    }

    /// Returns `Ok(false)` for a missing name, never an error.
    fn exists(&self, name: &str) -> BackendResult<bool>;

    /// Read the record stored under `name`.
    ///
    /// Returns `Ok(None)` if the reference does not exist.
    fn lookup(&self, name: &str) -> BackendResult<Option<ReferenceRecord>>;

    /// Store `record` under `name`, replacing any existing record.
    ///
    /// Must be atomic: either the whole record is stored or the backend is
    /// left unchanged.
    fn write(&self, name: &str, record: &ReferenceRecord) -> BackendResult<()>;

    /// Remove `name`.
    ///
    /// Returns `Ok(true)` if the reference existed, `Ok(false)` if it did
    /// not. Deleting an absent name is not an error.
    fn delete(&self, name: &str) -> BackendResult<bool>;

    /// Compact internal storage without changing observable contents.
    ///
    /// Only dispatched if [`BackendCapabilities::COMPRESS`] was declared.
    fn compress(&self) -> BackendResult<()> {
        Err("compress is not implemented by this backend".into())
    }

    /// Enumerate the names matching a shell-style glob.
    ///
    /// The sequence must be finite. Each call starts a fresh enumeration.
    /// Only dispatched if [`BackendCapabilities::FOR_EACH_GLOB`] was declared.
    fn for_each_glob<'a>(&'a self, pattern: &str) -> BackendResult<RefNames<'a>> {
        let _ = pattern;
        Err("foreach_glob is not implemented by this backend".into())
    }

    /// Release every resource the backend holds.
    fn free(&mut self);
}
