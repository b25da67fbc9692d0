//! [`RefDatabase`]: the dispatch bridge between the engine and a backend.
//!
//! The database owns exactly one registered [`RefdbBackend`] at a time.
//! Every backend call goes through one dispatch routine, which:
//!
//! 1. refuses optional operations the backend did not declare
//!    ([`RefError::UnsupportedOperation`]),
//! 2. forwards the call, and
//! 3. turns any [`BackendError`](crate::BackendError), or a panic raised
//!    inside the backend, into [`RefError::BackendOperationFailed`].
//!
//! Retiring a backend (replacement or drop) calls `free` exactly once.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use refdb_types::ContentId;
use tracing::{debug, trace, warn};

use crate::backend::{BackendResult, RefNames, RefdbBackend};
use crate::capability::{BackendCapabilities, BackendOperation};
use crate::config::RefDbConfig;
use crate::error::{RefError, Result};
use crate::names::{validate_reference_name, HEAD};
use crate::resolver::ReferenceResolver;
use crate::types::{ReferenceRecord, ResolvedReference};

/// A registered backend together with the capabilities it declared.
///
/// Dropping the registration retires the backend.
struct Registration {
    backend: Box<dyn RefdbBackend>,
    capabilities: BackendCapabilities,
}

impl Registration {
    fn new(backend: Box<dyn RefdbBackend>) -> Self {
        let capabilities = backend.capabilities();
        debug!(?capabilities, "registered reference backend");
        Self {
            backend,
            capabilities,
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let backend = &mut self.backend;
        match panic::catch_unwind(AssertUnwindSafe(|| backend.free())) {
            Ok(()) => debug!("retired reference backend"),
            Err(payload) => {
                let message = panic_message(&*payload);
                warn!(operation = %BackendOperation::Free, %message, "backend panicked while being freed");
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// A reference database backed by a pluggable [`RefdbBackend`].
///
/// Not reentrant: callers serialize access, one operation in flight per
/// database.
pub struct RefDatabase {
    registration: Registration,
    config: RefDbConfig,
}

impl RefDatabase {
    /// Register `backend` with the default configuration.
    pub fn new(backend: impl RefdbBackend + 'static) -> Self {
        Self::with_config(backend, RefDbConfig::default())
    }

    /// Register `backend` with an explicit configuration.
    pub fn with_config(backend: impl RefdbBackend + 'static, config: RefDbConfig) -> Self {
        Self {
            registration: Registration::new(Box::new(backend)),
            config,
        }
    }

    /// Replace the active backend.
    ///
    /// The previous backend is freed before the new one receives any call.
    pub fn set_backend(&mut self, backend: impl RefdbBackend + 'static) {
        self.set_boxed_backend(Box::new(backend));
    }

    /// Replace the active backend with an already boxed one.
    pub fn set_boxed_backend(&mut self, backend: Box<dyn RefdbBackend>) {
        let previous = std::mem::replace(&mut self.registration, Registration::new(backend));
        drop(previous);
    }

    /// The capabilities the active backend declared at registration.
    pub fn capabilities(&self) -> BackendCapabilities {
        self.registration.capabilities
    }

    pub fn config(&self) -> &RefDbConfig {
        &self.config
    }

    fn dispatch<'a, T>(
        &'a self,
        operation: BackendOperation,
        call: impl FnOnce(&'a dyn RefdbBackend) -> BackendResult<T>,
    ) -> Result<T> {
        if !operation.is_permitted_by(self.registration.capabilities) {
            return Err(RefError::UnsupportedOperation { operation });
        }
        trace!(%operation, "dispatching to reference backend");
        let backend = &*self.registration.backend;
        match panic::catch_unwind(AssertUnwindSafe(|| call(backend))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                debug!(%operation, error = %e, "reference backend reported a failure");
                Err(RefError::BackendOperationFailed {
                    operation,
                    message: e.to_string(),
                })
            }
            Err(payload) => {
                let message = panic_message(&*payload);
                warn!(%operation, %message, "reference backend panicked");
                Err(RefError::BackendOperationFailed {
                    operation,
                    message: format!("backend panicked: {message}"),
                })
            }
        }
    }

    // ---- Backend operations ----

    /// Returns `true` if a reference named `name` exists.
    pub fn exists(&self, name: &str) -> Result<bool> {
        self.dispatch(BackendOperation::Exists, |b| b.exists(name))
    }

    /// Read the record stored under `name` without following symbolic
    /// records. Returns `Ok(None)` if the reference does not exist.
    pub fn lookup(&self, name: &str) -> Result<Option<ReferenceRecord>> {
        self.dispatch(BackendOperation::Lookup, |b| b.lookup(name))
    }

    /// Like [`lookup`](Self::lookup), but a miss is [`RefError::NotFound`].
    pub fn get(&self, name: &str) -> Result<ReferenceRecord> {
        self.lookup(name)?.ok_or_else(|| RefError::NotFound {
            name: name.to_string(),
        })
    }

    /// Store `record` under `name`, replacing any existing record.
    pub fn write(&self, name: &str, record: &ReferenceRecord) -> Result<()> {
        if self.config.validate_names {
            validate_reference_name(name)?;
            if let Some(target) = record.symbolic_target() {
                validate_reference_name(target)?;
            }
        }
        self.dispatch(BackendOperation::Write, |b| b.write(name, record))?;
        debug!(name, %record, "wrote ref");
        Ok(())
    }

    /// Point `name` directly at `target`.
    pub fn write_direct(&self, name: &str, target: ContentId) -> Result<()> {
        self.write(name, &ReferenceRecord::Direct(target))
    }

    /// Point `name` at the reference named `target`.
    pub fn write_symbolic(&self, name: &str, target: &str) -> Result<()> {
        self.write(name, &ReferenceRecord::symbolic(target))
    }

    /// Delete `name`. Returns `Ok(false)` if it did not exist.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let existed = self.dispatch(BackendOperation::Delete, |b| b.delete(name))?;
        debug!(name, existed, "deleted ref");
        Ok(existed)
    }

    /// Compact backend storage.
    ///
    /// Fails with [`RefError::UnsupportedOperation`] unless the backend
    /// declared [`BackendCapabilities::COMPRESS`].
    pub fn compress(&self) -> Result<()> {
        self.dispatch(BackendOperation::Compress, |b| b.compress())
    }

    /// Enumerate reference names matching `pattern`.
    ///
    /// Fails with [`RefError::UnsupportedOperation`] unless the backend
    /// declared [`BackendCapabilities::FOR_EACH_GLOB`].
    pub fn for_each_glob(&self, pattern: &str) -> Result<RefNames<'_>> {
        self.dispatch(BackendOperation::ForEachGlob, |b| b.for_each_glob(pattern))
    }

    // ---- Resolution ----

    /// A resolver over this database using the configured redirect limit.
    pub fn resolver(&self) -> ReferenceResolver<'_> {
        ReferenceResolver::new(self, self.config.max_redirects)
    }

    /// Resolve `name` to the direct record at the end of its symbolic chain.
    pub fn resolve(&self, name: &str) -> Result<ReferenceRecord> {
        self.resolver().resolve(name)
    }

    /// Resolve `name`, keeping every name visited on the way.
    pub fn resolve_chain(&self, name: &str) -> Result<ResolvedReference> {
        self.resolver().resolve_chain(name)
    }

    /// The reference HEAD points at, or `None` when HEAD is detached.
    ///
    /// Fails with [`RefError::NotFound`] if HEAD does not exist.
    pub fn head_branch(&self) -> Result<Option<String>> {
        match self.get(HEAD)? {
            ReferenceRecord::Symbolic(target) => Ok(Some(target)),
            ReferenceRecord::Direct(_) => Ok(None),
        }
    }
}

impl std::fmt::Debug for RefDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefDatabase")
            .field("capabilities", &self.registration.capabilities)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
