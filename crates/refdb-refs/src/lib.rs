//! Reference database for refdb.
//!
//! This crate maps symbolic names (HEAD, branches, tags) to content ids. The
//! storage itself is pluggable: any type implementing [`RefdbBackend`] can
//! be registered with a [`RefDatabase`], which then guarantees correct
//! symbolic-to-direct resolution whatever the backend does.
//!
//! # Architecture
//!
//! - **Backends** own the persisted records and declare which optional
//!   operations (compress, glob enumeration) they support.
//! - **The database** is the dispatch bridge. It gates optional calls on
//!   the declared capabilities, translates backend failures into
//!   [`RefError`], and frees a backend exactly once when it is retired.
//! - **The resolver** walks symbolic records until it reaches a direct one,
//!   with a bounded number of hops.
//!
//! # Modules
//!
//! - [`error`] — Error types for ref operations
//! - [`types`] — [`ReferenceRecord`], [`ResolvedReference`]
//! - [`capability`] — [`BackendCapabilities`], [`BackendOperation`]
//! - [`backend`] — The [`RefdbBackend`] plugin trait
//! - [`database`] — The [`RefDatabase`] dispatch bridge
//! - [`resolver`] — [`ReferenceResolver`]
//! - [`names`] — Reference and branch name validation
//! - [`directory`] — [`BranchDirectory`] short-name mapping
//! - [`memory`] — In-memory [`InMemoryBackend`] for tests
//! - [`config`] — [`RefDbConfig`]

pub mod backend;
pub mod capability;
pub mod config;
pub mod database;
pub mod directory;
pub mod error;
pub mod memory;
pub mod names;
pub mod resolver;
pub mod types;

pub use backend::{BackendError, BackendResult, RefNames, RefdbBackend};
pub use capability::{BackendCapabilities, BackendOperation};
pub use config::RefDbConfig;
pub use database::RefDatabase;
pub use directory::{BranchDirectory, LocalBranches};
pub use error::{RefError, Result};
pub use memory::InMemoryBackend;
pub use names::{validate_branch_name, validate_reference_name};
pub use resolver::ReferenceResolver;
pub use types::{ReferenceKind, ReferenceRecord, ResolvedReference};
