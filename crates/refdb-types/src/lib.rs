//! Foundation types for refdb.
//!
//! This crate provides the identifier and error-taxonomy types shared by the
//! reference database and the merge engine. Every other refdb crate depends
//! on `refdb-types`.
//!
//! # Key Types
//!
//! - [`ContentId`] — Fixed-width content identifier naming a commit or other object
//! - [`ErrorCategory`] — The category every refdb error reports itself under
//! - [`TypeError`] — Parse failures for the types in this crate

pub mod category;
pub mod error;
pub mod object;

pub use category::ErrorCategory;
pub use error::TypeError;
pub use object::{ContentId, CONTENT_ID_LEN};
