#![deny(missing_docs)]

//! # Code Patching
//!
//! Computes insertion points in parsed module descriptors and applies them as
//! a single rewrite, without disturbing manual formatting or comments.
//!
//! - **files**: where a new import statement goes.
//! - **metadata**: listing a symbol in `@NgModule` arrays.
//! - **routes**: appending a lazy route to the route table.
//! - **recorder**: staging and committing inserts.
//! - **store**: the file stores descriptors live in.

pub(crate) mod common;

/// File-level patching operations (imports).
pub mod files;

/// `@NgModule` metadata patching.
pub mod metadata;

/// Route table patching.
pub mod routes;

/// Staged inserts and commits.
pub mod recorder;

/// Disk and in-memory file stores.
pub mod store;

pub use files::import_insertion;
pub use metadata::ng_module_symbol;
pub use recorder::{begin_update, commit_update, PendingEdit, UpdateRecorder};
pub use routes::route_insertion;
pub use store::{DiskStore, FileStore, MemoryStore};
