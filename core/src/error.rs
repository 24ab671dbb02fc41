//! # Error Handling
//!
//! `AppError` covers option validation, descriptor lookup, parsing and
//! patching failures, plus wrapped IO and JSON errors.

use derive_more::{Display, From};

/// Every failure a generation run can end with.
///
/// `Display` and `From` come from `derive_more`.
/// Note: String errors default to `General`; every domain variant must be
/// constructed explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Invalid generation options (e.g. `route` without `module`).
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Configuration(String),

    /// A descriptor that had to be read does not exist.
    #[from(ignore)]
    #[display("File {_0} does not exist.")]
    SourceNotFound(String),

    /// Neither the routing descriptor nor the module descriptor holds a route table.
    #[from(ignore)]
    #[display("Couldn't find the module nor its routing module: {reason} in {path}")]
    RouteHostNotFound {
        /// Descriptor that was inspected.
        path: String,
        /// What was missing.
        reason: String,
    },

    /// An explicit `module` option matched no file.
    #[from(ignore)]
    #[display("{_0}")]
    ModuleResolution(String),

    /// The source text could not be parsed at all.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A staged insert does not fit the text it targets.
    #[from(ignore)]
    #[display("Invalid Edit: {_0}")]
    InvalidEdit(String),

    /// A scaffolded file would overwrite an existing one.
    #[from(ignore)]
    #[display("{_0} already exists.")]
    FileExists(String),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for workspace JSON errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
