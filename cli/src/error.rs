#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// An external command exited unsuccessfully.
    #[from(ignore)]
    #[display("{} failed with status {}: {}", program, status, stderr)]
    Command {
        /// Program that was run.
        program: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// `General(String)` holds a `String`, which does not implement
/// `std::error::Error`, so a derived `source()` would not compile.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let err = CliError::Command {
            program: "npx".into(),
            status: "exit status: 1".into(),
            stderr: "boom".into(),
        };
        assert_eq!(err.to_string(), "npx failed with status exit status: 1: boom");
    }

    #[test]
    fn test_io_conversion() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("IO Error:"));
    }
}
