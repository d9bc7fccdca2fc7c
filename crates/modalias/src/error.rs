//! Error types for alias resolution.
//!
//! Expected outcomes (no alias matched, bare package names, malformed option
//! entries) are not errors; they surface as [`crate::Resolution`] values or
//! are skipped. Only genuinely broken inputs and filesystem failures land here.

use std::path::PathBuf;

use thiserror::Error;

use crate::runtime::RuntimeError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Listing a directory for platform-variant selection failed
    #[error("failed to list directory {} for platform variants: {source}", .dir.display())]
    DirectoryRead {
        dir: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// Any other runtime failure (e.g. reading the working directory)
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Options are not one of the accepted shapes
    #[error("invalid alias options: {0}")]
    InvalidOptions(String),

    /// Platform tag is not one of mobile, ios, android, windows, desktop, web
    #[error("unknown target platform '{0}' (expected mobile, ios, android, windows, desktop or web)")]
    InvalidPlatform(String),

    /// Environment settings could not be extracted
    #[error("invalid environment settings: {0}")]
    Settings(String),

    /// A source file could not be parsed for rewriting
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}
