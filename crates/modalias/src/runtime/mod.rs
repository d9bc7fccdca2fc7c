//! Filesystem abstraction for alias resolution
//!
//! Resolution only touches the filesystem in two places: listing the files of
//! a directory when picking a platform variant, and reading the working
//! directory for relative-mode paths. Both go through the `Runtime` trait so
//! hosts (native CLI, editors, tests) can inject their own view of the disk.

// Platform-specific runtime implementations
#[cfg(not(target_family = "wasm"))]
pub mod native;

// Test utilities (available in test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Directory or file not found
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// Platform runtime trait
///
/// Resolution is synchronous and bounded, so unlike a bundler runtime this
/// trait has no async methods. Implementations must be `Send + Sync` so one
/// runtime can back sessions on several worker threads.
///
/// # Example
///
/// ```rust
/// use modalias::runtime::{Runtime, RuntimeError, RuntimeResult};
/// use std::path::{Path, PathBuf};
///
/// #[derive(Debug)]
/// struct FixedRuntime;
///
/// impl Runtime for FixedRuntime {
///     fn read_dir(&self, _path: &Path) -> RuntimeResult<Vec<String>> {
///         Ok(vec!["index.js".to_string()])
///     }
///
///     fn get_cwd(&self) -> RuntimeResult<PathBuf> {
///         Ok(PathBuf::from("/project"))
///     }
/// }
/// ```
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// List the file names (not full paths) contained in a directory
    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>>;

    /// Get the current working directory
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;
}
