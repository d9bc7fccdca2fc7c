//! Native Runtime Implementation
//!
//! `Runtime` implementation for native (non-WASM) environments where
//! standard filesystem operations are available.

// NativeRuntime is the one place allowed to touch std::fs
#![allow(clippy::disallowed_methods)]

use std::path::{Path, PathBuf};

use super::{Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
///
/// # Example
///
/// ```rust,no_run
/// use modalias::runtime::Runtime;
/// use modalias::runtime::native::NativeRuntime;
/// use std::path::Path;
///
/// let runtime = NativeRuntime::new();
/// let names = runtime.read_dir(Path::new("src")).unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime for NativeRuntime {
    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuntimeError::NotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(format!("Failed to read directory {}: {}", path.display(), e))
            }
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                RuntimeError::Io(format!("Failed to read entry in {}: {}", path.display(), e))
            })?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        std::env::current_dir()
            .map_err(|e| RuntimeError::Io(format!("Failed to get current directory: {}", e)))
    }
}
