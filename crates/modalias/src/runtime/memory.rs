//! In-memory runtime for tests.
//!
//! Holds a virtual set of files and a virtual working directory so resolution
//! tests never depend on the real disk or the process cwd.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::FxHashSet;

use super::{Runtime, RuntimeError, RuntimeResult};

/// Virtual filesystem keyed by absolute file path.
///
/// ```rust
/// use modalias::runtime::Runtime;
/// use modalias::runtime::memory::MemoryRuntime;
/// use std::path::Path;
///
/// let runtime = MemoryRuntime::new("/project").with_files(["src/test.js", "src/test.ios.js"]);
/// let mut names = runtime.read_dir(Path::new("/project/src")).unwrap();
/// names.sort();
/// assert_eq!(names, vec!["test.ios.js", "test.js"]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: FxHashSet<PathBuf>,
}

impl MemoryRuntime {
    /// Create an empty runtime whose working directory is `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            files: FxHashSet::default(),
        }
    }

    /// Add files; relative paths are taken relative to the virtual cwd.
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for file in files {
            self.add_file(file);
        }
        self
    }

    pub fn add_file(&mut self, file: impl AsRef<Path>) {
        let path = self.cwd.join(file.as_ref()).clean();
        self.files.insert(path);
    }
}

impl Runtime for MemoryRuntime {
    fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        let dir = self.cwd.join(path).clean();
        let names: Vec<String> = self
            .files
            .iter()
            .filter(|file| file.parent() == Some(dir.as_path()))
            .filter_map(|file| file.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        let is_known_dir = !names.is_empty() || self.files.iter().any(|f| f.starts_with(&dir));
        if !is_known_dir {
            return Err(RuntimeError::NotFound(dir));
        }

        Ok(names)
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
