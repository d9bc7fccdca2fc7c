//! Path mode translation.
//!
//! Turns an alias-substituted target into the specifier that is written back
//! into the source: relative to the importing file's directory when no root
//! is configured, or joined onto the root in absolute mode. Emitted
//! specifiers always use `/` separators.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use crate::error::Result;
use crate::listing::DirectoryCache;
use crate::platform::{Platform, select_variant};
use crate::runtime::Runtime;
use crate::table::AliasTable;

/// Convert platform separators to `/`.
pub fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make `path` absolute against `cwd` and normalize `.`/`..` lexically.
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        cwd.join(path).clean()
    }
}

/// Lexical relative path from directory `from` to `to`; both must be absolute
/// and clean.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Relative specifier from the directory of `current_file` to `module`.
///
/// Non-absolute inputs are resolved against `cwd`. The result always starts
/// with `./` or `../` (or is `.` when both point at the same directory).
///
/// ```
/// use modalias::translate::map_to_relative;
/// use std::path::Path;
///
/// let cwd = Path::new("/work/test");
/// assert_eq!(map_to_relative(cwd, Path::new("./utils/test/file.js"), "utils/dep"), "../dep");
/// assert_eq!(map_to_relative(cwd, Path::new("/work/test/utils/test/file.js"), "utils/dep"), "../dep");
/// ```
pub fn map_to_relative(cwd: &Path, current_file: &Path, module: &str) -> String {
    let from = absolutize(cwd, parent_dir(current_file));
    let to = absolutize(cwd, Path::new(module));
    relative_specifier(&from, &to)
}

/// Dot-files such as `.config/x` still get `./`; without it the host would
/// read them as bare package names.
fn relative_specifier(from_dir: &Path, to: &Path) -> String {
    let relative = to_posix(&relative_path(from_dir, to));
    if relative.is_empty() {
        ".".to_string()
    } else if relative == ".." || relative.starts_with("../") {
        relative
    } else {
        format!("./{relative}")
    }
}

fn parent_dir(file: &Path) -> &Path {
    file.parent().unwrap_or(Path::new(""))
}

/// Everything path translation needs from the session.
#[derive(Debug, Clone, Copy)]
pub struct PathTranslator<'s> {
    pub cwd: &'s Path,
    pub platform: Platform,
    pub runtime: &'s dyn Runtime,
    pub listings: &'s DirectoryCache,
}

impl PathTranslator<'_> {
    /// Emit the specifier for an alias-substituted `target`.
    ///
    /// `target` is relative to the cwd in relative mode and to the root in
    /// absolute mode. With `variants` set, the last segment is swapped for
    /// the platform variant found next to the target on disk.
    pub fn translate(
        &self,
        table: &AliasTable,
        from_file: &Path,
        target: &str,
        variants: bool,
    ) -> Result<String> {
        let (emitted, on_disk) = match table.root() {
            None => {
                let on_disk = absolutize(self.cwd, Path::new(target));
                let from_dir = absolutize(self.cwd, parent_dir(from_file));
                (relative_specifier(&from_dir, &on_disk), on_disk)
            }
            Some(root) => {
                let joined = root.join(target).clean();
                (to_posix(&joined), absolutize(self.cwd, &joined))
            }
        };

        if variants {
            self.apply_variant(&emitted, &on_disk)
        } else {
            Ok(emitted)
        }
    }

    /// Platform fixup for a specifier that is already a real path; the
    /// specifier keeps its form and only the last segment may change.
    pub fn fixup_in_place(&self, from_file: &Path, specifier: &str) -> Result<String> {
        let on_disk = if Path::new(specifier).is_absolute() {
            absolutize(self.cwd, Path::new(specifier))
        } else {
            absolutize(self.cwd, parent_dir(from_file)).join(specifier).clean()
        };
        self.apply_variant(specifier, &on_disk)
    }

    fn apply_variant(&self, emitted: &str, on_disk: &Path) -> Result<String> {
        let (Some(dir), Some(base)) = (on_disk.parent(), on_disk.file_name()) else {
            return Ok(emitted.to_string());
        };
        let base = base.to_string_lossy();
        let Some((head, last)) = emitted.rsplit_once('/') else {
            return Ok(emitted.to_string());
        };
        if last != base {
            return Ok(emitted.to_string());
        }

        let listing = self.listings.listing(dir, self.runtime)?;
        let variant = select_variant(&base, &listing, self.platform);
        Ok(format!("{head}/{variant}"))
    }
}
