//! Alias table construction.
//!
//! [`AliasTable`] is the immutable, resolution-ready form of [`AliasOptions`]:
//! every alias compiled into a [`SegmentPattern`], the root resolved to either
//! relative mode or an absolute base, and a fingerprint identifying the table
//! for the session's replay guard.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use rustc_hash::{FxHashSet, FxHasher};

use crate::error::Result;
use crate::matcher::SegmentPattern;
use crate::options::AliasOptions;
use crate::runtime::Runtime;
use crate::settings::Settings;

/// Root value that is resolved against the working directory at build time.
const CWD_ROOT: &str = "./";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasEntry {
    alias: String,
    target: String,
    pattern: SegmentPattern,
}

impl AliasEntry {
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        let alias = alias.into();
        let pattern = SegmentPattern::compile(&alias);
        Self {
            alias,
            target: target.into(),
            pattern,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn pattern(&self) -> &SegmentPattern {
        &self.pattern
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    root: Option<PathBuf>,
    react: bool,
    fingerprint: u64,
}

impl AliasTable {
    /// Build a table from normalized options.
    ///
    /// The root is honored unless `settings.force_relative` is set. An empty
    /// root selects relative mode; `./` is turned into the absolute working
    /// directory right away so later comparisons never mix the two forms.
    pub fn build(options: &AliasOptions, settings: &Settings, runtime: &dyn Runtime) -> Result<Self> {
        let root = match options.root.as_deref() {
            Some(root) if !root.is_empty() && !settings.force_relative => {
                if root == CWD_ROOT {
                    Some(runtime.get_cwd()?)
                } else {
                    Some(PathBuf::from(root))
                }
            }
            _ => None,
        };

        let mut seen = FxHashSet::default();
        let mut entries = Vec::with_capacity(options.map.len());
        for mapping in &options.map {
            let alias = mapping.expose.trim_end_matches('/');
            if alias.is_empty() {
                continue;
            }
            if !seen.insert(alias) {
                tracing::warn!(alias, "duplicate alias; the first entry takes priority");
            }
            entries.push(AliasEntry::new(alias, mapping.src.clone()));
        }

        Ok(Self::from_parts(entries, root, options.react))
    }

    pub fn from_parts(entries: Vec<AliasEntry>, root: Option<PathBuf>, react: bool) -> Self {
        let mut hasher = FxHasher::default();
        entries.hash(&mut hasher);
        root.hash(&mut hasher);
        react.hash(&mut hasher);

        Self {
            entries,
            root,
            react,
            fingerprint: hasher.finish(),
        }
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    /// Absolute-mode base, `None` in relative mode.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn is_absolute_mode(&self) -> bool {
        self.root.is_some()
    }

    pub fn react(&self) -> bool {
        self.react
    }

    /// Identity of this table's contents.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
