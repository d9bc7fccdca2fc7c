//! Alias matching by whole path segments.
//!
//! An alias matches a specifier when its `/`-separated segments appear as a
//! contiguous run of the specifier's segments: `utils` matches `utils`,
//! `utils/x`, `x/utils` and `x/utils/y`, never `myutils`. The matched run is
//! replaced by the alias target and the surrounding segments are kept.
//!
//! The table is scanned in order and the first alias that matches anywhere
//! wins; candidates are not compared for length or specificity.

use crate::table::AliasTable;

/// Marker for targets that name an installed package.
pub const NPM_MARKER: &str = "npm:";

/// An alias compiled into its path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentPattern {
    segments: Vec<String>,
}

impl SegmentPattern {
    pub fn compile(alias: &str) -> Self {
        Self {
            segments: alias.split('/').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the first segment where this pattern's run begins.
    pub fn find(&self, segments: &[&str]) -> Option<usize> {
        if self.segments.len() > segments.len() {
            return None;
        }
        segments
            .windows(self.segments.len())
            .position(|window| window.iter().zip(&self.segments).all(|(a, b)| *a == b.as_str()))
    }
}

/// Result of substituting an alias into a specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasMatch<'t> {
    /// Alias that matched.
    pub alias: &'t str,
    /// Target it was replaced with.
    pub target: &'t str,
    /// Specifier after substitution.
    pub substituted: String,
}

impl AliasMatch<'_> {
    /// Package name when the substitution carries the `npm:` marker.
    ///
    /// The text after the first marker is returned verbatim, so
    /// `npm:concrete/thing` yields `concrete/thing`.
    pub fn npm_package(&self) -> Option<&str> {
        npm_package(&self.substituted)
    }
}

pub fn npm_package(specifier: &str) -> Option<&str> {
    specifier
        .find(NPM_MARKER)
        .map(|at| &specifier[at + NPM_MARKER.len()..])
}

/// Find the first alias in table order matching `specifier` and substitute it.
pub fn match_alias<'t>(table: &'t AliasTable, specifier: &str) -> Option<AliasMatch<'t>> {
    let segments: Vec<&str> = specifier.split('/').collect();

    table.entries().iter().find_map(|entry| {
        let at = entry.pattern().find(&segments)?;
        let substituted = splice(&segments, at, entry.pattern().len(), entry.target());
        tracing::trace!(specifier, alias = entry.alias(), %substituted, "alias matched");
        Some(AliasMatch {
            alias: entry.alias(),
            target: entry.target(),
            substituted,
        })
    })
}

/// Replace `len` segments starting at `at` with `target`.
///
/// A `./`-prefixed target spliced after other segments loses its `./` so
/// `a/utils` never becomes `a/./src/utils`. An empty target (the root
/// itself) contributes no segment at all.
fn splice(segments: &[&str], at: usize, len: usize, target: &str) -> String {
    let target = if at > 0 {
        target.strip_prefix("./").unwrap_or(target)
    } else {
        target
    };

    let mut parts: Vec<String> = Vec::with_capacity(3);
    if at > 0 {
        parts.push(segments[..at].join("/"));
    }
    if !target.is_empty() {
        parts.push(target.to_string());
    }
    if at + len < segments.len() {
        parts.push(segments[at + len..].join("/"));
    }
    parts.join("/")
}
