//! Resolution orchestration.
//!
//! A specifier moves through these stages:
//!
//! ```text
//! raw ──▶ prefixes stripped ──┬──▶ npm passthrough ─────────────────────────▶ Rewrite(name)
//!  (npm:, autoimport:)        ├──▶ empty / "unknown" ───────────────────────▶ NoModule
//!                             ├──▶ no alias, bare name ─────────────────────▶ Unchanged
//!                             ├──▶ no alias, real path ──▶ [variant fixup] ──▶ Rewrite | Unchanged
//!                             └──▶ alias substituted ──▶ path mode ──▶ [variant] ──▶ Rewrite | Unchanged
//! ```
//!
//! [`ResolveSession`] owns the only state that outlives a call: the
//! directory-listing cache and the replay guard. One session serves one
//! transformation pass; independent passes use independent sessions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::listing::DirectoryCache;
use crate::matcher::{NPM_MARKER, match_alias};
use crate::runtime::Runtime;
use crate::settings::Settings;
use crate::table::AliasTable;
use crate::translate::PathTranslator;

/// Specifier prefix that opts a single import into platform variant lookup.
pub const AUTO_DETECT_MARKER: &str = "autoimport:";

/// Specifier that stands for "no module at all".
const UNKNOWN_SPECIFIER: &str = "unknown";

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Replace the literal with this specifier.
    Rewrite(String),
    /// Leave the literal as written.
    Unchanged,
    /// Nothing is left to resolve (empty, `npm:` alone, or `unknown`).
    NoModule,
}

impl Resolution {
    pub fn rewritten(&self) -> Option<&str> {
        match self {
            Self::Rewrite(specifier) => Some(specifier),
            Self::Unchanged | Self::NoModule => None,
        }
    }
}

/// A specifier with its recognized prefix markers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StrippedSpecifier<'s> {
    body: &'s str,
    npm: bool,
    auto_detect: bool,
}

impl<'s> StrippedSpecifier<'s> {
    fn parse(raw: &'s str, settings: &Settings) -> Self {
        let mut stripped = Self {
            body: raw,
            npm: false,
            auto_detect: false,
        };

        loop {
            if let Some(rest) = stripped.body.strip_prefix(NPM_MARKER) {
                stripped.body = rest;
                stripped.npm = true;
            } else if let Some(rest) = settings
                .auto_detect
                .then(|| strip_prefix_ignore_case(stripped.body, AUTO_DETECT_MARKER))
                .flatten()
            {
                stripped.body = rest;
                stripped.auto_detect = true;
            } else {
                return stripped;
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.body.is_empty() || self.body == UNKNOWN_SPECIFIER
    }

    fn is_path(&self) -> bool {
        self.body.starts_with('.') || self.body.starts_with('/')
    }
}

fn strip_prefix_ignore_case<'s>(text: &'s str, prefix: &str) -> Option<&'s str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

/// Last resolution, kept to stop a host from rewriting its own output.
#[derive(Debug, Clone)]
struct Replay {
    table: u64,
    input: String,
    output: Resolution,
}

/// Remembers only the immediately preceding call.
#[derive(Debug, Default)]
struct ReplayGuard {
    last: Option<Replay>,
}

impl ReplayGuard {
    /// A specifier equal to the previous call's rewrite, against the same
    /// table, is the host revisiting the node it just replaced.
    fn is_replay(&self, table: u64, input: &str) -> bool {
        self.last.as_ref().is_some_and(|last| {
            last.table == table && last.output.rewritten() == Some(input)
        })
    }

    fn record(&mut self, table: u64, input: &str, output: &Resolution) {
        self.last = Some(Replay {
            table,
            input: input.to_string(),
            output: output.clone(),
        });
    }

    fn last_input(&self) -> Option<&str> {
        self.last.as_ref().map(|last| last.input.as_str())
    }
}

/// State for one transformation pass.
///
/// # Example
///
/// ```rust,no_run
/// use modalias::runtime::native::NativeRuntime;
/// use modalias::{AliasMapping, AliasOptions, AliasTable, Resolution, ResolveSession, Settings};
/// use std::path::Path;
///
/// # fn main() -> modalias::Result<()> {
/// let runtime = NativeRuntime::new();
/// let settings = Settings::from_env()?;
/// let options = AliasOptions::new(vec![AliasMapping::new("utils", "./src/utils")]);
/// let table = AliasTable::build(&options, &settings, &runtime)?;
///
/// let mut session = ResolveSession::new(settings, &runtime)?;
/// match session.resolve(&table, Path::new("src/app.js"), "utils/format")? {
///     Resolution::Rewrite(specifier) => println!("rewrite to {specifier}"),
///     Resolution::Unchanged | Resolution::NoModule => {}
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ResolveSession<'r> {
    settings: Settings,
    runtime: &'r dyn Runtime,
    cwd: PathBuf,
    listings: Arc<DirectoryCache>,
    guard: ReplayGuard,
}

impl<'r> ResolveSession<'r> {
    /// Session with its own directory cache.
    pub fn new(settings: Settings, runtime: &'r dyn Runtime) -> Result<Self> {
        Self::with_directory_cache(settings, runtime, Arc::new(DirectoryCache::new()))
    }

    /// Session sharing a directory cache with other sessions.
    pub fn with_directory_cache(
        settings: Settings,
        runtime: &'r dyn Runtime,
        listings: Arc<DirectoryCache>,
    ) -> Result<Self> {
        let cwd = runtime.get_cwd()?;
        Ok(Self {
            settings,
            runtime,
            cwd,
            listings,
            guard: ReplayGuard::default(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn directory_cache(&self) -> &Arc<DirectoryCache> {
        &self.listings
    }

    /// Resolve `specifier`, written in `requesting_file`, against `table`.
    pub fn resolve(
        &mut self,
        table: &AliasTable,
        requesting_file: &Path,
        specifier: &str,
    ) -> Result<Resolution> {
        let resolution = if self.guard.is_replay(table.fingerprint(), specifier) {
            tracing::debug!(specifier, "specifier is the previous rewrite; leaving it");
            Resolution::Unchanged
        } else {
            self.resolve_fresh(table, requesting_file, specifier)?
        };

        self.guard.record(table.fingerprint(), specifier, &resolution);
        Ok(resolution)
    }

    fn resolve_fresh(
        &self,
        table: &AliasTable,
        requesting_file: &Path,
        raw: &str,
    ) -> Result<Resolution> {
        let stripped = StrippedSpecifier::parse(raw, &self.settings);
        if stripped.is_empty() {
            tracing::debug!(specifier = raw, "nothing left to resolve");
            return Ok(Resolution::NoModule);
        }

        if stripped.npm {
            tracing::debug!(specifier = raw, package = stripped.body, "npm passthrough");
            return Ok(Resolution::Rewrite(stripped.body.to_string()));
        }

        // Already resolved by an earlier absolute-mode pass.
        if table.is_absolute_mode() && Path::new(stripped.body).is_absolute() {
            return Ok(Resolution::Unchanged);
        }

        let variants = table.react() || stripped.auto_detect;
        let translator = self.translator();

        let Some(found) = match_alias(table, stripped.body) else {
            if !stripped.is_path() || !variants {
                tracing::debug!(specifier = raw, "no alias matched");
                return Ok(Self::finish(raw, stripped.body.to_string()));
            }
            let fixed = translator.fixup_in_place(requesting_file, stripped.body)?;
            return Ok(Self::finish(raw, fixed));
        };

        if let Some(package) = found.npm_package() {
            if package.is_empty() {
                return Ok(Resolution::NoModule);
            }
            tracing::debug!(specifier = raw, alias = found.alias, package, "alias maps to a package");
            return Ok(Resolution::Rewrite(package.to_string()));
        }

        // A target may carry the auto-detect marker itself.
        let (target, variants) = match self
            .settings
            .auto_detect
            .then(|| strip_prefix_ignore_case(&found.substituted, AUTO_DETECT_MARKER))
            .flatten()
        {
            Some(rest) => (rest, true),
            None => (found.substituted.as_str(), variants),
        };

        let translated = translator.translate(table, requesting_file, target, variants)?;
        tracing::debug!(specifier = raw, alias = found.alias, resolved = %translated, "alias resolved");
        Ok(Self::finish(raw, translated))
    }

    /// A result identical to what was written is not a rewrite.
    fn finish(raw: &str, resolved: String) -> Resolution {
        if resolved == raw {
            Resolution::Unchanged
        } else {
            Resolution::Rewrite(resolved)
        }
    }

    fn translator(&self) -> PathTranslator<'_> {
        PathTranslator {
            cwd: &self.cwd,
            platform: self.settings.platform,
            runtime: self.runtime,
            listings: &self.listings,
        }
    }

    /// Specifier passed to the previous `resolve` call, if any.
    pub fn last_specifier(&self) -> Option<&str> {
        self.guard.last_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_npm_marker() {
        let s = StrippedSpecifier::parse("npm:left-pad", &Settings::default());
        assert_eq!(s.body, "left-pad");
        assert!(s.npm);
        assert!(!s.auto_detect);
    }

    #[test]
    fn auto_detect_marker_needs_setting() {
        let off = StrippedSpecifier::parse("autoimport:mock/test", &Settings::default());
        assert_eq!(off.body, "autoimport:mock/test");
        assert!(!off.auto_detect);

        let settings = Settings::default().with_auto_detect(true);
        let on = StrippedSpecifier::parse("AutoImport:mock/test", &settings);
        assert_eq!(on.body, "mock/test");
        assert!(on.auto_detect);
    }

    #[test]
    fn markers_combine() {
        let settings = Settings::default().with_auto_detect(true);
        let s = StrippedSpecifier::parse("autoimport:npm:react", &settings);
        assert_eq!(s.body, "react");
        assert!(s.npm && s.auto_detect);
    }

    #[test]
    fn empty_and_unknown_are_empty() {
        assert!(StrippedSpecifier::parse("npm:", &Settings::default()).is_empty());
        assert!(StrippedSpecifier::parse("unknown", &Settings::default()).is_empty());
        assert!(!StrippedSpecifier::parse("unknown-lib", &Settings::default()).is_empty());
    }

    #[test]
    fn replay_guard_only_catches_previous_output() {
        let mut guard = ReplayGuard::default();
        assert!(!guard.is_replay(1, "./src/utils"));

        guard.record(1, "utils", &Resolution::Rewrite("./src/utils".to_string()));
        assert!(guard.is_replay(1, "./src/utils"));
        assert!(!guard.is_replay(2, "./src/utils"));
        assert!(!guard.is_replay(1, "utils"));

        guard.record(1, "./src/utils", &Resolution::Unchanged);
        assert!(!guard.is_replay(1, "./src/utils"));
    }
}
