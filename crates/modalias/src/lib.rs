//! # modalias
//!
//! Module alias resolution for JavaScript import specifiers.
//!
//! A project declares aliases (`utils` → `./src/mylib/subfolder/utils`) and
//! every `import`/`require` specifier that mentions an alias is rewritten
//! into a path the native module resolver understands: relative to the
//! importing file, absolute under a configured root, a plain package name
//! (`npm:` targets), or a platform-specific variant file such as
//! `button.desktop.js`.
//!
//! ## Architecture
//!
//! ```text
//!  AliasOptions ──build──▶ AliasTable ─────────────┐
//!  (json / toml)           (compiled, immutable)   │
//!                                                  ▼
//!  Settings ─────────────────────────────▶ ResolveSession ──▶ Resolution
//!  (TARGET_PLATFORM, MODALIAS_*)          │  replay guard      Rewrite / Unchanged / NoModule
//!                                         │
//!                        ┌────────────────┼─────────────────┐
//!                        ▼                ▼                 ▼
//!                   matcher          translate         DirectoryCache
//!                (segment match)   (relative/absolute)  (variant listings)
//! ```
//!
//! The [`rewrite`] module drives a session over a whole source file using
//! the oxc parser.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modalias::runtime::native::NativeRuntime;
//! use modalias::{AliasOptions, AliasTable, ResolveSession, Settings, rewrite_source};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = AliasOptions::from_value(serde_json::json!({
//!     "map": [
//!         { "expose": "utils", "src": "./src/utils" },
//!         { "expose": "abstract", "src": "npm:concrete" }
//!     ]
//! }))?;
//!
//! let runtime = NativeRuntime::new();
//! let settings = Settings::from_env()?;
//! let table = AliasTable::build(&options, &settings, &runtime)?;
//! let mut session = ResolveSession::new(settings, &runtime)?;
//!
//! let source = "import { fmt } from 'utils/format';\n";
//! let output = rewrite_source(&mut session, &table, Path::new("src/app.js"), source)?;
//! println!("{}", output.code);
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform variants
//!
//! With `react` enabled in the options (or an `autoimport:` specifier and
//! `MODALIAS_AUTO_DETECT`), the last path segment is swapped for the best
//! `<name>.<suffix>.js` file next to the target, following the fallback
//! chain of [`Platform`].

pub mod error;
pub mod listing;
pub mod matcher;
pub mod options;
pub mod platform;
pub mod resolver;
pub mod rewrite;
pub mod runtime;
pub mod settings;
pub mod table;
pub mod translate;

pub use error::{Error, Result};
pub use listing::DirectoryCache;
pub use matcher::{AliasMatch, NPM_MARKER, match_alias};
pub use options::{AliasMapping, AliasOptions};
pub use platform::{Platform, select_variant};
pub use resolver::{AUTO_DETECT_MARKER, Resolution, ResolveSession};
pub use rewrite::{Edit, RewriteOutput, rewrite_source};
pub use runtime::{Runtime, RuntimeError, RuntimeResult};
pub use settings::Settings;
pub use table::{AliasEntry, AliasTable};
pub use translate::map_to_relative;

#[cfg(not(target_family = "wasm"))]
pub use runtime::native::NativeRuntime;

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::memory::MemoryRuntime;
