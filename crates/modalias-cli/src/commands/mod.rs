//! Command implementations.
//!
//! - [`resolve`] - resolve a single specifier
//! - [`rewrite`] - rewrite import specifiers in source files
//!
//! Each command exposes an `execute` function taking its parsed arguments
//! plus the shared resolution flags.

pub mod resolve;
pub mod rewrite;

use std::path::PathBuf;

use modalias::{AliasTable, NativeRuntime, Settings};

use crate::cli::ResolutionArgs;
use crate::config::{ConfigDiscovery, load_settings};
use crate::error::Result;

pub use resolve::execute as resolve_execute;
pub use rewrite::execute as rewrite_execute;

/// Everything a command needs to start resolving.
pub(crate) struct Context {
    pub cwd: PathBuf,
    pub runtime: NativeRuntime,
    pub settings: Settings,
    pub table: AliasTable,
}

impl Context {
    pub(crate) fn load(args: &ResolutionArgs) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let options = ConfigDiscovery::new(&cwd).load(args.config.as_deref())?;
        let settings = load_settings(args)?;
        let runtime = NativeRuntime::new();
        let table = AliasTable::build(&options, &settings, &runtime)?;

        tracing::debug!(
            aliases = table.entries().len(),
            absolute = table.is_absolute_mode(),
            platform = %settings.platform,
            "alias table ready"
        );
        Ok(Self {
            cwd,
            runtime,
            settings,
            table,
        })
    }
}
