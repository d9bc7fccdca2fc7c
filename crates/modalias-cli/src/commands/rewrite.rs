//! `modalias rewrite` - rewrite import specifiers in source files.
//!
//! Files are processed in parallel. Each file gets its own resolve session
//! (and so its own replay guard); directory listings are shared.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use modalias::{AliasTable, DirectoryCache, ResolveSession, RewriteOutput, Runtime, Settings, rewrite_source};
use rayon::prelude::*;

use crate::cli::{ResolutionArgs, RewriteArgs};
use crate::commands::Context;
use crate::error::{CliError, Result};
use crate::ui;

#[derive(Debug)]
struct FileOutcome {
    path: PathBuf,
    output: RewriteOutput,
}

/// Execute the rewrite command.
pub fn execute(args: RewriteArgs, resolution_args: &ResolutionArgs) -> Result<()> {
    let context = Context::load(resolution_args)?;
    let listings = Arc::new(DirectoryCache::new());

    let outcomes = args
        .files
        .par_iter()
        .map(|path| {
            rewrite_file(
                path,
                &context.table,
                &context.settings,
                &context.runtime,
                &listings,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let changed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.output.changed()).collect();

    if args.check {
        for outcome in &changed {
            ui::warning(&format!("{} would be rewritten", display(&context.cwd, &outcome.path)));
        }
        if !changed.is_empty() {
            return Err(CliError::CheckFailed(changed.len()));
        }
        ui::success(&format!("{} file(s) already resolved", outcomes.len()));
        return Ok(());
    }

    if args.write {
        for outcome in &changed {
            fs::write(&outcome.path, &outcome.output.code).map_err(|source| CliError::File {
                action: "write",
                path: outcome.path.clone(),
                source,
            })?;
            ui::success(&format!(
                "{} ({} specifier(s))",
                display(&context.cwd, &outcome.path),
                outcome.output.edits.len()
            ));
        }
    } else {
        for outcome in &changed {
            println!("{}", display(&context.cwd, &outcome.path));
            for edit in &outcome.output.edits {
                println!("  {} -> {}", edit.original, edit.replacement);
            }
        }
    }

    ui::info(&format!(
        "{} of {} file(s) {}",
        changed.len(),
        outcomes.len(),
        if args.write { "rewritten" } else { "need rewriting" }
    ));
    Ok(())
}

fn rewrite_file(
    path: &Path,
    table: &AliasTable,
    settings: &Settings,
    runtime: &dyn Runtime,
    listings: &Arc<DirectoryCache>,
) -> Result<FileOutcome> {
    let source = fs::read_to_string(path).map_err(|source| CliError::File {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;

    let mut session = ResolveSession::with_directory_cache(settings.clone(), runtime, Arc::clone(listings))?;
    let output = rewrite_source(&mut session, table, path, &source)?;
    tracing::debug!(path = %path.display(), edits = output.edits.len(), "file processed");

    Ok(FileOutcome {
        path: path.to_path_buf(),
        output,
    })
}

fn display(cwd: &Path, path: &Path) -> String {
    path.strip_prefix(cwd).unwrap_or(path).display().to_string()
}
