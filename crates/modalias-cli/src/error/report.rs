//! Miette report conversion for CLI errors.

use miette::Report;

use crate::error::CliError;

/// Convert a `CliError` into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Resolve(modalias::Error::Parse { path, message }) => {
            miette::miette!(
                "Failed to parse {}: {}\n\nHint: Only JavaScript and TypeScript sources can be rewritten",
                path.display(),
                message
            )
        }
        CliError::Resolve(modalias::Error::DirectoryRead { dir, source }) => {
            miette::miette!(
                "Failed to list {} for platform variants: {}\n\nHint: Check that the alias target directory exists",
                dir.display(),
                source
            )
        }
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}
