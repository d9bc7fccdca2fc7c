//! Error handling for the modalias CLI.
//!
//! `CliError` is what commands return; `ConfigError` covers finding and
//! parsing the alias config. Both carry a hint line where one helps, and are
//! turned into miette reports at the process boundary.

mod report;

use std::path::PathBuf;

use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config discovery or parsing failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resolution failed in the library
    #[error(transparent)]
    Resolve(#[from] modalias::Error),

    /// I/O error on a source file
    #[error("Failed to {action} {}: {source}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `rewrite --check` found files that would change
    #[error("{0} file(s) would be rewritten\n\nHint: Run with --write to apply the changes")]
    CheckFailed(usize),

    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors not tied to a particular file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias config errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config was found in any of the searched locations
    #[error("No alias config found (searched: {searched})\n\nHint: Create modalias.toml, add a \"modalias\" field to package.json, or pass --config <path>")]
    NotFound { searched: String },

    /// The explicitly requested config file does not exist
    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Extension is neither .json nor .toml
    #[error("Unsupported config format: {}\n\nHint: Use a .json or .toml file", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The file exists but could not be parsed
    #[error("Invalid config in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Options do not have an accepted shape
    #[error("{0}\n\nHint: Use {{ \"map\": [{{ \"expose\": \"utils\", \"src\": \"./src/utils\" }}] }}")]
    InvalidOptions(#[source] modalias::Error),

    /// Environment settings are invalid
    #[error("{0}\n\nHint: Check TARGET_PLATFORM and MODALIAS_* environment variables")]
    Settings(#[source] modalias::Error),

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
