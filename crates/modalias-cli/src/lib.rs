//! modalias CLI - resolve and rewrite aliased import specifiers.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - alias config discovery and settings layering
//! - [`commands`] - `resolve` and `rewrite`
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages on stderr

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
