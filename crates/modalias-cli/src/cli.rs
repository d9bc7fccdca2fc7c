//! Command-line interface definition.
//!
//! - `modalias resolve <specifier> --from <file>` - resolve one specifier
//! - `modalias rewrite <files...>` - rewrite every import in the given files

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use modalias::Platform;

/// Resolve module aliases in JavaScript import specifiers
#[derive(Parser, Debug)]
#[command(
    name = "modalias",
    version,
    about = "Resolve module aliases in JavaScript import specifiers",
    long_about = "modalias rewrites aliased import specifiers (e.g. `utils/format`) into\n\
                  relative paths, absolute paths under a root, package names or\n\
                  platform-specific file variants."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub resolution: ResolutionArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that resolves specifiers.
#[derive(Args, Debug, Clone, Default)]
pub struct ResolutionArgs {
    /// Alias config file (.json or .toml)
    ///
    /// Without it, `modalias.toml` and then the `modalias` field of
    /// `package.json` in the current directory are tried.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Target platform for variant files; overrides TARGET_PLATFORM
    ///
    /// One of mobile, ios, android, windows, desktop, web.
    #[arg(long, global = true, value_name = "TAG", value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Ignore the configured root and always emit relative paths
    #[arg(long, global = true)]
    pub force_relative: bool,

    /// Honor the `autoimport:` specifier prefix
    #[arg(long, global = true)]
    pub auto_detect: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a single specifier
    ///
    /// Prints the rewritten specifier, `(unchanged)` or `(no module)`.
    Resolve(ResolveArgs),

    /// Rewrite import specifiers in source files
    ///
    /// Prints the edits for each file unless --write is given.
    Rewrite(RewriteArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Specifier as written in the import statement
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    /// File the import is written in
    #[arg(long, value_name = "FILE", default_value = "index.js")]
    pub from: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Source files to rewrite
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Write rewritten files back in place
    #[arg(long, conflicts_with = "check")]
    pub write: bool,

    /// Exit with an error if any file would change
    #[arg(long)]
    pub check: bool,
}

fn parse_platform(raw: &str) -> Result<Platform, String> {
    raw.parse().map_err(|e: modalias::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_parsing() {
        let cli = Cli::try_parse_from(["modalias", "resolve", "utils/x", "--from", "src/a.js"]).unwrap();
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.specifier, "utils/x");
                assert_eq!(args.from, PathBuf::from("src/a.js"));
                assert!(!args.json);
            }
            Command::Rewrite(_) => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_global_resolution_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "modalias",
            "rewrite",
            "a.js",
            "b.js",
            "--platform",
            "iOS",
            "--force-relative",
        ])
        .unwrap();

        assert_eq!(cli.resolution.platform, Some(Platform::Ios));
        assert!(cli.resolution.force_relative);
        assert!(!cli.resolution.auto_detect);
        match cli.command {
            Command::Rewrite(args) => assert_eq!(args.files.len(), 2),
            Command::Resolve(_) => panic!("expected rewrite"),
        }
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let result = Cli::try_parse_from(["modalias", "--platform", "linux", "resolve", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_conflicts_with_check() {
        let result = Cli::try_parse_from(["modalias", "rewrite", "a.js", "--write", "--check"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["modalias", "-v", "-q", "resolve", "x"]);
        assert!(result.is_err());
    }
}
