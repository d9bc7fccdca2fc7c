//! Logging setup for the CLI.
//!
//! The library emits `tracing` events for every resolution decision; this
//! module installs the subscriber that shows them.
//!
//! # Example
//!
//! ```rust,no_run
//! use modalias_cli::logger::init_logger;
//!
//! init_logger(true, false, false);
//! tracing::debug!("resolution decisions are now visible");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "modalias=debug,modalias_cli=debug";
const QUIET_FILTER: &str = "modalias=error,modalias_cli=error";
const DEFAULT_FILTER: &str = "modalias=info,modalias_cli=info";

/// Install the global subscriber. Call once, before any logging.
///
/// Level precedence: `--verbose` (debug), `--quiet` (errors only),
/// `RUST_LOG`, then info.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Whether stderr output should be colored.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use serial_test::serial;

    #[test]
    fn test_filters_parse() {
        let _ = EnvFilter::new(VERBOSE_FILTER);
        let _ = EnvFilter::new(QUIET_FILTER);
        let _ = EnvFilter::new(DEFAULT_FILTER);
    }

    #[test]
    #[serial]
    fn test_no_color_wins_over_force_color() {
        Jail::expect_with(|jail| {
            jail.set_env("NO_COLOR", "1");
            jail.set_env("FORCE_COLOR", "1");
            assert!(!should_use_colors());
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_force_color() {
        Jail::expect_with(|jail| {
            jail.set_env("FORCE_COLOR", "1");
            if std::env::var_os("NO_COLOR").is_none() {
                assert!(should_use_colors());
            }
            Ok(())
        });
    }
}
