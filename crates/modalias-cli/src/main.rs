//! modalias CLI entry point.

use clap::Parser;
use miette::Result;
use modalias_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.no_color, args.quiet);

    let result = match args.command {
        cli::Command::Resolve(resolve_args) => commands::resolve_execute(resolve_args, &args.resolution),
        cli::Command::Rewrite(rewrite_args) => commands::rewrite_execute(rewrite_args, &args.resolution),
    };

    result.map_err(error::cli_error_to_miette)
}
