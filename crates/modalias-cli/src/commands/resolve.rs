//! `modalias resolve` - resolve one specifier and print the result.

use std::path::PathBuf;

use modalias::{Resolution, ResolveSession};
use serde::Serialize;

use crate::cli::{ResolutionArgs, ResolveArgs};
use crate::commands::Context;
use crate::error::Result;
use crate::ui;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Rewrite,
    Unchanged,
    NoModule,
}

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    specifier: &'a str,
    from: PathBuf,
    status: Status,
    resolved: Option<&'a str>,
}

impl<'a> ResolveReport<'a> {
    fn new(args: &'a ResolveArgs, resolution: &'a Resolution) -> Self {
        let status = match resolution {
            Resolution::Rewrite(_) => Status::Rewrite,
            Resolution::Unchanged => Status::Unchanged,
            Resolution::NoModule => Status::NoModule,
        };
        Self {
            specifier: &args.specifier,
            from: args.from.clone(),
            status,
            resolved: resolution.rewritten(),
        }
    }
}

/// Execute the resolve command.
pub fn execute(args: ResolveArgs, resolution_args: &ResolutionArgs) -> Result<()> {
    let context = Context::load(resolution_args)?;
    let mut session = ResolveSession::new(context.settings.clone(), &context.runtime)?;
    let resolution = session.resolve(&context.table, &args.from, &args.specifier)?;

    if args.json {
        let report = ResolveReport::new(&args, &resolution);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &resolution {
        Resolution::Rewrite(specifier) => println!("{specifier}"),
        Resolution::Unchanged => println!("{}", ui::dim("(unchanged)")),
        Resolution::NoModule => println!("{}", ui::dim("(no module)")),
    }
    Ok(())
}
