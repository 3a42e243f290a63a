//! `wharf globs` command
//!
//! Prints includes as-is and excludes prefixed with `!`, the form most
//! globbing consumers accept.

use std::path::Path;

use anyhow::Result;

use super::{open_project, select_set};
use crate::cli::GlobsArgs;
use wharf::util::config::OutputFormat;
use wharf::{GlobKind, GlobalContext};

pub fn execute(args: GlobsArgs, ctx: &GlobalContext, root: Option<&Path>) -> Result<()> {
    let project = open_project(ctx, root)?;
    let config = ctx.load_config(project.root());
    let kind = GlobKind::from(args.set);

    let set = select_set(&project, kind, args.workspace.as_deref())?;
    tracing::debug!(
        "{} set: {} includes, {} excludes",
        kind,
        set.includes.len(),
        set.excludes.len()
    );

    if args.json || config.format() == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    let absolute = args.absolute || config.absolute();
    for pattern in &set.includes {
        println!("{}", if absolute { &pattern.absolute } else { &pattern.relative });
    }
    for pattern in &set.excludes {
        println!("!{}", if absolute { &pattern.absolute } else { &pattern.relative });
    }

    Ok(())
}
