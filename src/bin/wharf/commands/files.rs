//! `wharf files` command

use std::path::Path;

use anyhow::Result;

use super::{open_project, select_set};
use crate::cli::FilesArgs;
use wharf::util::fs::{collect_files, relative_path, to_unix_path};
use wharf::{GlobKind, GlobalContext};

pub fn execute(args: FilesArgs, ctx: &GlobalContext, root: Option<&Path>) -> Result<()> {
    let project = open_project(ctx, root)?;
    let kind = GlobKind::from(args.set);

    let set = select_set(&project, kind, args.workspace.as_deref())?;
    let matcher = set.matcher()?;

    let search_root = match args.workspace.as_deref().and_then(|name| project.workspace(name)) {
        Some(ws) => ws.root(),
        None => project.root(),
    };

    let files = collect_files(project.root(), search_root, &matcher)?;
    tracing::debug!("{} {} files under {}", files.len(), kind, search_root.display());

    for file in files {
        println!("{}", to_unix_path(&relative_path(project.root(), &file)));
    }

    Ok(())
}
