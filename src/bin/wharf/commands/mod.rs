//! Command implementations

pub mod completions;
pub mod files;
pub mod globs;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};
use wharf::{GlobKind, GlobPatternSet, GlobalContext, Project};

/// Open the project at `root`, or at the nearest package.json above cwd.
pub fn open_project(ctx: &GlobalContext, root: Option<&Path>) -> Result<Project> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => ctx.find_project_root().with_context(|| {
            format!(
                "could not find package.json in {} or any parent directory",
                ctx.cwd().display()
            )
        })?,
    };

    Project::open(Some(&root))
        .with_context(|| format!("failed to open project at {}", root.display()))
}

/// The pattern set for `kind`, from one workspace or the whole project.
pub fn select_set(project: &Project, kind: GlobKind, workspace: Option<&str>) -> Result<GlobPatternSet> {
    match workspace {
        Some(name) => {
            let ws = project.workspace(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "no workspace named `{}`\nhelp: Run `wharf show` to list workspaces",
                    name
                )
            })?;
            Ok(ws.globs().get(kind).clone())
        }
        None => Ok(project.all_globs().get(kind).clone()),
    }
}

/// Wrap `text` in bold when color is enabled.
pub fn bold(text: &str, color: bool) -> String {
    if color {
        format!("\x1b[1m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}
