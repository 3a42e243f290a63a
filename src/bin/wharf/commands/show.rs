//! `wharf show` command

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use super::{bold, open_project};
use crate::cli::ShowArgs;
use wharf::util::config::OutputFormat;
use wharf::util::fs::to_unix_path;
use wharf::{GlobalContext, Layout, Project};

pub fn execute(args: ShowArgs, ctx: &GlobalContext, root: Option<&Path>) -> Result<()> {
    let project = open_project(ctx, root)?;
    let config = ctx.load_config(project.root());

    if args.json || config.format() == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report(&project))?);
        return Ok(());
    }

    let color = ctx.color() && config.color();
    let manifest = project.manifest();

    println!(
        "{} {}",
        bold(manifest.name(), color),
        manifest.version().unwrap_or("(no version)")
    );
    println!("  root: {}", project.root().display());

    match project.layout() {
        Layout::Single { .. } => println!("  layout: single package"),
        Layout::Workspaces(workspaces) => {
            println!("  layout: {} workspaces", workspaces.len())
        }
    }

    for package in project.packages() {
        let location = package.source_location;
        println!();
        println!("{}", bold(package.manifest.name(), color));
        println!("  package: {}", location.package_root().display());
        println!(
            "  source:  {}{}",
            location.source_root().display(),
            if location.under_source_subfolder() {
                ""
            } else {
                " (package root)"
            }
        );
        println!("  output:  {}", location.output_root().display());
        println!("  tsconfig: {}", location.tsconfig().display());
        if package.manifest.uses_webpack() {
            println!("  webpack: yes");
        }
    }

    Ok(())
}

fn report(project: &Project) -> serde_json::Value {
    let packages: Vec<_> = project
        .packages()
        .into_iter()
        .map(|package| {
            let location = package.source_location;
            json!({
                "name": package.manifest.name(),
                "version": package.manifest.version(),
                "packageRoot": to_unix_path(location.package_root()),
                "sourceRoot": to_unix_path(location.source_root()),
                "outputRoot": to_unix_path(location.output_root()),
                "underSourceSubfolder": location.under_source_subfolder(),
                "usesWebpack": package.manifest.uses_webpack(),
                "globs": package.globs,
            })
        })
        .collect();

    json!({
        "root": to_unix_path(project.root()),
        "name": project.manifest().name(),
        "version": project.manifest().version(),
        "layout": match project.layout() {
            Layout::Single { .. } => "single",
            Layout::Workspaces(_) => "workspaces",
        },
        "packages": packages,
    })
}
