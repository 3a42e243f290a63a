//! Wharf CLI - inspect the project model of a JavaScript/TypeScript monorepo

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use wharf::util::GlobalContext;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("wharf=debug")
    } else {
        EnvFilter::new("wharf=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    let root = cli.root.as_deref();

    // Execute command
    match cli.command {
        Commands::Show(args) => commands::show::execute(args, &ctx, root),
        Commands::Globs(args) => commands::globs::execute(args, &ctx, root),
        Commands::Files(args) => commands::files::execute(args, &ctx, root),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
