//! `wharf completions` command

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};

/// Write the completion script for `args.shell` to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = env!("CARGO_BIN_NAME");

    let mut script = Vec::new();
    clap_complete::generate(args.shell, &mut cmd, bin_name, &mut script);
    tracing::debug!("generated {} completions ({} bytes)", args.shell, script.len());

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&script)
        .context("failed to write completions to stdout")?;
    stdout.flush().context("failed to flush stdout")
}
