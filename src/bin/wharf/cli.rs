//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use wharf::GlobKind;

/// Wharf - inspect the project model of a JavaScript/TypeScript monorepo
#[derive(Parser)]
#[command(name = "wharf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to the nearest directory with a package.json)
    #[arg(long, global = true, env = "WHARF_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the project layout and its packages
    Show(ShowArgs),

    /// Print the glob patterns of a file set
    Globs(GlobsArgs),

    /// List the files a file set selects
    Files(FilesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// File sets that can be selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileSet {
    /// Compilable source files
    Sources,
    /// Files copied verbatim to the output
    Static,
    /// Specification files
    Tests,
    /// Specification setup files under `given` folders
    TestSetup,
    /// Everything in the output folder
    Compiled,
    /// Compiled specifications
    CompiledTests,
}

impl From<FileSet> for GlobKind {
    fn from(set: FileSet) -> Self {
        match set {
            FileSet::Sources => GlobKind::SourceFiles,
            FileSet::Static => GlobKind::StaticFiles,
            FileSet::Tests => GlobKind::TestFiles,
            FileSet::TestSetup => GlobKind::TestSetupFiles,
            FileSet::Compiled => GlobKind::CompiledFiles,
            FileSet::CompiledTests => GlobKind::CompiledTests,
        }
    }
}

#[derive(Args)]
pub struct ShowArgs {
    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct GlobsArgs {
    /// File set to print
    #[arg(value_enum)]
    pub set: FileSet,

    /// Only this workspace (by package name)
    #[arg(short, long)]
    pub workspace: Option<String>,

    /// Print absolute patterns
    #[arg(long)]
    pub absolute: bool,

    /// Emit JSON with both relative and absolute patterns
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FilesArgs {
    /// File set to expand
    #[arg(value_enum)]
    pub set: FileSet,

    /// Only this workspace (by package name)
    #[arg(short, long)]
    pub workspace: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
