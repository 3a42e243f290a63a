//! Errors raised while building the project model.
//!
//! Every variant is fatal for the construction attempt that produced it.
//! Nothing in `core` catches these; the CLI reports them at the top level.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the project model.
pub type Result<T, E = ProjectError> = std::result::Result<T, E>;

/// Failure to construct a [`Project`](crate::core::Project) or one of its parts.
#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    /// No `package.json` where one was required.
    #[error("could not find package.json at `{}`", .path.display())]
    #[diagnostic(
        code(wharf::manifest::not_found),
        help("Every project and workspace root needs a package.json")
    )]
    NoManifest { path: PathBuf },

    /// A `package.json` exists but is not a well-formed manifest.
    #[error("failed to parse `{}`: {cause}", .path.display())]
    #[diagnostic(code(wharf::manifest::parse))]
    ManifestParse { path: PathBuf, cause: String },

    /// A declared workspace entry did not resolve to a package directory.
    #[error(
        "invalid workspace `{pattern}`{}",
        .cause.as_ref().map(|c| format!(": {c}")).unwrap_or_default()
    )]
    #[diagnostic(
        code(wharf::workspace::invalid),
        help("Check the `workspaces` field of the root package.json")
    )]
    InvalidWorkspace {
        pattern: String,
        cause: Option<String>,
    },

    /// A generated or supplied pattern is not a valid glob.
    #[error("`{pattern}` is not a valid glob pattern: {cause}")]
    #[diagnostic(code(wharf::glob::invalid))]
    InvalidGlobPattern { pattern: String, cause: String },

    /// A path that must be a directory is something else.
    #[error("`{}` is not a directory", .path.display())]
    #[diagnostic(code(wharf::path::not_a_directory))]
    NotADirectory { path: PathBuf },

    /// Filesystem failure while inspecting the tree.
    #[error("failed to read `{}`", .path.display())]
    #[diagnostic(code(wharf::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProjectError {
    /// Wrap any error as the cause of an invalid workspace entry.
    pub(crate) fn invalid_workspace(pattern: impl Into<String>, cause: impl ToString) -> Self {
        ProjectError::InvalidWorkspace {
            pattern: pattern.into(),
            cause: Some(cause.to_string()),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ProjectError::Io {
            path: path.into(),
            source,
        }
    }
}
