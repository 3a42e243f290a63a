//! Wharf - a project model for JavaScript/TypeScript monorepos
//!
//! This crate discovers a project's root package.json, expands its yarn
//! workspaces, and derives for every package where sources live, where
//! output goes, and which glob patterns select source, static, test and
//! test-setup files. Task runners, test-runner hosts and bundler
//! configuration read this model; it never writes to the filesystem.

pub mod core;
pub mod testing;
pub mod util;

/// Test fixtures for wharf unit tests.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    errors::{ProjectError, Result},
    globs::{GlobKind, GlobPattern, GlobPatternSet, Globs},
    manifest::Manifest,
    project::{Layout, Project},
    source_location::SourceLocation,
    workspace::Workspace,
};

pub use util::context::GlobalContext;
