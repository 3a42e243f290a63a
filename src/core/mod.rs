//! Core data structures for wharf.
//!
//! This module contains the project model, leaf-first:
//! - Manifests (package.json)
//! - Glob rules and pattern sets
//! - Source location resolution
//! - Workspaces and the project that owns them

pub mod errors;
pub mod globs;
pub mod manifest;
pub mod project;
pub mod source_location;
pub mod workspace;

pub use errors::{ProjectError, Result};
pub use globs::{GlobKind, GlobMatcher, GlobPattern, GlobPatternSet, Globs};
pub use manifest::{Manifest, PackageMetadata, MANIFEST_NAME};
pub use project::{Layout, PackageView, Project};
pub use source_location::{SourceLocation, OUTPUT_FOLDER_NAME, SOURCE_FOLDER_NAMES};
pub use workspace::Workspace;
