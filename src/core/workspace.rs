//! Workspace - one buildable package inside a multi-package project.
//!
//! A Workspace owns its manifest, its resolved source location and the glob
//! sets derived from them. Workspaces are only created while a
//! [`Project`](crate::core::Project) is opened.

use std::path::Path;

use crate::core::errors::Result;
use crate::core::globs::Globs;
use crate::core::manifest::Manifest;
use crate::core::source_location::SourceLocation;

/// A yarn workspace package.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    /// The workspace's own package.json
    manifest: Manifest,

    /// Source and output roots
    source_location: SourceLocation,

    /// Glob sets, relative to the project root
    globs: Globs,
}

impl Workspace {
    /// Build the workspace rooted at `package_root`.
    ///
    /// `project_root` anchors the relative half of every glob pattern.
    pub(crate) fn new(project_root: &Path, package_root: &Path) -> Result<Self> {
        let manifest = Manifest::load_from_dir(package_root)?;
        let source_location = SourceLocation::resolve(package_root);
        let globs = Globs::for_location(project_root, &source_location, manifest.uses_webpack())?;

        tracing::debug!(
            "workspace `{}` at {}",
            manifest.name(),
            package_root.display()
        );

        Ok(Workspace {
            manifest,
            source_location,
            globs,
        })
    }

    /// Get the manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        self.manifest.name()
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        self.source_location.package_root()
    }

    /// Get the source location.
    pub fn source_location(&self) -> &SourceLocation {
        &self.source_location
    }

    /// Get the glob sets.
    pub fn globs(&self) -> &Globs {
        &self.globs
    }

    /// Whether this workspace is built through webpack.
    pub fn uses_webpack(&self) -> bool {
        self.manifest.uses_webpack()
    }
}
