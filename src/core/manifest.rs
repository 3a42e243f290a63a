//! package.json manifest parsing.
//!
//! Only the fields the project model needs are typed. Everything else is
//! kept as opaque JSON so a manifest can be written back unchanged, but the
//! model never reads it.

use std::path::{Path, PathBuf};

use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::{ProjectError, Result};

/// File name of a package manifest.
pub const MANIFEST_NAME: &str = "package.json";

/// Bundler configuration whose presence marks a webpack package.
pub const WEBPACK_CONFIG_NAME: &str = "webpack.config.js";

/// The `workspaces` field, in either of the shapes yarn accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkspacesField {
    /// `"workspaces": ["packages/*"]`
    Paths(Vec<String>),
    /// `"workspaces": { "packages": ["packages/*"], "nohoist": [...] }`
    Config {
        #[serde(default)]
        packages: Vec<String>,
        #[serde(flatten)]
        other: Map<String, Value>,
    },
}

impl WorkspacesField {
    /// The declared path-or-glob entries, in declaration order.
    pub fn patterns(&self) -> &[String] {
        match self {
            WorkspacesField::Paths(paths) => paths,
            WorkspacesField::Config { packages, .. } => packages,
        }
    }
}

/// Typed view of a package.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    /// Package name
    pub name: String,

    /// Package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// The `private` field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    /// Declared yarn workspaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<WorkspacesField>,

    /// Explicit opt-in to the webpack pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_webpack: Option<bool>,

    /// Fields the model does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A loaded package manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Absolute path to the package.json
    path: PathBuf,

    /// The parsed content
    metadata: PackageMetadata,

    /// Whether a webpack config sits next to the manifest
    has_webpack_config: bool,
}

impl Manifest {
    /// Load a manifest from a package.json path.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ProjectError::NoManifest {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;

        let mut manifest = Self::parse(&content, path)?;
        manifest.has_webpack_config = manifest.dir().join(WEBPACK_CONFIG_NAME).is_file();
        Ok(manifest)
    }

    /// Load `<dir>/package.json`.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load(&dir.join(MANIFEST_NAME))
    }

    /// Parse manifest content without touching the filesystem.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let metadata: PackageMetadata =
            serde_json::from_str(content).map_err(|e| ProjectError::ManifestParse {
                path: path.to_path_buf(),
                cause: e.to_string(),
            })?;

        if metadata.name.trim().is_empty() {
            return Err(ProjectError::ManifestParse {
                path: path.to_path_buf(),
                cause: "`name` must not be empty".to_string(),
            });
        }

        if let Some(workspaces) = &metadata.workspaces {
            if workspaces.patterns().is_empty() {
                tracing::warn!(
                    "{} declares an empty `workspaces` list; treating it as a single package",
                    path.display()
                );
            }
        }

        Ok(Manifest {
            path: path.to_path_buf(),
            metadata,
            has_webpack_config: false,
        })
    }

    /// Absolute path to the package.json.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// The parsed manifest content.
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Package version string, if declared.
    pub fn version(&self) -> Option<&str> {
        self.metadata.version.as_deref()
    }

    /// Parse the version as semver, if declared.
    pub fn semver(&self) -> Option<std::result::Result<Version, semver::Error>> {
        self.version().map(|v| v.parse())
    }

    /// Whether the package is marked private.
    pub fn is_private(&self) -> bool {
        self.metadata.private == Some(true)
    }

    /// Whether the `workspaces` field is present and non-empty.
    pub fn has_workspaces(&self) -> bool {
        !self.workspace_patterns().is_empty()
    }

    /// Declared workspace entries, empty when there are none.
    pub fn workspace_patterns(&self) -> &[String] {
        self.metadata
            .workspaces
            .as_ref()
            .map(WorkspacesField::patterns)
            .unwrap_or(&[])
    }

    /// Whether the package is built through webpack instead of the plain
    /// compile-and-copy pipeline.
    pub fn uses_webpack(&self) -> bool {
        self.metadata.uses_webpack.unwrap_or(self.has_webpack_config)
    }

    /// Serialize back to JSON, unrecognized fields included.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.metadata)
    }
}
