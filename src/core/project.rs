//! Project - the top-level model of a source tree.
//!
//! Opening a project loads the root package.json and either expands its
//! `workspaces` declarations into [`Workspace`]s or resolves a single
//! package layout. Everything is computed eagerly; a project that opens
//! successfully is complete and immutable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::Serialize;

use crate::core::errors::{ProjectError, Result};
use crate::core::globs::Globs;
use crate::core::manifest::{Manifest, MANIFEST_NAME};
use crate::core::source_location::SourceLocation;
use crate::core::workspace::Workspace;
use crate::util::fs::{normalize_path, to_unix_path};

/// Which part of the model is authoritative for source locations.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// No workspaces: the root package is the only package.
    Single {
        source_location: SourceLocation,
        globs: Globs,
    },
    /// Each workspace carries its own source location and globs.
    Workspaces(Vec<Workspace>),
}

/// A borrowed view of one package, whichever layout it comes from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PackageView<'a> {
    #[serde(serialize_with = "serialize_manifest_name")]
    pub manifest: &'a Manifest,
    pub source_location: &'a SourceLocation,
    pub globs: &'a Globs,
}

fn serialize_manifest_name<S: serde::Serializer>(
    manifest: &&Manifest,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(manifest.name())
}

/// A project rooted at a directory containing a package.json.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Absolute, canonical project root
    root: PathBuf,

    /// The root package.json
    manifest: Manifest,

    /// Single package or workspaces
    layout: Layout,
}

impl Project {
    /// Open the project at `root`, or at the current directory.
    pub fn open(root: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| ProjectError::io(".", e))?;
        let root = match root {
            Some(root) if root.is_absolute() => root.to_path_buf(),
            Some(root) => cwd.join(root),
            None => cwd,
        };

        if !root.exists() {
            return Err(ProjectError::NoManifest {
                path: root.join(MANIFEST_NAME),
            });
        }
        if !root.is_dir() {
            return Err(ProjectError::NotADirectory { path: root });
        }

        let root = normalize_path(&root);
        let manifest = Manifest::load_from_dir(&root)?;

        let workspaces = if manifest.has_workspaces() {
            expand_workspaces(&root, manifest.workspace_patterns())?
        } else {
            Vec::new()
        };

        let layout = if workspaces.is_empty() {
            if manifest.has_workspaces() {
                tracing::warn!(
                    "no workspace of {} resolved to a package; treating it as a single package",
                    manifest.path().display()
                );
            }
            let source_location = SourceLocation::resolve(&root);
            let globs = Globs::for_location(&root, &source_location, manifest.uses_webpack())?;
            Layout::Single {
                source_location,
                globs,
            }
        } else {
            Layout::Workspaces(workspaces)
        };

        tracing::debug!(
            "opened project `{}` at {} ({} workspaces)",
            manifest.name(),
            root.display(),
            match &layout {
                Layout::Single { .. } => 0,
                Layout::Workspaces(ws) => ws.len(),
            }
        );

        Ok(Project {
            root,
            manifest,
            layout,
        })
    }

    /// Get the project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the root manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Get the layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Workspaces in declaration order; empty for a single package.
    pub fn workspaces(&self) -> &[Workspace] {
        match &self.layout {
            Layout::Single { .. } => &[],
            Layout::Workspaces(workspaces) => workspaces,
        }
    }

    /// Whether the project has at least one workspace.
    pub fn has_workspaces(&self) -> bool {
        !self.workspaces().is_empty()
    }

    /// Find a workspace by package name.
    pub fn workspace(&self, name: &str) -> Option<&Workspace> {
        self.workspaces().iter().find(|ws| ws.name() == name)
    }

    /// The project-level source location; `None` when there are workspaces.
    pub fn source_location(&self) -> Option<&SourceLocation> {
        match &self.layout {
            Layout::Single {
                source_location, ..
            } => Some(source_location),
            Layout::Workspaces(_) => None,
        }
    }

    /// The project-level globs; `None` when there are workspaces.
    pub fn globs(&self) -> Option<&Globs> {
        match &self.layout {
            Layout::Single { globs, .. } => Some(globs),
            Layout::Workspaces(_) => None,
        }
    }

    /// The root tsconfig.json; `None` when there are workspaces.
    pub fn tsconfig(&self) -> Option<PathBuf> {
        self.source_location().map(SourceLocation::tsconfig)
    }

    /// Every package of the project: the root package alone, or each
    /// workspace in order.
    pub fn packages(&self) -> Vec<PackageView<'_>> {
        match &self.layout {
            Layout::Single {
                source_location,
                globs,
            } => vec![PackageView {
                manifest: &self.manifest,
                source_location,
                globs,
            }],
            Layout::Workspaces(workspaces) => workspaces
                .iter()
                .map(|ws| PackageView {
                    manifest: ws.manifest(),
                    source_location: ws.source_location(),
                    globs: ws.globs(),
                })
                .collect(),
        }
    }

    /// Union of the glob sets of every package.
    pub fn all_globs(&self) -> Globs {
        match &self.layout {
            Layout::Single { globs, .. } => globs.clone(),
            Layout::Workspaces(workspaces) => {
                let mut all = Globs::default();
                for ws in workspaces {
                    all.merge(ws.globs());
                }
                all
            }
        }
    }
}

/// Expand `workspaces` declarations into workspaces, in declaration order.
fn expand_workspaces(root: &Path, patterns: &[String]) -> Result<Vec<Workspace>> {
    let mut workspaces: Vec<Workspace> = Vec::new();
    let mut names: HashMap<String, PathBuf> = HashMap::new();

    for pattern in patterns {
        let dirs = if is_glob(pattern) {
            expand_glob(root, pattern)?
        } else {
            vec![resolve_literal(root, pattern)?]
        };

        for dir in dirs {
            if workspaces.iter().any(|ws| ws.root() == dir) {
                tracing::debug!("{} already declared, skipping", dir.display());
                continue;
            }

            let workspace = Workspace::new(root, &dir)
                .map_err(|e| ProjectError::invalid_workspace(pattern.as_str(), e))?;

            if let Some(existing) = names.get(workspace.name()) {
                return Err(ProjectError::invalid_workspace(
                    pattern.as_str(),
                    format!(
                        "package name `{}` is already used by {}",
                        workspace.name(),
                        existing.display()
                    ),
                ));
            }
            names.insert(workspace.name().to_string(), dir);
            workspaces.push(workspace);
        }
    }

    Ok(workspaces)
}

fn is_glob(pattern: &str) -> bool {
    pattern
        .chars()
        .any(|c| matches!(c, '*' | '?' | '[' | ']' | '{' | '}' | '!'))
}

/// A literal entry must be an existing directory.
fn resolve_literal(root: &Path, entry: &str) -> Result<PathBuf> {
    let path = root.join(entry);
    if !path.exists() {
        return Err(ProjectError::invalid_workspace(
            entry,
            format!("`{}` does not exist", path.display()),
        ));
    }
    if !path.is_dir() {
        return Err(ProjectError::invalid_workspace(
            entry,
            ProjectError::NotADirectory { path },
        ));
    }
    Ok(normalize_path(&path))
}

/// Expand a glob entry to the sorted directories holding a manifest.
///
/// Dot-directories and anything inside `node_modules` never become
/// workspaces.
fn expand_glob(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        Pattern::escape(to_unix_path(root).trim_end_matches('/')),
        pattern.trim_start_matches("./")
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let paths = glob::glob_with(&full, options)
        .map_err(|e| ProjectError::invalid_workspace(pattern, e))?;

    let mut dirs = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| ProjectError::invalid_workspace(pattern, e))?;
        if is_installed_dependency(root, &path) {
            tracing::debug!("{} is inside node_modules, skipping", path.display());
            continue;
        }
        if !path.is_dir() {
            tracing::debug!("{} is not a directory, skipping", path.display());
            continue;
        }
        if !path.join(MANIFEST_NAME).is_file() {
            tracing::debug!("{} has no {}, skipping", path.display(), MANIFEST_NAME);
            continue;
        }
        dirs.push(normalize_path(&path));
    }

    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}

fn is_installed_dependency(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_os_str() == "node_modules")
}
