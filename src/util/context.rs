//! Global context for CLI operations.
//!
//! Carries the working directory, verbosity and color settings, and finds
//! the project root when none is given explicitly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::errors::ProjectError;
use crate::core::manifest::MANIFEST_NAME;
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            verbose: false,
            color: true,
        }
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find the nearest package.json starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ProjectError> {
        let mut current = self.cwd.clone();
        loop {
            let candidate = current.join(MANIFEST_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !current.pop() {
                return Err(ProjectError::NoManifest {
                    path: self.cwd.join(MANIFEST_NAME),
                });
            }
        }
    }

    /// Find the project root (directory containing the nearest package.json).
    pub fn find_project_root(&self) -> Result<PathBuf, ProjectError> {
        self.find_manifest().map(|p| {
            p.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.cwd.clone())
        })
    }

    /// Load global and project configuration for `project_root`.
    pub fn load_config(&self, project_root: &Path) -> Config {
        let global = config::global_config_path();
        config::load_config(global.as_deref(), &config::project_config_path(project_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.color());
        assert!(!ctx.is_verbose());
    }

    #[test]
    fn test_find_manifest_in_cwd() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("package.json");
        std::fs::write(&manifest, r#"{ "name": "app" }"#).unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert_eq!(ctx.find_manifest().ok(), Some(manifest));
    }

    #[test]
    fn test_find_manifest_searches_upward() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        let nested = tmp.path().join("Source/features/for_thing");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested);
        assert_eq!(ctx.find_project_root().unwrap(), tmp.path());
    }
}
