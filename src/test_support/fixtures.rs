//! Project tree fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::util::fs::normalize_path;

/// A temporary project tree built up with chained calls.
///
/// The tree is removed when the fixture is dropped.
#[derive(Debug)]
pub struct ProjectFixture {
    _tmp: TempDir,
    root: PathBuf,
}

impl ProjectFixture {
    /// Create an empty tree.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let root = normalize_path(tmp.path());
        ProjectFixture { _tmp: tmp, root }
    }

    /// Canonical root of the tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a directory (and its parents).
    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.root.join(relative)).expect("failed to create dir");
        self
    }

    /// Write a file, creating parent directories.
    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create dir");
        }
        fs::write(path, content).expect("failed to write file");
        self
    }

    /// Write a minimal package.json named `name` in `relative`.
    pub fn package(self, relative: &str, name: &str) -> Self {
        let manifest = format!(r#"{{ "name": "{name}", "version": "1.0.0" }}"#);
        self.file(&join(relative, "package.json"), &manifest)
    }

    /// Write a root package.json declaring `workspaces`.
    pub fn workspace_root(self, name: &str, workspaces: &[&str]) -> Self {
        let manifest = serde_json::json!({
            "name": name,
            "private": true,
            "workspaces": workspaces,
        });
        self.file("package.json", &manifest.to_string())
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn join(dir: &str, file: &str) -> String {
    if dir.is_empty() || dir == "." {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}
