//! Where a package keeps its sources and where its output goes.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Candidate source folder names, in priority order. Only the first one
/// that exists is honored.
pub const SOURCE_FOLDER_NAMES: &[&str] = &["Source"];

/// Output folder name, always directly under the package root.
pub const OUTPUT_FOLDER_NAME: &str = "Distribution";

/// TypeScript project file name.
pub const TSCONFIG_NAME: &str = "tsconfig.json";

/// Resolved source and output roots of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    package_root: PathBuf,
    source_root: PathBuf,
    output_root: PathBuf,
    under_source_subfolder: bool,
}

impl SourceLocation {
    /// Resolve the layout of the package at `package_root`.
    ///
    /// Only reads the filesystem; the result reflects its state at call time.
    pub fn resolve(package_root: &Path) -> Self {
        let source_folder = SOURCE_FOLDER_NAMES
            .iter()
            .map(|name| package_root.join(name))
            .find(|candidate| candidate.is_dir());

        match &source_folder {
            Some(folder) => tracing::debug!("using source folder {}", folder.display()),
            None => tracing::debug!(
                "no source folder under {}, sources live at the package root",
                package_root.display()
            ),
        }

        SourceLocation {
            package_root: package_root.to_path_buf(),
            under_source_subfolder: source_folder.is_some(),
            source_root: source_folder.unwrap_or_else(|| package_root.to_path_buf()),
            output_root: package_root.join(OUTPUT_FOLDER_NAME),
        }
    }

    /// The package root.
    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    /// Where sources live: the package root or its source subfolder.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Where compiled and copied output goes.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Whether sources live under a conventional subfolder.
    pub fn under_source_subfolder(&self) -> bool {
        self.under_source_subfolder
    }

    /// Path to the package's tsconfig.json.
    pub fn tsconfig(&self) -> PathBuf {
        self.package_root.join(TSCONFIG_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_without_source_folder() {
        let tmp = TempDir::new().unwrap();
        let location = SourceLocation::resolve(tmp.path());

        assert!(!location.under_source_subfolder());
        assert_eq!(location.source_root(), tmp.path());
        assert_eq!(location.output_root(), tmp.path().join("Distribution"));
    }

    #[test]
    fn test_resolve_with_source_folder() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("Source")).unwrap();
        let location = SourceLocation::resolve(tmp.path());

        assert!(location.under_source_subfolder());
        assert_eq!(location.source_root(), tmp.path().join("Source"));
        assert_eq!(location.output_root(), tmp.path().join("Distribution"));
        assert_eq!(location.tsconfig(), tmp.path().join("tsconfig.json"));
    }

    #[test]
    fn test_source_file_is_not_a_source_folder() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Source"), "not a directory").unwrap();
        let location = SourceLocation::resolve(tmp.path());

        assert!(!location.under_source_subfolder());
        assert_eq!(location.source_root(), tmp.path());
    }

    #[test]
    fn test_resolution_follows_filesystem_changes() {
        let tmp = TempDir::new().unwrap();
        let before = SourceLocation::resolve(tmp.path());
        std::fs::create_dir(tmp.path().join("Source")).unwrap();
        let after = SourceLocation::resolve(tmp.path());

        assert_ne!(before, after);
        assert_eq!(after, SourceLocation::resolve(tmp.path()));
    }
}
