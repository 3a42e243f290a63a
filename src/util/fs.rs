//! Filesystem utilities.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::core::globs::GlobMatcher;

/// Render a path with forward slashes regardless of host.
pub fn to_unix_path(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if MAIN_SEPARATOR == '\\' {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    }
}

/// Canonicalize a path without the `\\?\` prefix on Windows.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Walk `search_root` and collect the files `matcher` selects, where the
/// matcher expects paths relative to `project_root`.
///
/// `node_modules` directories are pruned during the walk; the matcher's own
/// excludes still apply to everything else.
pub fn collect_files(
    project_root: &Path,
    search_root: &Path,
    matcher: &GlobMatcher,
) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    if !search_root.is_dir() {
        return Ok(results);
    }

    let walker = WalkDir::new(search_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules");

    for entry in walker {
        let entry = entry
            .with_context(|| format!("failed to walk directory: {}", search_root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = relative_path(project_root, entry.path());
        if matcher.is_match(&relative) {
            results.push(entry.into_path());
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::globs::{ignoring_node_modules, FileRule, GlobPatternSet};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/a/b"), Path::new("/a/b/c/d.ts")),
            PathBuf::from("c/d.ts")
        );
    }

    #[test]
    fn test_to_unix_path() {
        assert_eq!(to_unix_path(Path::new("Source/lib")), "Source/lib");
    }

    #[test]
    fn test_collect_files() {
        let tmp = TempDir::new().unwrap();
        let root = normalize_path(tmp.path());
        fs::create_dir_all(root.join("lib/node_modules/dep")).unwrap();
        fs::write(root.join("index.ts"), "export {};").unwrap();
        fs::write(root.join("lib/util.ts"), "export {};").unwrap();
        fs::write(root.join("lib/readme.md"), "# lib").unwrap();
        fs::write(root.join("lib/node_modules/dep/index.ts"), "export {};").unwrap();

        let rule = ignoring_node_modules(FileRule::include("*.ts"));
        let matcher = GlobPatternSet::anchored(&root, "", &rule)
            .unwrap()
            .matcher()
            .unwrap();

        let files = collect_files(&root, &root, &matcher).unwrap();
        assert_eq!(files, vec![root.join("index.ts"), root.join("lib/util.ts")]);
    }
}
