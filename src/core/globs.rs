//! Glob rules and the pattern sets derived from them.
//!
//! The rule functions are pure string builders. Anchoring a rule to a root
//! produces a [`GlobPatternSet`] whose every pattern has been validated, so
//! an invalid pattern fails at construction rather than at first use.
//!
//! Patterns use `globset` syntax: `*` and `?` never cross `/`, `**` spans
//! directories, `{a,b}` alternates. Includes and excludes are kept as
//! separate lists because globbing consumers accept them independently.
//! Path-derived prefixes are escaped, so a directory named `p[1]` or
//! `my{proj` is matched literally.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Serialize;

use crate::core::errors::{ProjectError, Result};
use crate::core::source_location::SourceLocation;
use crate::util::fs::to_unix_path;

/// Extensions of files that are compiled rather than copied.
///
/// `.d.ts` declarations are covered by `ts`.
pub const CODE_FILE_EXTENSIONS: &[&str] = &["ts", "js"];

/// Excludes any `node_modules` segment at any depth.
pub const NODE_MODULES_EXCLUDE: &str = "**/node_modules/**";

/// Build tooling configuration that never belongs to a package's sources.
pub const TOOLING_FILES: &[&str] = &["wallaby.conf.js", "Gulpfile.js", "gulpfile.js"];

/// Extra excludes for packages built through webpack.
pub const WEBPACK_EXCLUDES: &[&str] = &["webpack.config.js", "wwwroot/**"];

/// Folder prefix that marks a specification (test) folder.
const SPEC_FOLDER: &str = "for_*";

/// Folder holding shared test setup inside specification folders.
const GIVEN_FOLDER: &str = "given";

/// How [`extensions_pattern`] treats the extension list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionMatch {
    /// Select files with one of the extensions.
    Only,
    /// Select every file except those with one of the extensions.
    Except,
}

/// A rule relative to some root, before anchoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRule {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl FileRule {
    /// A rule with a single include and no excludes.
    pub fn include(pattern: impl Into<String>) -> Self {
        FileRule {
            includes: vec![pattern.into()],
            excludes: Vec::new(),
        }
    }

    /// Add an exclude.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Add several excludes.
    pub fn excluding<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }
}

/// File-name fragment matching any of `extensions`, e.g. `*.{ts,js}`.
pub fn extensions_fragment(extensions: &[&str]) -> String {
    match extensions {
        [] => "*".to_string(),
        [single] => format!("*.{single}"),
        many => format!("*.{{{}}}", many.join(",")),
    }
}

/// File-name rule for an extension list.
///
/// [`ExtensionMatch::Except`] partitions static assets from code files: it
/// includes every file and excludes the code extensions.
pub fn extensions_pattern(extensions: &[&str], mode: ExtensionMatch) -> FileRule {
    let fragment = extensions_fragment(extensions);
    match mode {
        ExtensionMatch::Only => FileRule::include(fragment),
        ExtensionMatch::Except => FileRule::include("*").exclude(fragment),
    }
}

/// Make every fragment of `rule` match at any depth and exclude
/// `node_modules` wherever it appears.
pub fn ignoring_node_modules(rule: FileRule) -> FileRule {
    let anywhere = |p: String| {
        if p.starts_with("**/") {
            p
        } else {
            format!("**/{p}")
        }
    };
    FileRule {
        includes: rule.includes.into_iter().map(anywhere).collect(),
        excludes: rule
            .excludes
            .into_iter()
            .map(anywhere)
            .chain(std::iter::once(NODE_MODULES_EXCLUDE.to_string()))
            .collect(),
    }
}

/// Join a root directory and a relative glob with forward slashes.
///
/// Glob metacharacters in `root` are escaped; `relative` is kept as is.
pub fn to_absolute(root: &Path, relative: &str) -> String {
    join_relative(&escape_path(root), relative)
}

/// Forward-slash rendering of `path` with glob metacharacters escaped.
pub fn escape_path(path: &Path) -> String {
    globset::escape(&to_unix_path(path))
}

/// Join two forward-slash fragments without doubling separators.
pub(crate) fn join_relative(prefix: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches("./");
    if prefix.is_empty() || prefix == "." {
        return relative.to_string();
    }
    if relative.is_empty() {
        return prefix.to_string();
    }
    format!("{}/{}", prefix.trim_end_matches('/'), relative)
}

/// Check that `pattern` is a valid glob.
pub fn validate(pattern: &str) -> Result<()> {
    build_glob(pattern).map(|_| ())
}

fn build_glob(pattern: &str) -> Result<globset::Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| ProjectError::InvalidGlobPattern {
            pattern: pattern.to_string(),
            cause: e.kind().to_string(),
        })
}

/// One pattern, relative to the project root and absolute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GlobPattern {
    pub relative: String,
    pub absolute: String,
}

impl GlobPattern {
    /// Anchor a project-relative pattern at `project_root`.
    pub fn new(project_root: &Path, relative: impl Into<String>) -> Result<Self> {
        let relative = relative.into();
        validate(&relative)?;
        let absolute = to_absolute(project_root, &relative);
        validate(&absolute)?;
        Ok(GlobPattern { relative, absolute })
    }
}

/// A named file selection: includes plus separately listed excludes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobPatternSet {
    pub includes: Vec<GlobPattern>,
    pub excludes: Vec<GlobPattern>,
}

impl GlobPatternSet {
    /// Anchor `rule` under `prefix` (project-relative, forward slashes).
    pub fn anchored(project_root: &Path, prefix: &str, rule: &FileRule) -> Result<Self> {
        let anchor = |patterns: &[String]| {
            patterns
                .iter()
                .map(|p| GlobPattern::new(project_root, join_relative(prefix, p)))
                .collect::<Result<Vec<_>>>()
        };
        Ok(GlobPatternSet {
            includes: anchor(&rule.includes)?,
            excludes: anchor(&rule.excludes)?,
        })
    }

    /// Concatenate `other` into this set, skipping patterns already present.
    pub fn merge(&mut self, other: &GlobPatternSet) {
        for pattern in &other.includes {
            if !self.includes.contains(pattern) {
                self.includes.push(pattern.clone());
            }
        }
        for pattern in &other.excludes {
            if !self.excludes.contains(pattern) {
                self.excludes.push(pattern.clone());
            }
        }
    }

    /// Relative include strings.
    pub fn relative_includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(|p| p.relative.as_str())
    }

    /// Absolute include strings.
    pub fn absolute_includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(|p| p.absolute.as_str())
    }

    /// Relative exclude strings.
    pub fn relative_excludes(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(|p| p.relative.as_str())
    }

    /// Absolute exclude strings.
    pub fn absolute_excludes(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(|p| p.absolute.as_str())
    }

    /// Compile the relative patterns into a matcher for project-relative paths.
    pub fn matcher(&self) -> Result<GlobMatcher> {
        let compile = |patterns: &[GlobPattern]| -> Result<GlobSet> {
            let mut builder = GlobSetBuilder::new();
            for pattern in patterns {
                builder.add(build_glob(&pattern.relative)?);
            }
            builder.build().map_err(|e| ProjectError::InvalidGlobPattern {
                pattern: patterns
                    .iter()
                    .map(|p| p.relative.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                cause: e.to_string(),
            })
        };
        Ok(GlobMatcher {
            includes: compile(&self.includes)?,
            excludes: compile(&self.excludes)?,
        })
    }
}

/// Compiled form of a [`GlobPatternSet`].
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    includes: GlobSet,
    excludes: GlobSet,
}

impl GlobMatcher {
    /// Whether a project-relative path is selected: some include matches
    /// and no exclude does.
    pub fn is_match(&self, relative: impl AsRef<Path>) -> bool {
        let path = relative.as_ref();
        self.includes.is_match(path) && !self.excludes.is_match(path)
    }
}

/// Which derived set to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobKind {
    SourceFiles,
    StaticFiles,
    TestFiles,
    TestSetupFiles,
    CompiledFiles,
    CompiledTests,
}

impl GlobKind {
    pub const ALL: [GlobKind; 6] = [
        GlobKind::SourceFiles,
        GlobKind::StaticFiles,
        GlobKind::TestFiles,
        GlobKind::TestSetupFiles,
        GlobKind::CompiledFiles,
        GlobKind::CompiledTests,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GlobKind::SourceFiles => "sources",
            GlobKind::StaticFiles => "static",
            GlobKind::TestFiles => "tests",
            GlobKind::TestSetupFiles => "test-setup",
            GlobKind::CompiledFiles => "compiled",
            GlobKind::CompiledTests => "compiled-tests",
        }
    }
}

impl std::fmt::Display for GlobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every pattern set derived for one source location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Globs {
    /// Compilable source files
    pub source_files: GlobPatternSet,
    /// Files copied verbatim to the output
    pub static_files: GlobPatternSet,
    /// Specification files
    pub test_files: GlobPatternSet,
    /// Shared specification setup under `given` folders
    pub test_setup_files: GlobPatternSet,
    /// Everything under the output root
    pub compiled_files: GlobPatternSet,
    /// Compiled specifications under the output root
    pub compiled_tests: GlobPatternSet,
}

impl Globs {
    /// Derive the pattern sets for `location`, relative to `project_root`.
    pub fn for_location(
        project_root: &Path,
        location: &SourceLocation,
        uses_webpack: bool,
    ) -> Result<Self> {
        let source_prefix = relative_prefix(project_root, location.source_root());
        let output_prefix = relative_prefix(project_root, location.output_root());
        let code = extensions_fragment(CODE_FILE_EXTENSIONS);

        let ignored: Vec<&str> = if uses_webpack {
            TOOLING_FILES.iter().chain(WEBPACK_EXCLUDES).copied().collect()
        } else {
            TOOLING_FILES.to_vec()
        };

        // Without a source subfolder the output root sits inside the source
        // root and must never be read back as input.
        let output_exclude = location
            .output_root()
            .strip_prefix(location.source_root())
            .ok()
            .map(|nested| format!("{}/**", escape_path(nested)));
        let skip_output = |rule: FileRule| match &output_exclude {
            Some(pattern) => rule.exclude(pattern.clone()),
            None => rule,
        };

        let sources = skip_output(ignoring_node_modules(
            extensions_pattern(CODE_FILE_EXTENSIONS, ExtensionMatch::Only).excluding(ignored.clone()),
        ));
        let statics = skip_output(ignoring_node_modules(
            extensions_pattern(CODE_FILE_EXTENSIONS, ExtensionMatch::Except).excluding(ignored),
        ));
        let tests = skip_output(ignoring_node_modules(
            FileRule::include(format!("{SPEC_FOLDER}/**/{code}"))
                .exclude(format!("{SPEC_FOLDER}/**/{GIVEN_FOLDER}/**")),
        ));
        let test_setup = skip_output(ignoring_node_modules(FileRule::include(format!(
            "{SPEC_FOLDER}/**/{GIVEN_FOLDER}/**/{code}"
        ))));

        let globs = Globs {
            source_files: GlobPatternSet::anchored(project_root, &source_prefix, &sources)?,
            static_files: GlobPatternSet::anchored(project_root, &source_prefix, &statics)?,
            test_files: GlobPatternSet::anchored(project_root, &source_prefix, &tests)?,
            test_setup_files: GlobPatternSet::anchored(project_root, &source_prefix, &test_setup)?,
            compiled_files: GlobPatternSet::anchored(
                project_root,
                &output_prefix,
                &FileRule::include("**"),
            )?,
            compiled_tests: GlobPatternSet::anchored(
                project_root,
                &output_prefix,
                &FileRule::include(format!("**/{SPEC_FOLDER}/**/*.js")),
            )?,
        };

        tracing::debug!(
            "derived globs for {} (source prefix `{}`, output prefix `{}`)",
            location.package_root().display(),
            source_prefix,
            output_prefix
        );

        Ok(globs)
    }

    /// The set for `kind`.
    pub fn get(&self, kind: GlobKind) -> &GlobPatternSet {
        match kind {
            GlobKind::SourceFiles => &self.source_files,
            GlobKind::StaticFiles => &self.static_files,
            GlobKind::TestFiles => &self.test_files,
            GlobKind::TestSetupFiles => &self.test_setup_files,
            GlobKind::CompiledFiles => &self.compiled_files,
            GlobKind::CompiledTests => &self.compiled_tests,
        }
    }

    /// Merge every set of `other` into this one.
    pub fn merge(&mut self, other: &Globs) {
        self.source_files.merge(&other.source_files);
        self.static_files.merge(&other.static_files);
        self.test_files.merge(&other.test_files);
        self.test_setup_files.merge(&other.test_setup_files);
        self.compiled_files.merge(&other.compiled_files);
        self.compiled_tests.merge(&other.compiled_tests);
    }
}

/// Escaped forward-slash path of `path` relative to `root`; empty when equal.
fn relative_prefix(root: &Path, path: &Path) -> String {
    let relative = crate::util::fs::relative_path(root, path);
    if relative.as_os_str().is_empty() || relative == Path::new(".") {
        String::new()
    } else {
        escape_path(&relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn globs_for(root: &Path, uses_webpack: bool) -> Globs {
        let location = SourceLocation::resolve(root);
        Globs::for_location(root, &location, uses_webpack).unwrap()
    }

    #[test]
    fn test_extensions_fragment() {
        assert_eq!(extensions_fragment(&["ts", "js"]), "*.{ts,js}");
        assert_eq!(extensions_fragment(&["ts"]), "*.ts");
        assert_eq!(extensions_fragment(&[]), "*");
    }

    #[test]
    fn test_extensions_pattern_modes() {
        let only = extensions_pattern(&["ts", "js"], ExtensionMatch::Only);
        assert_eq!(only.includes, ["*.{ts,js}"]);
        assert!(only.excludes.is_empty());

        let except = extensions_pattern(&["ts", "js"], ExtensionMatch::Except);
        assert_eq!(except.includes, ["*"]);
        assert_eq!(except.excludes, ["*.{ts,js}"]);
    }

    #[test]
    fn test_ignoring_node_modules() {
        let rule = ignoring_node_modules(FileRule::include("*.ts").exclude("**/*.d.ts"));
        assert_eq!(rule.includes, ["**/*.ts"]);
        assert_eq!(rule.excludes, ["**/*.d.ts", NODE_MODULES_EXCLUDE]);
    }

    #[test]
    fn test_to_absolute_uses_forward_slashes() {
        let root = PathBuf::from("/work/project");
        assert_eq!(to_absolute(&root, "Source/**/*.ts"), "/work/project/Source/**/*.ts");
        assert_eq!(to_absolute(&root, "./a/*"), "/work/project/a/*");
        assert_eq!(to_absolute(&root, ""), "/work/project");
        assert_eq!(to_absolute(Path::new("/work/project/"), "x"), "/work/project/x");
    }

    #[test]
    fn test_validate_rejects_malformed_patterns() {
        assert!(validate("Source/**/*.{ts,js}").is_ok());
        assert!(validate("for_*/**/given/**").is_ok());

        let err = validate("Source/*.{ts,js").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidGlobPattern { .. }));
        assert!(validate("Source/[abc").is_err());
    }

    #[test]
    fn test_anchored_round_trip() {
        let root = PathBuf::from("/work/project");
        let rule = ignoring_node_modules(FileRule::include("*.ts"));
        let set = GlobPatternSet::anchored(&root, "packages/a/Source", &rule).unwrap();

        assert_eq!(set.includes[0].relative, "packages/a/Source/**/*.ts");
        for pattern in set.includes.iter().chain(&set.excludes) {
            assert_eq!(pattern.absolute, to_absolute(&root, &pattern.relative));
        }
    }

    #[test]
    fn test_source_matcher_skips_node_modules_at_any_depth() {
        let root = PathBuf::from("/work/project");
        let rule = ignoring_node_modules(extensions_pattern(
            CODE_FILE_EXTENSIONS,
            ExtensionMatch::Only,
        ));
        let matcher = GlobPatternSet::anchored(&root, "", &rule)
            .unwrap()
            .matcher()
            .unwrap();

        assert!(matcher.is_match("index.ts"));
        assert!(matcher.is_match("lib/deep/thing.js"));
        assert!(!matcher.is_match("node_modules/left-pad/index.js"));
        assert!(!matcher.is_match("lib/node_modules/x/index.ts"));
        assert!(!matcher.is_match("styles/site.css"));
    }

    #[test]
    fn test_merge_deduplicates() {
        let root = PathBuf::from("/r");
        let rule = ignoring_node_modules(FileRule::include("*.ts"));
        let mut a = GlobPatternSet::anchored(&root, "a", &rule).unwrap();
        let b = GlobPatternSet::anchored(&root, "b", &rule).unwrap();

        a.merge(&b);
        a.merge(&b);
        assert_eq!(a.includes.len(), 2);
        assert_eq!(a.excludes.len(), 2);
    }

    #[test]
    fn test_to_absolute_escapes_root() {
        assert_eq!(
            to_absolute(Path::new("/work/p[1]"), "**/*.ts"),
            "/work/p[[]1[]]/**/*.ts"
        );
        assert_eq!(
            to_absolute(Path::new("/work/my{proj"), "**/*.{ts,js}"),
            "/work/my[{]proj/**/*.{ts,js}"
        );
        assert!(validate(&to_absolute(Path::new("/work/my{proj"), "**/*.ts")).is_ok());
    }

    #[test]
    fn test_escaped_prefix_matches_literal_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("p[1]");
        std::fs::create_dir_all(root.join("pkg{a}/Source")).unwrap();

        let location = SourceLocation::resolve(&root.join("pkg{a}"));
        let globs = Globs::for_location(&root, &location, false).unwrap();

        let includes: Vec<_> = globs.source_files.relative_includes().collect();
        assert_eq!(includes, ["pkg[{]a[}]/Source/**/*.{ts,js}"]);

        let matcher = globs.source_files.matcher().unwrap();
        assert!(matcher.is_match("pkg{a}/Source/index.ts"));
        assert!(!matcher.is_match("pkga/Source/index.ts"));
    }

    #[test]
    fn test_output_folder_excluded_without_source_folder() {
        let tmp = TempDir::new().unwrap();
        let globs = globs_for(tmp.path(), false);

        let sources = globs.source_files.matcher().unwrap();
        assert!(sources.is_match("index.ts"));
        assert!(!sources.is_match("Distribution/index.js"));

        let statics = globs.static_files.matcher().unwrap();
        assert!(statics.is_match("styles/style.css"));
        assert!(!statics.is_match("Distribution/style.css"));

        let tests = globs.test_files.matcher().unwrap();
        assert!(tests.is_match("for_x/a.ts"));
        assert!(!tests.is_match("Distribution/for_x/a.js"));

        let setup = globs.test_setup_files.matcher().unwrap();
        assert!(setup.is_match("for_x/given/b.ts"));
        assert!(!setup.is_match("Distribution/for_x/given/b.js"));

        let compiled = globs.compiled_files.matcher().unwrap();
        assert!(compiled.is_match("Distribution/index.js"));
        let compiled_tests = globs.compiled_tests.matcher().unwrap();
        assert!(compiled_tests.is_match("Distribution/for_x/a.js"));
    }

    #[test]
    fn test_output_folder_not_excluded_under_source_folder() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("Source")).unwrap();
        let globs = globs_for(tmp.path(), false);

        let excludes: Vec<_> = globs.source_files.relative_excludes().collect();
        assert!(excludes.iter().all(|p| !p.contains("Distribution")));
        assert!(!globs.source_files.matcher().unwrap().is_match("Distribution/index.js"));
    }

    #[test]
    fn test_webpack_packages_exclude_bundler_files() {
        let tmp = TempDir::new().unwrap();

        let plain = globs_for(tmp.path(), false);
        assert!(plain.source_files.matcher().unwrap().is_match("webpack.config.js"));
        assert!(plain.static_files.matcher().unwrap().is_match("wwwroot/x.css"));

        let webpack = globs_for(tmp.path(), true);
        let sources = webpack.source_files.matcher().unwrap();
        assert!(!sources.is_match("webpack.config.js"));
        assert!(!sources.is_match("wwwroot/app.js"));
        assert!(sources.is_match("index.ts"));

        let statics = webpack.static_files.matcher().unwrap();
        assert!(!statics.is_match("wwwroot/x.css"));
        assert!(statics.is_match("styles/site.css"));
    }

    #[test]
    fn test_tooling_files_excluded_at_source_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("Source")).unwrap();

        for uses_webpack in [false, true] {
            let sources = globs_for(tmp.path(), uses_webpack)
                .source_files
                .matcher()
                .unwrap();
            assert!(!sources.is_match("Source/gulpfile.js"));
            assert!(!sources.is_match("Source/Gulpfile.js"));
            assert!(!sources.is_match("Source/wallaby.conf.js"));
            assert!(!sources.is_match("Source/tools/gulpfile.js"));
            assert!(sources.is_match("Source/index.js"));
        }
    }
}
