//! Test-runner setup hooks.
//!
//! A host runs the base setup and then, if one was supplied, an extra
//! callback against the same [`TestEnvironment`]. Both are ordinary typed
//! functions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::core::Project;

/// Environment variable set for every test run.
pub const TESTING_ENV_VAR: &str = "IS_TESTING";

/// What a test host should install before running specifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestEnvironment {
    /// Environment variables to export
    pub vars: BTreeMap<String, String>,

    /// Module aliases: package name to package root
    pub module_aliases: BTreeMap<String, PathBuf>,
}

/// Signature of a setup step.
pub type SetupFn = dyn Fn(&Project, &mut TestEnvironment) + Send + Sync;

/// The base setup: mark the run as a test run and alias every workspace
/// package name to its root so packages resolve each other from source.
pub fn base_setup(project: &Project, env: &mut TestEnvironment) {
    env.vars
        .insert(TESTING_ENV_VAR.to_string(), "true".to_string());

    for ws in project.workspaces() {
        env.module_aliases
            .insert(ws.name().to_string(), ws.root().to_path_buf());
    }
}

/// Base setup plus an optional extra step.
#[derive(Default)]
pub struct SetupHooks {
    extra: Option<Box<SetupFn>>,
}

impl SetupHooks {
    /// Hooks that only run the base setup.
    pub fn new() -> Self {
        SetupHooks { extra: None }
    }

    /// Run `extra` after the base setup.
    pub fn with_extra<F>(mut self, extra: F) -> Self
    where
        F: Fn(&Project, &mut TestEnvironment) + Send + Sync + 'static,
    {
        self.extra = Some(Box::new(extra));
        self
    }

    /// Whether an extra step is installed.
    pub fn has_extra(&self) -> bool {
        self.extra.is_some()
    }

    /// Run the base setup, then the extra step.
    pub fn run(&self, project: &Project) -> TestEnvironment {
        let mut env = TestEnvironment::default();
        base_setup(project, &mut env);
        if let Some(extra) = &self.extra {
            extra(project, &mut env);
        }
        env
    }
}

impl fmt::Debug for SetupHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupHooks")
            .field("extra", &self.extra.is_some())
            .finish()
    }
}
