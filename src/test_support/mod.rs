//! Test utilities for wharf unit tests.
//!
//! Fixtures lay out real directory trees in a temporary directory, since the
//! model only ever reads the filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::ProjectFixture;
//!
//! let fixture = ProjectFixture::new()
//!     .workspace_root("root", &["packages/*"])
//!     .package("packages/a", "a")
//!     .dir("packages/a/Source");
//! let project = Project::open(Some(fixture.root())).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::*;
