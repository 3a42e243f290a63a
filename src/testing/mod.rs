//! Support for test-runner hosts built on the project model.

pub mod setup;

pub use setup::{base_setup, SetupHooks, TestEnvironment};
