//! Test support utilities for envspace integration tests.
//!
//! Provides an isolated environment for running the binary and shared
//! fixtures.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated home directory.
///
/// Child processes get their own `HOME` and `XDG_CONFIG_HOME` and none of
/// the `DO_*` variables from the parent, so a developer's real
/// credentials are never picked up. No process-global state is mutated,
/// so tests can safely run in parallel.
pub struct Test {
    /// Temporary home directory
    pub home: TempDir,
    /// Config file handed to every command through ENVSPACE_CONFIG
    pub config: Option<PathBuf>,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home, config: None }
    }

    /// Create a test environment whose config file points at a closed
    /// local port, so every request fails at the transport level.
    pub fn unreachable() -> Self {
        let mut t = Self::new();
        t.config = Some(t.write_config("unreachable.toml", UNREACHABLE_CONFIG));
        t
    }

    /// Platform config directory inside the temporary home.
    pub fn config_dir(&self) -> PathBuf {
        self.home.path().join(".config")
    }

    /// Write `contents` to `<config_dir>/envspace/config.toml`.
    pub fn write_default_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_dir().join("envspace");
        std::fs::create_dir_all(&dir).expect("failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("failed to write config");
        path
    }

    /// Write `contents` to a config file outside the default location.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home.path().join(name);
        std::fs::write(&path, contents).expect("failed to write config");
        path
    }
}
