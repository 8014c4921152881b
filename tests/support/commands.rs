//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables cleared from every child process.
const CLEARED_VARS: &[&str] = &[
    "DO_SPACE_NAME",
    "DO_SPACE_REGION",
    "DO_ACCESS_KEY",
    "DO_SECRET_KEY",
    "DO_SPACE_ENDPOINT",
    "ENVSPACE_CONFIG",
    "ENVSPACE_LOG",
];

impl Test {
    /// Create an envspace command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME inside the temporary home directory
    /// - All DO_* and ENVSPACE_* variables removed, except ENVSPACE_CONFIG
    ///   when the test has a config file
    /// - NO_COLOR set so output can be matched literally
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envspace").expect("failed to find envspace binary");
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.config_dir());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in CLEARED_VARS {
            cmd.env_remove(var);
        }
        if let Some(config) = &self.config {
            cmd.env("ENVSPACE_CONFIG", config);
        }
        cmd
    }

    /// Shortcut for `envspace write --id <id> --vars ...`.
    pub fn write(&self, id: &str, vars: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["write", "--id", id]);
        for var in vars {
            cmd.args(["--vars", var]);
        }
        cmd.output().expect("failed to run envspace write")
    }

    /// Shortcut for `envspace read --id <id>`.
    pub fn read(&self, id: &str) -> Output {
        self.cmd()
            .args(["read", "--id", id])
            .output()
            .expect("failed to run envspace read")
    }
}
