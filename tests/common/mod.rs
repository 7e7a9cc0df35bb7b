//! Common test utilities for collab integration tests.
//!
//! Provides `TestEnv`, which points the binary at a config file inside a
//! temporary directory so tests never read the user's own `config.kdl`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
pub use tempfile::TempDir;

/// A test environment with an isolated config location.
///
/// The config file does not exist until `write_config` is called, so the
/// defaults apply.
pub struct TestEnv {
    pub config_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Create an environment whose config.kdl holds `contents`.
    pub fn with_config(contents: &str) -> Self {
        let env = Self::new();
        env.write_config(contents);
        env
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.kdl")
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).unwrap();
    }

    /// Get a Command for the collab binary.
    ///
    /// `COLLAB_USER` is cleared and logging is silenced so stderr only
    /// carries command errors.
    pub fn collab(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_collab"));
        cmd.current_dir(self.config_dir.path());
        cmd.env("COLLAB_CONFIG", self.config_path());
        cmd.env_remove("COLLAB_USER");
        cmd.env("COLLAB_LOG", "off");
        cmd
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
