//! Common test utilities for pinmark integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's `~/.config/pinmark/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates two temporary directories:
/// - `work_dir`: The working directory `pm` runs in
/// - `data_dir`: Holds the pin file and config (via `PM_DATA_DIR`)
///
/// The `pm()` method returns a `Command` that sets `PM_DATA_DIR`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub work_dir: TempDir,
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the pm binary with isolated data directory.
    pub fn pm(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pm"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("PM_DATA_DIR", self.data_dir.path());
        cmd.env_remove("PM_PIN_FILE");
        cmd.env_remove("PM_LOG");
        cmd
    }

    /// Get the path to the working directory.
    pub fn work_path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }

    /// Default pin file location for this environment.
    pub fn pin_file(&self) -> PathBuf {
        self.data_path().join("pinned")
    }

    /// Config file location for this environment.
    pub fn config_file(&self) -> PathBuf {
        self.data_path().join("config.kdl")
    }

    /// Read the pin file, or an empty string if it doesn't exist.
    pub fn read_pin_file(&self) -> String {
        std::fs::read_to_string(self.pin_file()).unwrap_or_default()
    }

    pub fn write_pin_file(&self, contents: &str) {
        std::fs::write(self.pin_file(), contents).expect("Failed to write pin file");
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_file(), contents).expect("Failed to write config file");
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
