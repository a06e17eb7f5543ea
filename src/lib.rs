//! pinmark - Pin files and directories so they sort first in listings.
//!
//! This library provides the core functionality for the `pm` CLI tool and
//! for hosts embedding the pin plugin: the persisted pin store, the
//! pin-aware sort key, and the hook contract a file manager exposes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod host;
pub mod models;
pub mod plugin;
pub mod sort;
pub mod storage;

/// Test utilities for isolated test environments.
#[cfg(test)]
pub(crate) mod test_utils {
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    use crate::storage::PinStore;

    /// Test environment with an isolated data directory.
    ///
    /// Tests use dependency injection (explicit paths) rather than the
    /// `PM_DATA_DIR` environment variable, so they stay parallel-safe.
    pub struct TestEnv {
        /// Isolated data directory holding the pin file and config
        pub data_dir: TempDir,
    }

    impl TestEnv {
        /// Create a new test environment with an empty data directory.
        pub fn new() -> Self {
            Self {
                data_dir: TempDir::new().unwrap(),
            }
        }

        /// Get the path to the isolated data directory.
        pub fn data_path(&self) -> &Path {
            self.data_dir.path()
        }

        /// Path of the backing file inside the data directory.
        pub fn pin_file(&self) -> PathBuf {
            self.data_path().join("pinned")
        }

        /// Write raw contents to the backing file.
        pub fn write_pin_file(&self, contents: &str) {
            std::fs::write(self.pin_file(), contents).unwrap();
        }

        /// Read the raw backing file contents.
        pub fn read_pin_file(&self) -> String {
            std::fs::read_to_string(self.pin_file()).unwrap()
        }

        /// Open a pin store on this environment's backing file.
        pub fn open_store(&self) -> PinStore {
            PinStore::open(self.pin_file()).unwrap()
        }
    }

    impl Default for TestEnv {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Library-level error type for pinmark operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for pinmark operations.
pub type Result<T> = std::result::Result<T, Error>;
