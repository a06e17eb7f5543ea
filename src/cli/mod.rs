//! CLI argument definitions for pinmark.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pinmark - Pin files and directories so they sort first in listings.
///
/// Pinned paths live in a plain text file, one absolute path per line.
#[derive(Parser, Debug)]
#[command(name = "pm")]
#[command(author, version = crate::cli::VERSION, about = "Pin files and directories so they sort first in listings", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Use this pin file instead of the configured one.
    ///
    /// PM_PIN_FILE sets the same thing with lower precedence. It is read by
    /// the settings resolver rather than clap so `config show` can report
    /// which of the two supplied the value.
    #[arg(long = "pin-file", global = true)]
    pub pin_file: Option<PathBuf>,

    /// Log debug output to stderr (PM_LOG overrides)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Version string including the build commit.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PM_GIT_COMMIT"),
    " ",
    env!("PM_BUILD_TIMESTAMP"),
    ")"
);

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pin files or directories (relative paths resolve against the current directory)
    Pin {
        /// Paths to pin
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Unpin files or directories
    Unpin {
        /// Paths to unpin
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List pinned paths in pin order
    List,

    /// Check whether a path is pinned
    Check {
        /// Path to check
        path: PathBuf,
    },

    /// Sort paths the way a file-manager listing would
    Sort {
        /// Sort key: "pin" (pinned first) or "natural"
        #[arg(short, long, default_value = "pin")]
        key: String,

        /// Include each entry's style tags
        #[arg(long)]
        tags: bool,

        /// Paths to sort
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show the key bindings the pin plugin contributes
    Bindings,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved settings and where each came from
    Show,

    /// Show config and pin file locations
    Path,

    /// Write a config.kdl with the current settings
    Init {
        /// Overwrite an existing config.kdl
        #[arg(long)]
        force: bool,
    },
}
