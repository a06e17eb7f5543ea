//! Precedence resolution for settings.
//!
//! ## Pin file (highest to lowest)
//!
//! 1. `--pin-file` CLI flag
//! 2. `PM_PIN_FILE` environment variable
//! 3. `pin-file` in config.kdl
//! 4. `<data dir>/pinned`
//!
//! ## Everything else (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. config.kdl
//! 3. Built-in defaults

use crate::Result;
use crate::config::{OutputFormat, PinmarkConfig, load_config};
use crate::plugin::{DEFAULT_PIN_KEYS, DEFAULT_TAG, DEFAULT_UNPIN_KEYS, PluginSettings};
use crate::storage::{config_file, data_dir, default_pin_file, expand_home};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the backing file location.
pub const PIN_FILE_ENV: &str = "PM_PIN_FILE";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.kdl
    Config,
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::Config => write!(f, "config"),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// CLI overrides for settings resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Backing file override from `--pin-file`
    pub pin_file: Option<PathBuf>,
    /// Output format override from `-H`
    pub output_format: Option<OutputFormat>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pin_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pin_file = Some(path.into());
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }
}

/// Fully resolved settings with source tracking.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSettings {
    /// Directory holding config.kdl and, by default, the pin file
    pub data_dir: PathBuf,
    /// Location of config.kdl (may not exist)
    pub config_file: PathBuf,
    pub pin_file: Resolved<PathBuf>,
    pub output_format: Resolved<OutputFormat>,
    pub tag: Resolved<String>,
    pub pin_keys: Resolved<String>,
    pub unpin_keys: Resolved<String>,
}

impl ResolvedSettings {
    pub fn pin_file(&self) -> &Path {
        &self.pin_file.value
    }

    pub fn output_format(&self) -> &OutputFormat {
        &self.output_format.value
    }

    pub fn is_human(&self) -> bool {
        self.output_format.value == OutputFormat::Human
    }

    /// Settings for the pin plugin.
    pub fn plugin_settings(&self) -> PluginSettings {
        PluginSettings {
            tag: self.tag.value.clone(),
            pin_keys: self.pin_keys.value.clone(),
            unpin_keys: self.unpin_keys.value.clone(),
        }
    }
}

/// Resolve settings from the default data directory (honors `PM_DATA_DIR`).
pub fn resolve_settings(overrides: &ConfigOverrides) -> Result<ResolvedSettings> {
    let env_pin_file = std::env::var(PIN_FILE_ENV).ok().filter(|v| !v.is_empty());
    resolve_settings_with_data_dir(&data_dir()?, env_pin_file, overrides)
}

/// Resolve settings against an explicit data directory.
///
/// `env_pin_file` is the value of `PM_PIN_FILE`, passed in so callers and
/// tests control the environment explicitly.
pub fn resolve_settings_with_data_dir(
    data_dir: &Path,
    env_pin_file: Option<String>,
    overrides: &ConfigOverrides,
) -> Result<ResolvedSettings> {
    let config_path = config_file(data_dir);
    let config = load_config(&config_path)?;
    Ok(resolve(data_dir, config_path, &config, env_pin_file, overrides))
}

fn resolve(
    data_dir: &Path,
    config_path: PathBuf,
    config: &PinmarkConfig,
    env_pin_file: Option<String>,
    overrides: &ConfigOverrides,
) -> ResolvedSettings {
    let pin_file = if let Some(ref path) = overrides.pin_file {
        Resolved::new(expand_home(path), ValueSource::CliFlag)
    } else if let Some(path) = env_pin_file {
        Resolved::new(
            expand_home(Path::new(&path)),
            ValueSource::EnvVar(PIN_FILE_ENV.to_string()),
        )
    } else if let Some(ref path) = config.pin_file {
        Resolved::new(expand_home(Path::new(path)), ValueSource::Config)
    } else {
        Resolved::new(default_pin_file(data_dir), ValueSource::Default)
    };

    let output_format = if let Some(ref format) = overrides.output_format {
        Resolved::new(format.clone(), ValueSource::CliFlag)
    } else if let Some(ref format) = config.output_format {
        Resolved::new(format.clone(), ValueSource::Config)
    } else {
        Resolved::new(OutputFormat::Json, ValueSource::Default)
    };

    ResolvedSettings {
        data_dir: data_dir.to_path_buf(),
        config_file: config_path,
        pin_file,
        output_format,
        tag: from_config(&config.tag, DEFAULT_TAG),
        pin_keys: from_config(&config.pin_keys, DEFAULT_PIN_KEYS),
        unpin_keys: from_config(&config.unpin_keys, DEFAULT_UNPIN_KEYS),
    }
}

fn from_config(value: &Option<String>, default: &str) -> Resolved<String> {
    match value {
        Some(value) => Resolved::new(value.clone(), ValueSource::Config),
        None => Resolved::new(default.to_string(), ValueSource::Default),
    }
}
