//! Configuration for pinmark.
//!
//! ## config.kdl - User preferences
//!
//! Located at `~/.config/pinmark/config.kdl` (or `$PM_DATA_DIR/config.kdl`).
//!
//! Contains:
//! - `pin-file` - Location of the backing file
//! - `output-format` - "json" or "human"
//! - `tag` - Style tag added to pinned entries
//! - `bindings` block - `pin` and `unpin` key sequences
//!
//! A missing file means built-in defaults.
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, PIN_FILE_ENV, Resolved, ResolvedSettings, ValueSource, resolve_settings,
    resolve_settings_with_data_dir,
};
pub use schema::{OutputFormat, PinmarkConfig};

use crate::{Error, Result};
use kdl::KdlDocument;
use std::fs;
use std::path::Path;

/// Load and validate config.kdl.
///
/// Returns the default config if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<PinmarkConfig> {
    if !path.exists() {
        return Ok(PinmarkConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let doc: KdlDocument = content
        .parse()
        .map_err(|e| Error::Config(format!("Failed to parse KDL in {}: {}", path.display(), e)))?;

    let config = PinmarkConfig::from_kdl(&doc);
    config
        .validate()
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(config)
}

/// Write config.kdl, creating parent directories as needed.
pub fn write_config(path: &Path, config: &PinmarkConfig) -> Result<()> {
    config.validate().map_err(Error::Config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut content = String::from("// pinmark configuration\n");
    content.push_str(&config.to_kdl().to_string());
    fs::write(path, content)?;
    Ok(())
}
