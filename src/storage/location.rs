//! Where pinmark keeps its files.
//!
//! Default layout (XDG config directory):
//! - `~/.config/pinmark/pinned` - the backing file
//! - `~/.config/pinmark/config.kdl` - user preferences
//!
//! `PM_DATA_DIR` replaces the `~/.config/pinmark` directory wholesale,
//! which is how tests isolate themselves.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PM_DATA_DIR";

/// Name of the backing file inside the data directory.
pub const PIN_FILE_NAME: &str = "pinned";

/// Name of the config file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.kdl";

/// Get the data directory, honoring `PM_DATA_DIR`.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| Error::Other("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("pinmark"))
}

/// Default backing file location inside a data directory.
pub fn default_pin_file(data_dir: &Path) -> PathBuf {
    data_dir.join(PIN_FILE_NAME)
}

/// Config file location inside a data directory.
pub fn config_file(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
