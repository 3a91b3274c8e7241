//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/spektro/spektro.toml`
//! - macOS: `~/Library/Application Support/spektro/spektro.toml`
//! - Windows: `%APPDATA%\spektro\spektro.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "spektro";

/// File name of the settings file.
const CONFIG_FILE: &str = "spektro.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path settings are read from when none is given.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}
