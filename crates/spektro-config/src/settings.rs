//! The settings file: analyser options plus host input and display settings.

use crate::ConfigError;
use crate::paths::default_config_path;
use serde::{Deserialize, Serialize};
use spektro_analyser::AnalyserOptions;
use std::path::Path;

/// How the host slices its input into analyser updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Frames per update call.
    pub block_size: usize,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { block_size: 1024 }
    }
}

/// How the host draws the spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Number of bars drawn.
    pub bars: usize,
    /// Only the lowest `max_bins` frequency bins are drawn.
    pub max_bins: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            bars: 64,
            max_bins: 512,
        }
    }
}

/// Complete spektro settings.
///
/// Every table and field is optional in the file; missing values take their
/// defaults.
///
/// ```rust
/// use spektro_config::Settings;
///
/// let settings = Settings::from_toml_str("[analyser]\nfft_size = 4096\n").unwrap();
/// assert_eq!(settings.analyser.fft_size, 4096);
/// assert_eq!(settings.analyser.min_decibels, -100.0);
/// assert_eq!(settings.display.bars, 64);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Analyser construction options.
    pub analyser: AnalyserOptions,
    /// Input slicing.
    pub input: InputSettings,
    /// Spectrum display.
    pub display: DisplaySettings,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load settings from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value, analyser options first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analyser.validate()?;

        if self.input.block_size == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "input.block_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.display.bars == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "display.bars",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.display.max_bins < self.display.bars {
            return Err(ConfigError::InvalidSetting {
                field: "display.max_bins",
                reason: format!(
                    "{} is fewer than the {} bars drawn",
                    self.display.max_bins, self.display.bars
                ),
            });
        }
        Ok(())
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist. A missing default file yields
    /// [`Settings::default`]. The result is validated either way.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = default_config_path();
                if default_path.is_file() {
                    Self::load(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        settings.validate()?;
        Ok(settings)
    }
}
