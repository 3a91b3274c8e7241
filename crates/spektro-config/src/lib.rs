//! Settings file handling for the spektro audio analyser.
//!
//! A single TOML file configures the analyser and the host around it:
//!
//! ```toml
//! [analyser]
//! fft_size = 2048
//! max_decibels = -30.0
//! min_decibels = -100.0
//! smoothing_time_constant = 0.8
//!
//! [input]
//! block_size = 1024
//!
//! [display]
//! bars = 64
//! max_bins = 512
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use spektro_config::{Settings, default_config_path};
//!
//! // Explicit file, or the per-user default if it exists
//! let settings = Settings::load_or_default(None).unwrap();
//!
//! let mut tuned = settings.clone();
//! tuned.analyser.smoothing_time_constant = 0.5;
//! tuned.save(default_config_path()).unwrap();
//! ```

mod error;
mod settings;

/// Platform-specific configuration paths.
pub mod paths;

pub use error::ConfigError;
pub use paths::{default_config_path, user_config_dir};
pub use settings::{DisplaySettings, InputSettings, Settings};
