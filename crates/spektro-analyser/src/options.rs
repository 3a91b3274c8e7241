//! Analyser configuration and validation.

use crate::error::{AnalyserError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Smallest supported FFT size.
pub const MIN_FFT_SIZE: usize = 32;

/// Largest supported FFT size. Also the capacity of the sample ring.
pub const MAX_FFT_SIZE: usize = 32768;

/// Every FFT size accepted by [`AnalyserOptions::validate`].
pub const ALLOWED_FFT_SIZES: [usize; 11] = [
    32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
];

/// Options for creating an [`Analyser`](crate::Analyser).
///
/// Defaults match the Web Audio `AnalyserNode`:
/// - `fft_size`: 2048
/// - `max_decibels`: -30
/// - `min_decibels`: -100
/// - `smoothing_time_constant`: 0.8
///
/// Every field is optional when deserializing; missing fields take their
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyserOptions {
    /// FFT size in sample frames. Must be a power of two in 32..=32768.
    pub fft_size: usize,
    /// Upper end of the dB range mapped onto byte values.
    pub max_decibels: f32,
    /// Lower end of the dB range mapped onto byte values.
    pub min_decibels: f32,
    /// Blend weight of the previous frame, 0 (none) to 1 (frozen).
    pub smoothing_time_constant: f32,
}

impl Default for AnalyserOptions {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            max_decibels: -30.0,
            min_decibels: -100.0,
            smoothing_time_constant: 0.8,
        }
    }
}

impl AnalyserOptions {
    /// Create options with the given FFT size and default everything else.
    pub fn with_fft_size(fft_size: usize) -> Self {
        Self {
            fft_size,
            ..Self::default()
        }
    }

    /// Number of frequency bins produced per frame (`fft_size / 2`).
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Check the options in the order the analyser does: FFT size, then
    /// decibel range, then smoothing.
    ///
    /// NaN bounds or smoothing values are rejected.
    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_FFT_SIZES.contains(&self.fft_size) {
            return Err(AnalyserError::InvalidFftSize(self.fft_size));
        }
        if self.min_decibels.partial_cmp(&self.max_decibels) != Some(Ordering::Less) {
            return Err(AnalyserError::InvalidDecibelRange {
                min: self.min_decibels,
                max: self.max_decibels,
            });
        }
        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(AnalyserError::InvalidSmoothing(
                self.smoothing_time_constant,
            ));
        }
        Ok(())
    }
}
