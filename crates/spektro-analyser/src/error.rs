//! Error types for analyser construction.

use thiserror::Error;

/// Errors raised while building an [`Analyser`](crate::Analyser).
///
/// All of these are configuration mistakes surfaced at construction time.
/// Once an analyser exists, `update()` and the queries never fail; "not enough
/// samples yet" is reported as `None`, not as an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyserError {
    /// FFT size is not a power of two in 32..=32768.
    #[error("invalid FFT size {0}: must be a power of two between 32 and 32768")]
    InvalidFftSize(usize),

    /// `min_decibels` is not strictly below `max_decibels`.
    #[error("invalid decibel range: min {min} dB must be below max {max} dB")]
    InvalidDecibelRange {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },

    /// Smoothing time constant is outside [0, 1].
    #[error("invalid smoothing time constant {0}: must be within [0, 1]")]
    InvalidSmoothing(f32),

    /// The FFT engine could not be planned for the requested size.
    #[error("failed to set up FFT of size {0}")]
    FftSetupFailed(usize),
}

/// Convenience result type for analyser construction.
pub type Result<T> = std::result::Result<T, AnalyserError>;
