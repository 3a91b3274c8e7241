//! Smoothed magnitude spectrum carried across frames.

/// Added to magnitudes before taking the log so silence maps to a finite
/// (very negative) level instead of `-inf`.
pub const MAGNITUDE_FLOOR: f32 = 1e-20;

/// Convert a linear magnitude to decibels: `20·log10(m + 1e-20)`.
#[inline]
pub fn magnitude_to_db(magnitude: f32) -> f32 {
    20.0 * (magnitude + MAGNITUDE_FLOOR).log10()
}

/// Exponentially smoothed linear magnitudes, one per frequency bin.
///
/// Stored in the linear domain, not in dB: the next frame blends against
/// these values.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralState {
    magnitudes: Vec<f32>,
}

impl SpectralState {
    /// All-zero state for `bins` bins.
    pub fn new(bins: usize) -> Self {
        Self {
            magnitudes: vec![0.0; bins],
        }
    }

    /// Previous frame's smoothed magnitudes.
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Zero every bin.
    pub fn reset(&mut self) {
        self.magnitudes.fill(0.0);
    }

    /// Fold a frame of raw `|X[k]|` magnitudes into the state.
    ///
    /// Each bin becomes `|X[k]|·(1 − τ)/fft_size + τ·previous[k]`, written both
    /// back into `frame` and into the stored state.
    pub fn blend(&mut self, frame: &mut [f32], smoothing: f32, fft_size: usize) {
        debug_assert_eq!(frame.len(), self.magnitudes.len());
        let gain = (1.0 - smoothing) * (1.0 / fft_size as f32);

        for (current, previous) in frame.iter_mut().zip(self.magnitudes.iter_mut()) {
            *current = *current * gain + smoothing * *previous;
            *previous = *current;
        }
    }
}
