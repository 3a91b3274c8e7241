//! Precomputed Blackman window.

use std::f32::consts::PI;

/// Blackman window coefficients for a fixed frame length.
///
/// Uses the symmetric form
///
/// ```text
/// w[n] = 0.42 - 0.5·cos(2πn/(N-1)) + 0.08·cos(4πn/(N-1))
/// ```
///
/// so both ends of the frame are (numerically) zero.
#[derive(Debug, Clone)]
pub struct WindowTable {
    coefficients: Vec<f32>,
}

impl WindowTable {
    /// Compute the Blackman window for `size` samples.
    pub fn blackman(size: usize) -> Self {
        let denom = size.saturating_sub(1).max(1) as f32;
        let coefficients = (0..size)
            .map(|n| {
                let x = 2.0 * PI * n as f32 / denom;
                0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
            })
            .collect();
        Self { coefficients }
    }

    /// Window length.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// True for a zero-length window.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Window coefficients.
    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Multiply `buffer` by the window, element by element.
    pub fn apply(&self, buffer: &mut [f32]) {
        debug_assert_eq!(buffer.len(), self.coefficients.len());
        for (sample, w) in buffer.iter_mut().zip(&self.coefficients) {
            *sample *= w;
        }
    }
}
