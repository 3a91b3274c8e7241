//! Forward real FFT in packed split-complex layout.
//!
//! The analyser's numeric contract is defined against the packed real-FFT
//! convention: `N` real inputs produce `N/2` complex bins, the DC term sits in
//! the real part of bin 0 and the Nyquist term in its imaginary part, and the
//! raw output is twice the textbook DFT. [`RealFft`] reproduces that layout on
//! top of `rustfft`, and [`PackedSpectrum::normalize`] applies the two
//! corrections (halve, drop Nyquist) every consumer needs.

use crate::error::{AnalyserError, Result};
use rustfft::{FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// Split real/imaginary planes of a packed real-FFT result.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedSpectrum {
    /// Real parts; `real[0]` is the DC term.
    pub real: Vec<f32>,
    /// Imaginary parts; `imag[0]` is the Nyquist term until normalized.
    pub imag: Vec<f32>,
}

impl PackedSpectrum {
    /// Zeroed spectrum with `bins` complex slots.
    pub fn new(bins: usize) -> Self {
        Self {
            real: vec![0.0; bins],
            imag: vec![0.0; bins],
        }
    }

    /// Number of complex slots.
    pub fn bins(&self) -> usize {
        self.real.len()
    }

    /// Halve both planes and discard the packed Nyquist term.
    ///
    /// Afterwards bin `k` holds the textbook DFT value `X[k]` for
    /// `k = 0..N/2`.
    pub fn normalize(&mut self) {
        for v in self.real.iter_mut().chain(self.imag.iter_mut()) {
            *v *= 0.5;
        }
        if let Some(nyquist) = self.imag.first_mut() {
            *nyquist = 0.0;
        }
    }

    /// Write `|X[k]|` for every bin into `out`.
    pub fn magnitudes_into(&self, out: &mut [f32]) {
        for ((m, re), im) in out.iter_mut().zip(&self.real).zip(&self.imag) {
            *m = (re * re + im * im).sqrt();
        }
    }
}

/// Forward real-to-complex FFT bound to one transform size.
pub struct RealFft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl std::fmt::Debug for RealFft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealFft").field("size", &self.size).finish()
    }
}

impl RealFft {
    /// Plan a forward transform of `size` real samples.
    ///
    /// `size` must be a power of two no smaller than 2.
    pub fn new(size: usize) -> Result<Self> {
        if size < 2 || !size.is_power_of_two() {
            return Err(AnalyserError::FftSetupFailed(size));
        }
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Ok(Self {
            fft,
            size,
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch,
        })
    }

    /// Transform size in samples.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Base-two logarithm of the transform size.
    pub fn log2_size(&self) -> u32 {
        self.size.trailing_zeros()
    }

    /// Number of packed output bins (`size / 2`).
    pub fn bins(&self) -> usize {
        self.size / 2
    }

    /// Transform `input` (exactly `size` samples) into packed layout.
    ///
    /// Output is scaled by 2 relative to the textbook DFT, with the Nyquist
    /// term stored in `out.imag[0]`. Call [`PackedSpectrum::normalize`] to
    /// undo both.
    pub fn forward(&mut self, input: &[f32], out: &mut PackedSpectrum) {
        debug_assert_eq!(input.len(), self.size);
        debug_assert_eq!(out.bins(), self.bins());

        for (slot, &x) in self.buffer.iter_mut().zip(input) {
            *slot = Complex::new(x, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let half = self.bins();
        out.real[0] = 2.0 * self.buffer[0].re;
        out.imag[0] = 2.0 * self.buffer[half].re;
        for k in 1..half {
            out.real[k] = 2.0 * self.buffer[k].re;
            out.imag[k] = 2.0 * self.buffer[k].im;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn rejects_non_power_of_two() {
        assert_eq!(
            RealFft::new(100).unwrap_err(),
            AnalyserError::FftSetupFailed(100)
        );
        assert!(RealFft::new(0).is_err());
        assert!(RealFft::new(1).is_err());
    }

    #[test]
    fn log2_matches_size() {
        let fft = RealFft::new(2048).unwrap();
        assert_eq!(fft.log2_size(), 11);
        assert_eq!(fft.bins(), 1024);
    }

    #[test]
    fn dc_lands_in_bin_zero_real() {
        let mut fft = RealFft::new(64).unwrap();
        let mut out = PackedSpectrum::new(32);
        fft.forward(&[1.0; 64], &mut out);

        // Packed output is 2 * sum(x).
        assert!((out.real[0] - 128.0).abs() < 1e-3);
        assert!(out.imag[0].abs() < 1e-3);
        out.normalize();
        assert!((out.real[0] - 64.0).abs() < 1e-3);
    }

    #[test]
    fn nyquist_packed_then_discarded() {
        let n = 64;
        let input: Vec<f32> = (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let mut fft = RealFft::new(n).unwrap();
        let mut out = PackedSpectrum::new(n / 2);
        fft.forward(&input, &mut out);

        assert!((out.imag[0] - 128.0).abs() < 1e-3, "nyquist {}", out.imag[0]);
        assert!(out.real[0].abs() < 1e-3);

        out.normalize();
        assert_eq!(out.imag[0], 0.0);
        let mut mags = vec![0.0; n / 2];
        out.magnitudes_into(&mut mags);
        assert!(mags.iter().all(|m| m.abs() < 1e-3));
    }

    #[test]
    fn normalized_sine_matches_textbook_dft() {
        let n = 256;
        let bin = 10;
        let input: Vec<f32> = (0..n)
            .map(|i| (2.0 * PI * bin as f32 * i as f32 / n as f32).sin())
            .collect();
        let mut fft = RealFft::new(n).unwrap();
        let mut out = PackedSpectrum::new(n / 2);
        fft.forward(&input, &mut out);
        out.normalize();

        let mut mags = vec![0.0; n / 2];
        out.magnitudes_into(&mut mags);
        // |X[k]| = N/2 for a unit sine centred on bin k.
        assert!((mags[bin] - 128.0).abs() < 1e-2, "peak {}", mags[bin]);
        for (k, m) in mags.iter().enumerate() {
            if k != bin {
                assert!(*m < 1e-2, "leak at bin {k}: {m}");
            }
        }
    }
}
