//! Spektro Analyser - real-time audio analysis with AnalyserNode semantics
//!
//! This crate reproduces the Web Audio API `AnalyserNode`: a host appends
//! blocks of mono `f32` samples and periodically reads the latest time-domain
//! and frequency-domain snapshots, as floats and as 0–255 bytes.
//!
//! - [`analyser`] - The [`Analyser`] orchestrator and its snapshot types
//! - [`options`] - Validated configuration ([`AnalyserOptions`])
//! - [`window`] - Precomputed Blackman window
//! - [`fft`] - Forward real FFT in packed split-complex layout
//! - [`ring`] - Bounded sample history
//! - [`spectral`] - Smoothed magnitude spectrum and dB conversion
//! - [`quantize`] - Byte mappings for both domains
//! - [`cache`] - Memoized results, invalidated on every mutation
//!
//! ## Pipeline
//!
//! ```text
//! update(samples) ──► SampleRing (≤ 32768) ──► cache invalidated
//!
//! frequency_data():
//!   last fft_size samples × Blackman
//!     → packed real FFT → ×0.5, drop Nyquist → |X[k]|
//!     → ×(1−τ)/N + τ·previous → 20·log10(m + 1e-20) → bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use spektro_analyser::{Analyser, AnalyserOptions};
//! use std::sync::Arc;
//!
//! let analyser = Arc::new(Analyser::new(AnalyserOptions::default()).unwrap());
//!
//! // Audio thread
//! let producer = Arc::clone(&analyser);
//! std::thread::spawn(move || producer.update(&[0.0; 2048]))
//!     .join()
//!     .unwrap();
//!
//! // Render thread
//! if let Some(frame) = analyser.frequency_data() {
//!     assert_eq!(frame.uint8_values.len(), analyser.frequency_bin_count());
//! }
//! ```
//!
//! ## Features
//!
//! - `tracing` - emit `tracing` events on construction, reset and recompute

pub mod analyser;
pub mod cache;
pub mod error;
pub mod fft;
pub mod options;
pub mod quantize;
pub mod ring;
pub mod spectral;
pub mod window;

// Re-export main types
pub use analyser::{Analyser, FrequencyData, TimeDomainData};
pub use cache::{AnalysisCache, Cached};
pub use error::{AnalyserError, Result};
pub use fft::{PackedSpectrum, RealFft};
pub use options::{ALLOWED_FFT_SIZES, AnalyserOptions, MAX_FFT_SIZE, MIN_FFT_SIZE};
pub use quantize::{DecibelScale, sample_to_byte, samples_to_bytes};
pub use ring::SampleRing;
pub use spectral::{MAGNITUDE_FLOOR, SpectralState, magnitude_to_db};
pub use window::WindowTable;
