//! The analyser: sample history in, cached analysis snapshots out.

use crate::cache::AnalysisCache;
use crate::error::Result;
use crate::fft::{PackedSpectrum, RealFft};
use crate::options::AnalyserOptions;
use crate::quantize::{DecibelScale, samples_to_bytes};
use crate::ring::SampleRing;
use crate::spectral::{SpectralState, magnitude_to_db};
use crate::window::WindowTable;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Time-domain snapshot: the most recent `fft_size` samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDomainData {
    /// Samples exactly as appended, oldest first.
    pub float_values: Vec<f32>,
    /// `floor(128·(1 + x))` per sample, clipped to 0..=255.
    pub uint8_values: Vec<u8>,
}

/// Frequency-domain snapshot, one value per bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyData {
    /// Smoothed magnitude in dB.
    pub float_values: Vec<f32>,
    /// dB mapped linearly from `[min_decibels, max_decibels]` onto 0..=255.
    pub uint8_values: Vec<u8>,
}

/// Mutable state guarded by the analyser lock.
#[derive(Debug)]
struct AnalyserState {
    ring: SampleRing,
    spectral: SpectralState,
    fft: RealFft,
    packed: PackedSpectrum,
    frame: Vec<f32>,
    cache: AnalysisCache,
}

/// Web Audio style analyser node.
///
/// Feed it mono `f32` blocks with [`update`](Self::update) and read the latest
/// snapshots with [`time_domain_data`](Self::time_domain_data) and
/// [`frequency_data`](Self::frequency_data). Both queries return `None` until
/// at least `fft_size` samples have been appended.
///
/// Results are computed lazily on the first query after a mutation and
/// cached until the next `update()` or `reset()`. Every operation runs under
/// one internal mutex, so an `Arc<Analyser>` can be shared between an audio
/// callback that appends and a render loop that queries.
///
/// # Example
///
/// ```rust
/// use spektro_analyser::{Analyser, AnalyserOptions};
///
/// let analyser = Analyser::new(AnalyserOptions::with_fft_size(256)).unwrap();
/// assert!(analyser.frequency_data().is_none());
///
/// analyser.update(&[0.0; 256]);
/// let frame = analyser.frequency_data().unwrap();
/// assert_eq!(frame.uint8_values.len(), 128);
/// ```
#[derive(Debug)]
pub struct Analyser {
    options: AnalyserOptions,
    frequency_bin_count: usize,
    window: WindowTable,
    scale: DecibelScale,
    state: Mutex<AnalyserState>,
}

impl Analyser {
    /// Validate `options` and build an analyser.
    ///
    /// Fails with `InvalidFftSize`, `InvalidDecibelRange`, `InvalidSmoothing`
    /// (checked in that order) or `FftSetupFailed`.
    pub fn new(options: AnalyserOptions) -> Result<Self> {
        options.validate()?;

        let fft_size = options.fft_size;
        let frequency_bin_count = options.frequency_bin_count();
        let fft = RealFft::new(fft_size)?;
        let window = WindowTable::blackman(fft_size);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            fft_size,
            log2n = fft.log2_size(),
            bins = frequency_bin_count,
            min_db = options.min_decibels,
            max_db = options.max_decibels,
            smoothing = options.smoothing_time_constant,
            "analyser created"
        );

        Ok(Self {
            options,
            frequency_bin_count,
            window,
            scale: DecibelScale::new(options.min_decibels, options.max_decibels),
            state: Mutex::new(AnalyserState {
                ring: SampleRing::new(),
                spectral: SpectralState::new(frequency_bin_count),
                fft,
                packed: PackedSpectrum::new(frequency_bin_count),
                frame: vec![0.0; fft_size],
                cache: AnalysisCache::default(),
            }),
        })
    }

    /// Options the analyser was built with.
    pub fn options(&self) -> &AnalyserOptions {
        &self.options
    }

    /// FFT size in samples.
    pub fn fft_size(&self) -> usize {
        self.options.fft_size
    }

    /// Half the FFT size.
    pub fn frequency_bin_count(&self) -> usize {
        self.frequency_bin_count
    }

    /// Number of samples currently held in the history.
    pub fn buffered_len(&self) -> usize {
        self.state.lock().ring.len()
    }

    /// Append mono samples and invalidate both cached snapshots.
    ///
    /// No analysis happens here.
    pub fn update(&self, samples: &[f32]) {
        let mut state = self.state.lock();
        state.ring.append(samples);
        state.cache.invalidate();
    }

    /// Discard the sample history and smoothing state.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.ring.clear();
        state.spectral.reset();
        state.cache.invalidate();

        #[cfg(feature = "tracing")]
        tracing::debug!("analyser reset");
    }

    /// The most recent `fft_size` samples, or `None` if not enough have
    /// been appended yet.
    pub fn time_domain_data(&self) -> Option<TimeDomainData> {
        let fft_size = self.options.fft_size;
        let mut guard = self.state.lock();
        let AnalyserState { ring, cache, .. } = &mut *guard;

        let samples = ring.suffix(fft_size)?;
        let data = cache.time_domain.get_or_compute(|| {
            #[cfg(feature = "tracing")]
            tracing::trace!(fft_size, "computing time-domain data");

            TimeDomainData {
                float_values: samples.to_vec(),
                uint8_values: samples_to_bytes(samples),
            }
        });
        Some(data)
    }

    /// The most recent spectrum, or `None` if fewer than `fft_size` samples
    /// have been appended.
    ///
    /// Computing a new spectrum advances the smoothing state, so repeated
    /// queries between updates return the cached frame rather than smoothing
    /// the same samples again.
    pub fn frequency_data(&self) -> Option<FrequencyData> {
        let fft_size = self.options.fft_size;
        let mut guard = self.state.lock();
        let AnalyserState {
            ring,
            spectral,
            fft,
            packed,
            frame,
            cache,
        } = &mut *guard;

        let samples = ring.suffix(fft_size)?;
        let data = cache.frequency.get_or_compute(|| {
            #[cfg(feature = "tracing")]
            tracing::trace!(fft_size, "computing frequency data");

            frame.copy_from_slice(samples);
            self.window.apply(frame);

            fft.forward(frame, packed);
            packed.normalize();

            let mut magnitudes = vec![0.0; self.frequency_bin_count];
            packed.magnitudes_into(&mut magnitudes);
            spectral.blend(
                &mut magnitudes,
                self.options.smoothing_time_constant,
                fft_size,
            );

            let decibels: Vec<f32> = magnitudes.into_iter().map(magnitude_to_db).collect();
            let uint8_values = self.scale.to_bytes(&decibels);
            FrequencyData {
                float_values: decibels,
                uint8_values,
            }
        });
        Some(data)
    }
}
