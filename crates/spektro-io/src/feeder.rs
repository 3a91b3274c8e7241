//! Feeding converted audio into a shared analyser.

use crate::convert::FormatConverter;
use crate::pcm::{PcmBuffer, SampleBuffer};
use crate::Result;
use parking_lot::Mutex;
use spektro_analyser::Analyser;
use std::sync::Arc;

/// Converts incoming buffers to mono `f32` and appends them to an [`Analyser`].
///
/// The feeder owns its [`FormatConverter`] behind a mutex, so one feeder can
/// be shared between capture callbacks. On any error nothing is appended.
///
/// ## Example
///
/// ```rust
/// use spektro_analyser::{Analyser, AnalyserOptions};
/// use spektro_io::{BufferFeeder, PcmBuffer};
/// use std::sync::Arc;
///
/// let analyser = Arc::new(Analyser::new(AnalyserOptions::with_fft_size(32)).unwrap());
/// let feeder = BufferFeeder::new(Arc::clone(&analyser));
///
/// feeder.update(&PcmBuffer::from_mono(vec![0.0; 32], 48000)).unwrap();
/// assert!(analyser.time_domain_data().is_some());
/// ```
#[derive(Debug)]
pub struct BufferFeeder {
    analyser: Arc<Analyser>,
    converter: Mutex<FormatConverter>,
}

impl BufferFeeder {
    /// Create a feeder for `analyser`.
    pub fn new(analyser: Arc<Analyser>) -> Self {
        Self {
            analyser,
            converter: Mutex::new(FormatConverter::new()),
        }
    }

    /// The analyser this feeder appends to.
    pub fn analyser(&self) -> &Arc<Analyser> {
        &self.analyser
    }

    /// Convert `buffer` and append the result to the analyser.
    pub fn update(&self, buffer: &PcmBuffer) -> Result<()> {
        let mut converter = self.converter.lock();
        let mono = converter.convert(buffer)?;
        self.analyser.update(&mono);
        Ok(())
    }

    /// Decode a raw [`SampleBuffer`], convert it and append the result.
    pub fn update_raw(&self, buffer: &SampleBuffer) -> Result<()> {
        let pcm = buffer.to_pcm()?;
        self.update(&pcm)
    }
}
