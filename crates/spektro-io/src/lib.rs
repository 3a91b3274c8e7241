//! Audio input layer for the spektro analyser.
//!
//! The analyser core only accepts mono `f32` samples. This crate turns
//! whatever the host has into that:
//!
//! - **PCM buffers**: [`PcmBuffer`] holds typed samples (`f32`, `f64`, `i16`,
//!   `i32`) with any channel count, interleaved or planar
//! - **Raw containers**: [`SampleBuffer`] wraps little-endian bytes plus a
//!   [`StreamDescription`], decoded with [`SampleBuffer::to_pcm`]
//! - **Conversion**: [`FormatConverter`] down-mixes to mono and converts to
//!   `f32`, reusing its plan while the input format stays the same
//! - **Feeding**: [`BufferFeeder`] converts and then updates a shared
//!   [`Analyser`](spektro_analyser::Analyser)
//! - **WAV file I/O**: [`read_wav_pcm`], [`read_wav_mono`] and [`write_wav`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spektro_analyser::{Analyser, AnalyserOptions};
//! use spektro_io::{BufferFeeder, read_wav_pcm};
//! use std::sync::Arc;
//!
//! let analyser = Arc::new(Analyser::new(AnalyserOptions::default())?);
//! let feeder = BufferFeeder::new(Arc::clone(&analyser));
//!
//! let pcm = read_wav_pcm("input.wav")?;
//! for block in pcm.blocks(1024) {
//!     feeder.update(&block)?;
//!     if let Some(frame) = analyser.frequency_data() {
//!         draw(&frame.uint8_values);
//!     }
//! }
//! ```

mod convert;
mod feeder;
mod format;
mod pcm;
mod wav;

pub use convert::{FormatConverter, MAX_CHANNELS};
pub use feeder::BufferFeeder;
pub use format::{AudioFormat, SampleFormat};
pub use pcm::{Encoding, PcmBuffer, PcmData, SampleBuffer, StreamDescription};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav_info, read_wav_mono, read_wav_pcm, write_wav};

/// Error types for audio input and conversion.
///
/// When one of these is returned from [`BufferFeeder`], nothing was appended
/// to the analyser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input's encoding or sample format cannot be converted.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A converter could not be built for the input format.
    #[error("Cannot set up format conversion: {0}")]
    ConversionSetupFailed(String),

    /// The input does not describe a well-formed PCM buffer.
    #[error("Cannot create audio buffer: {0}")]
    BufferAllocationFailed(String),

    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio input operations.
pub type Result<T> = std::result::Result<T, Error>;
