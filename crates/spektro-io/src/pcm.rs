//! Typed PCM buffers and raw sample containers.

use crate::format::{AudioFormat, SampleFormat};
use crate::{Error, Result};

/// Sample storage for a [`PcmBuffer`], one variant per [`SampleFormat`].
#[derive(Debug, Clone, PartialEq)]
pub enum PcmData {
    /// 32-bit float samples.
    F32(Vec<f32>),
    /// 64-bit float samples.
    F64(Vec<f64>),
    /// 16-bit integer samples.
    I16(Vec<i16>),
    /// 32-bit integer samples.
    I32(Vec<i32>),
}

impl PcmData {
    /// Total number of samples across all channels.
    pub fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I32(v) => v.len(),
        }
    }

    /// Returns `true` if no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sample format of the stored values.
    pub fn sample_format(&self) -> SampleFormat {
        match self {
            Self::F32(_) => SampleFormat::F32,
            Self::F64(_) => SampleFormat::F64,
            Self::I16(_) => SampleFormat::I16,
            Self::I32(_) => SampleFormat::I32,
        }
    }
}

/// A block of PCM audio in a known [`AudioFormat`].
///
/// Construction guarantees that the stored samples match the declared sample
/// format and form a whole number of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    format: AudioFormat,
    data: PcmData,
}

impl PcmBuffer {
    /// Wrap `data` as a buffer in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferAllocationFailed`] if the data variant disagrees
    /// with `format.sample_format` or the sample count is not a multiple of
    /// the channel count.
    pub fn new(format: AudioFormat, data: PcmData) -> Result<Self> {
        if data.sample_format() != format.sample_format {
            return Err(Error::BufferAllocationFailed(format!(
                "{} samples supplied for a {} stream",
                data.sample_format(),
                format.sample_format
            )));
        }
        let channels = usize::from(format.channels);
        if channels > 0 && data.len() % channels != 0 {
            return Err(Error::BufferAllocationFailed(format!(
                "{} samples is not a whole number of {}-channel frames",
                data.len(),
                channels
            )));
        }
        Ok(Self { format, data })
    }

    /// A mono `f32` buffer, the analyser's native input.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            format: AudioFormat::mono_f32(sample_rate),
            data: PcmData::F32(samples),
        }
    }

    /// The buffer's format.
    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    /// The stored samples.
    pub fn data(&self) -> &PcmData {
        &self.data
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        match usize::from(self.format.channels) {
            0 => 0,
            channels => self.data.len() / channels,
        }
    }

    /// Copy frames `start..end` into a new buffer of the same format.
    ///
    /// The range is clamped to the buffer.
    pub fn slice_frames(&self, start: usize, end: usize) -> Self {
        let frames = self.frames();
        let end = end.min(frames);
        let start = start.min(end);
        let layout = FrameLayout {
            channels: usize::from(self.format.channels),
            frames,
            interleaved: self.format.interleaved,
        };
        let data = match &self.data {
            PcmData::F32(v) => PcmData::F32(layout.slice(v, start, end)),
            PcmData::F64(v) => PcmData::F64(layout.slice(v, start, end)),
            PcmData::I16(v) => PcmData::I16(layout.slice(v, start, end)),
            PcmData::I32(v) => PcmData::I32(layout.slice(v, start, end)),
        };
        Self {
            format: self.format,
            data,
        }
    }

    /// Split into consecutive blocks of `frames_per_block` frames.
    ///
    /// The last block may be shorter. A block size of zero is treated as one.
    pub fn blocks(&self, frames_per_block: usize) -> impl Iterator<Item = PcmBuffer> + '_ {
        let step = frames_per_block.max(1);
        (0..self.frames())
            .step_by(step)
            .map(move |start| self.slice_frames(start, start + step))
    }
}

struct FrameLayout {
    channels: usize,
    frames: usize,
    interleaved: bool,
}

impl FrameLayout {
    fn slice<T: Copy>(&self, samples: &[T], start: usize, end: usize) -> Vec<T> {
        if self.interleaved {
            return samples[start * self.channels..end * self.channels].to_vec();
        }
        let mut out = Vec::with_capacity((end - start) * self.channels);
        for channel in samples.chunks_exact(self.frames.max(1)).take(self.channels) {
            out.extend_from_slice(&channel[start..end]);
        }
        out
    }
}

/// How the bytes of a [`SampleBuffer`] are encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Uncompressed linear PCM.
    LinearPcm,
    /// Anything else, named by its codec identifier.
    Other(String),
}

/// Format of the bytes carried by a [`SampleBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescription {
    /// Byte encoding.
    pub encoding: Encoding,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels.
    pub channels: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Whether samples are IEEE floats.
    pub is_float: bool,
    /// Whether channels are interleaved within each frame.
    pub interleaved: bool,
}

impl StreamDescription {
    /// The typed sample format these bytes decode to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for non-PCM encodings and for bit
    /// depths other than float32/64 and int16/32.
    pub fn sample_format(&self) -> Result<SampleFormat> {
        if let Encoding::Other(codec) = &self.encoding {
            return Err(Error::UnsupportedFormat(format!(
                "{codec} is not linear PCM"
            )));
        }
        let bits = usize::from(self.bits_per_sample);
        [
            SampleFormat::F32,
            SampleFormat::F64,
            SampleFormat::I16,
            SampleFormat::I32,
        ]
        .into_iter()
        .find(|format| format.is_float() == self.is_float && format.bytes_per_sample() * 8 == bits)
        .ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "{bits}-bit {} samples",
                if self.is_float { "float" } else { "integer" }
            ))
        })
    }
}

/// Raw little-endian sample bytes plus the description needed to decode them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    description: StreamDescription,
    bytes: Vec<u8>,
}

impl SampleBuffer {
    /// Wrap `bytes` described by `description`.
    pub fn new(description: StreamDescription, bytes: Vec<u8>) -> Self {
        Self { description, bytes }
    }

    /// The stream description.
    pub fn description(&self) -> &StreamDescription {
        &self.description
    }

    /// The raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode into a typed [`PcmBuffer`].
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] if the encoding or bit depth is not
    ///   supported
    /// - [`Error::BufferAllocationFailed`] if the bytes do not hold a whole
    ///   number of frames
    pub fn to_pcm(&self) -> Result<PcmBuffer> {
        let desc = &self.description;
        let sample_format = desc.sample_format()?;
        let width = sample_format.bytes_per_sample();
        let frame_bytes = width * usize::from(desc.channels).max(1);
        if self.bytes.len() % frame_bytes != 0 {
            return Err(Error::BufferAllocationFailed(format!(
                "{} bytes is not a whole number of {frame_bytes}-byte frames",
                self.bytes.len()
            )));
        }

        let chunks = self.bytes.chunks_exact(width);
        let data = match sample_format {
            SampleFormat::F32 => PcmData::F32(
                chunks
                    .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                    .collect(),
            ),
            SampleFormat::F64 => PcmData::F64(
                chunks
                    .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
                    .collect(),
            ),
            SampleFormat::I16 => PcmData::I16(
                chunks
                    .map(|b| i16::from_le_bytes([b[0], b[1]]))
                    .collect(),
            ),
            SampleFormat::I32 => PcmData::I32(
                chunks
                    .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                    .collect(),
            ),
        };

        PcmBuffer::new(
            AudioFormat {
                sample_format,
                channels: desc.channels,
                sample_rate: desc.sample_rate,
                interleaved: desc.interleaved,
            },
            data,
        )
    }
}
