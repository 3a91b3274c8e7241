//! Audio stream format descriptions.

use std::fmt;

/// Sample representation of a PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// 32-bit IEEE float.
    F32,
    /// 64-bit IEEE float.
    F64,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
}

impl SampleFormat {
    /// Width of one sample in bytes.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::I16 => 2,
            Self::F32 | Self::I32 => 4,
            Self::F64 => 8,
        }
    }

    /// Returns `true` for the floating-point formats.
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::I16 => "int16",
            Self::I32 => "int32",
        };
        f.write_str(name)
    }
}

/// Complete description of a PCM stream.
///
/// Planar buffers store each channel contiguously (`[c0 f0.., c1 f0..]`);
/// interleaved buffers store frames contiguously (`[f0 c0, f0 c1, ..]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    /// Sample representation.
    pub sample_format: SampleFormat,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Whether channels are interleaved within each frame.
    pub interleaved: bool,
}

impl AudioFormat {
    /// The analyser's input format at `sample_rate`: mono, non-interleaved `f32`.
    pub fn mono_f32(sample_rate: u32) -> Self {
        Self {
            sample_format: SampleFormat::F32,
            channels: 1,
            sample_rate,
            interleaved: false,
        }
    }

    /// Returns `true` if buffers in this format can be fed to the analyser
    /// without conversion.
    ///
    /// A single channel has the same layout whether or not it is flagged
    /// interleaved.
    pub fn is_analyser_native(&self) -> bool {
        self.sample_format == SampleFormat::F32 && self.channels == 1
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, {}, {}",
            self.sample_rate,
            self.channels,
            self.sample_format,
            if self.interleaved {
                "interleaved"
            } else {
                "planar"
            }
        )
    }
}
