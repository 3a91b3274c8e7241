//! Conversion of arbitrary PCM buffers to the analyser's mono `f32` input.

use crate::format::AudioFormat;
use crate::pcm::{PcmBuffer, PcmData};
use crate::{Error, Result};
use std::borrow::Cow;

/// Highest channel count a conversion plan can be built for.
pub const MAX_CHANNELS: u16 = 64;

/// Per-format conversion parameters, rebuilt only when the input format changes.
#[derive(Debug, Clone, Copy)]
struct ConversionPlan {
    source: AudioFormat,
    channels: usize,
    channel_gain: f32,
}

impl ConversionPlan {
    fn build(source: AudioFormat) -> Result<Self> {
        if source.sample_rate == 0 {
            return Err(Error::ConversionSetupFailed(format!(
                "sample rate must be positive ({source})"
            )));
        }
        if source.channels == 0 || source.channels > MAX_CHANNELS {
            return Err(Error::ConversionSetupFailed(format!(
                "channel count must be in 1..={MAX_CHANNELS} ({source})"
            )));
        }
        Ok(Self {
            source,
            channels: usize::from(source.channels),
            channel_gain: 1.0 / f32::from(source.channels),
        })
    }

    fn run(&self, buffer: &PcmBuffer) -> Vec<f32> {
        match buffer.data() {
            PcmData::F32(v) => self.mix(v, |s| s),
            PcmData::F64(v) => self.mix(v, |s| s as f32),
            PcmData::I16(v) => self.mix(v, |s| f32::from(s) / 32_768.0),
            PcmData::I32(v) => self.mix(v, |s| s as f32 / 2_147_483_648.0),
        }
    }

    /// Average all channels of each frame after mapping samples to `f32`.
    fn mix<T: Copy>(&self, samples: &[T], to_f32: impl Fn(T) -> f32) -> Vec<f32> {
        let frames = samples.len() / self.channels;
        if self.channels == 1 {
            return samples.iter().map(|&s| to_f32(s)).collect();
        }

        if self.source.interleaved {
            samples
                .chunks_exact(self.channels)
                .map(|frame| frame.iter().map(|&s| to_f32(s)).sum::<f32>() * self.channel_gain)
                .collect()
        } else {
            let mut mono = vec![0.0f32; frames];
            for channel in samples.chunks_exact(frames.max(1)) {
                for (out, &s) in mono.iter_mut().zip(channel) {
                    *out += to_f32(s);
                }
            }
            for out in &mut mono {
                *out *= self.channel_gain;
            }
            mono
        }
    }
}

/// Converts PCM buffers of any supported format to mono `f32`.
///
/// Buffers that are already mono `f32` pass through untouched. For anything
/// else a plan is built on first use and kept until a buffer in a different
/// format arrives. Channels are down-mixed by averaging; integer samples are
/// scaled by `1 / 2^(bits-1)`. The sample rate is carried through unchanged.
///
/// ## Example
///
/// ```rust
/// use spektro_io::{AudioFormat, FormatConverter, PcmBuffer, PcmData, SampleFormat};
///
/// let format = AudioFormat {
///     sample_format: SampleFormat::I16,
///     channels: 2,
///     sample_rate: 44100,
///     interleaved: true,
/// };
/// let stereo = PcmBuffer::new(format, PcmData::I16(vec![16384, 0, -16384, -16384])).unwrap();
///
/// let mut converter = FormatConverter::new();
/// let mono = converter.convert(&stereo).unwrap();
/// assert_eq!(&*mono, &[0.25, -0.5]);
/// ```
#[derive(Debug, Default)]
pub struct FormatConverter {
    plan: Option<ConversionPlan>,
}

impl FormatConverter {
    /// Create a converter with no plan yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The input format the current plan was built for, if any.
    pub fn current_format(&self) -> Option<AudioFormat> {
        self.plan.map(|plan| plan.source)
    }

    /// Convert `buffer` to mono `f32`.
    ///
    /// Borrows the buffer's samples when no conversion is needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConversionSetupFailed`] if the buffer's format has a
    /// zero sample rate or an unsupported channel count. The previous plan is
    /// kept in that case.
    pub fn convert<'a>(&mut self, buffer: &'a PcmBuffer) -> Result<Cow<'a, [f32]>> {
        let format = *buffer.format();
        if format.is_analyser_native()
            && format.sample_rate > 0
            && let PcmData::F32(samples) = buffer.data()
        {
            return Ok(Cow::Borrowed(samples));
        }

        let plan = match self.plan {
            Some(plan) if plan.source == format => plan,
            _ => {
                let plan = ConversionPlan::build(format)?;
                tracing::debug!(source = %format, "built format conversion plan");
                self.plan = Some(plan);
                plan
            }
        };

        Ok(Cow::Owned(plan.run(buffer)))
    }
}
