//! WAV file reading and writing.

use crate::convert::FormatConverter;
use crate::format::{AudioFormat, SampleFormat};
use crate::pcm::{PcmBuffer, PcmData};
use crate::Result;
use hound::{WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.duration());
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate.max(1));

    let format = match spec.sample_format {
        hound::SampleFormat::Float => WavFormat::IeeeFloat,
        hound::SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification used when writing.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample. 32 writes float samples, anything else integers.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                hound::SampleFormat::Float
            } else {
                hound::SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as an interleaved [`PcmBuffer`] in its stored format.
///
/// Float files load as [`SampleFormat::F32`] and 16-bit files as
/// [`SampleFormat::I16`]. 8-, 24- and 32-bit integer files load as
/// [`SampleFormat::I32`], left-justified so full scale maps to `i32` range.
pub fn read_wav_pcm<P: AsRef<Path>>(path: P) -> Result<PcmBuffer> {
    let (pcm, _) = decode_wav(WavReader::open(path)?)?;
    Ok(pcm)
}

/// Read a WAV file and return mono f32 samples along with the spec.
///
/// Multi-channel files are mixed down to mono by averaging channels. The
/// returned spec describes the file as stored.
///
/// # Example
/// ```ignore
/// let (samples, spec) = read_wav_mono("input.wav")?;
/// println!("Loaded {} samples at {} Hz", samples.len(), spec.sample_rate);
/// ```
pub fn read_wav_mono<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let (pcm, spec) = decode_wav(WavReader::open(path)?)?;
    let mono = FormatConverter::new().convert(&pcm)?.into_owned();
    Ok((mono, spec))
}

fn decode_wav<R: std::io::Read>(reader: WavReader<R>) -> Result<(PcmBuffer, WavSpec)> {
    let spec = reader.spec();

    let (sample_format, data) = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, _) => (
            SampleFormat::F32,
            PcmData::F32(
                reader
                    .into_samples::<f32>()
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            ),
        ),
        (hound::SampleFormat::Int, 16) => (
            SampleFormat::I16,
            PcmData::I16(
                reader
                    .into_samples::<i16>()
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            ),
        ),
        (hound::SampleFormat::Int, bits) => {
            let shift = 32 - u32::from(bits.min(32));
            (
                SampleFormat::I32,
                PcmData::I32(
                    reader
                        .into_samples::<i32>()
                        .map(|s| s.map(|v| v << shift))
                        .collect::<std::result::Result<Vec<_>, _>>()?,
                ),
            )
        }
    };

    let pcm = PcmBuffer::new(
        AudioFormat {
            sample_format,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            interleaved: true,
        },
        data,
    )?;
    Ok((pcm, WavSpec::from(spec)))
}

/// Write interleaved samples to a WAV file.
///
/// # Example
/// ```ignore
/// let samples = vec![0.0f32; 48000]; // 1 second of silence
/// let spec = WavSpec { sample_rate: 48000, ..Default::default() };
/// write_wav("output.wav", &samples, spec)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let hound_spec = hound::WavSpec::from(spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_f32() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let pcm = read_wav_pcm(file.path()).unwrap();
        assert_eq!(pcm.format().sample_format, SampleFormat::F32);
        assert_eq!(pcm.data(), &PcmData::F32(samples));
    }

    #[test]
    fn test_i16_loads_as_i16() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[0.5, -0.5, 0.25, 0.0], spec).unwrap();

        let pcm = read_wav_pcm(file.path()).unwrap();
        assert_eq!(pcm.format().channels, 2);
        assert!(pcm.format().interleaved);
        assert_eq!(pcm.frames(), 2);
        assert_eq!(pcm.data(), &PcmData::I16(vec![16384, -16384, 8192, 0]));
    }

    #[test]
    fn test_24bit_left_justified() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 24,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[0.5, -1.0], spec).unwrap();

        let pcm = read_wav_pcm(file.path()).unwrap();
        assert_eq!(pcm.format().sample_format, SampleFormat::I32);
        assert_eq!(pcm.data(), &PcmData::I32(vec![1 << 30, i32::MIN]));
    }

    #[test]
    fn test_8bit_left_justified() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 8,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[0.5, -1.0, 0.0], spec).unwrap();

        let pcm = read_wav_pcm(file.path()).unwrap();
        assert_eq!(pcm.format().sample_format, SampleFormat::I32);
        assert_eq!(pcm.data(), &PcmData::I32(vec![1 << 30, i32::MIN, 0]));
    }

    #[test]
    fn test_read_mono_reports_stored_bit_depth() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 24,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[0.5, 0.5, -0.5, 0.0], spec).unwrap();

        let (mono, loaded_spec) = read_wav_mono(file.path()).unwrap();
        assert_eq!(loaded_spec.bits_per_sample, 24);
        assert_eq!(loaded_spec.channels, 2);
        assert_eq!(loaded_spec.sample_rate, 44100);
        assert_eq!(mono, vec![0.5, -0.25]);
    }

    #[test]
    fn test_read_mono_averages_channels() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[1.0, 0.0, 0.5, -0.5], spec).unwrap();

        let (mono, loaded_spec) = read_wav_mono(file.path()).unwrap();
        assert_eq!(loaded_spec.channels, 2);
        assert_eq!(mono, vec![0.5, 0.0]);
    }

    #[test]
    fn test_info() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 16,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &vec![0.0; 48000 * 2], spec).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.num_frames, 48000);
        assert_eq!(info.format, WavFormat::Pcm);
        assert!((info.duration_secs - 1.0).abs() < 1e-9);
    }
}
