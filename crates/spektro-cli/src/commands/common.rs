//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use spektro_analyser::Analyser;
use spektro_config::Settings;
use spektro_io::{BufferFeeder, PcmBuffer, read_wav_pcm};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings flags shared by commands that run the analyser.
///
/// Flags override values from the settings file.
#[derive(Args, Debug)]
pub struct AnalyserFlags {
    /// Settings file (defaults to the per-user spektro.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// FFT size (power of two, 32-32768)
    #[arg(long)]
    pub fft_size: Option<usize>,

    /// Lower end of the byte-mapped decibel range
    #[arg(long, allow_hyphen_values = true)]
    pub min_db: Option<f32>,

    /// Upper end of the byte-mapped decibel range
    #[arg(long, allow_hyphen_values = true)]
    pub max_db: Option<f32>,

    /// Smoothing time constant (0-1)
    #[arg(long)]
    pub smoothing: Option<f32>,

    /// Frames per analyser update
    #[arg(long)]
    pub block_size: Option<usize>,
}

impl AnalyserFlags {
    /// Load the settings file and apply flag overrides, then validate.
    pub fn resolve(&self) -> anyhow::Result<Settings> {
        let mut settings = Settings::load_or_default(self.config.as_deref())?;

        if let Some(fft_size) = self.fft_size {
            settings.analyser.fft_size = fft_size;
        }
        if let Some(min_db) = self.min_db {
            settings.analyser.min_decibels = min_db;
        }
        if let Some(max_db) = self.max_db {
            settings.analyser.max_decibels = max_db;
        }
        if let Some(smoothing) = self.smoothing {
            settings.analyser.smoothing_time_constant = smoothing;
        }
        if let Some(block_size) = self.block_size {
            settings.input.block_size = block_size;
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// A WAV file loaded for analysis, with the analyser it feeds.
pub struct FileSession {
    pub pcm: PcmBuffer,
    pub analyser: Arc<Analyser>,
    pub feeder: BufferFeeder,
}

impl FileSession {
    /// Decode `input` and build an analyser from `settings`.
    pub fn open(input: &Path, settings: &Settings) -> anyhow::Result<Self> {
        let pcm = read_wav_pcm(input)
            .with_context(|| format!("failed to read '{}'", input.display()))?;
        let analyser = Arc::new(Analyser::new(settings.analyser)?);
        let feeder = BufferFeeder::new(Arc::clone(&analyser));

        let format = pcm.format();
        tracing::info!(
            input = %input.display(),
            frames = pcm.frames(),
            sample_rate = format.sample_rate,
            channels = format.channels,
            fft_size = settings.analyser.fft_size,
            "loaded input"
        );

        Ok(Self {
            pcm,
            analyser,
            feeder,
        })
    }

    /// Input sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.pcm.format().sample_rate
    }
}

/// One analyser reading, as written to JSON.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    /// Number of blocks fed before this reading.
    pub block: usize,
    /// Input time at the end of the last fed block.
    pub time_secs: f64,
    /// Frequency bytes, one per bin.
    pub frequency: Vec<u8>,
    /// Time-domain bytes, one per sample of the window.
    pub time_domain: Vec<u8>,
}

impl Snapshot {
    /// Read both domains, or `None` while too few samples are buffered.
    pub fn capture(analyser: &Analyser, block: usize, time_secs: f64) -> Option<Self> {
        let frequency = analyser.frequency_data()?;
        let time_domain = analyser.time_domain_data()?;
        Some(Self {
            block,
            time_secs,
            frequency: frequency.uint8_values,
            time_domain: time_domain.uint8_values,
        })
    }
}
