//! Test signal generation command.

use clap::Args;
use spektro_io::{WavSpec, write_wav};
use std::f32::consts::TAU;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Frequency in Hz
    #[arg(long, default_value = "1000.0")]
    freq: f32,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Amplitude (0-1)
    #[arg(long, default_value = "0.5")]
    amplitude: f32,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    if args.sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    if !(args.duration.is_finite() && args.duration >= 0.0) {
        anyhow::bail!("--duration must be a non-negative number of seconds");
    }

    let samples = sine(args.freq, args.duration, args.sample_rate, args.amplitude);
    let spec = WavSpec {
        channels: 1,
        sample_rate: args.sample_rate,
        bits_per_sample: 32,
    };
    write_wav(&args.output, &samples, spec)?;

    println!(
        "Generated {:.1} Hz sine, {:.2}s -> {}",
        args.freq,
        args.duration,
        args.output.display()
    );
    Ok(())
}

fn sine(freq: f32, duration: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let len = (duration * sample_rate as f32) as usize;
    let step = freq / sample_rate as f32;
    (0..len)
        .map(|i| {
            // Wrap phase so long files stay accurate
            let phase = (i as f32 * step).fract();
            amplitude * (TAU * phase).sin()
        })
        .collect()
}
