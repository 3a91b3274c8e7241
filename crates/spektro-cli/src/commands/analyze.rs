//! Streaming analysis of a WAV file.

use super::common::{AnalyserFlags, FileSession, Snapshot};
use crate::bars;
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    flags: AnalyserFlags,

    /// Number of bars drawn
    #[arg(long)]
    bars: Option<usize>,

    /// Read the analyser after every K blocks
    #[arg(long, value_name = "K", default_value = "1")]
    every: usize,

    /// Write every reading to a JSON file instead of drawing bars
    #[arg(long, value_name = "OUT")]
    json: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut settings = args.flags.resolve()?;
    if let Some(bars) = args.bars {
        settings.display.bars = bars;
        settings.validate()?;
    }
    if args.every == 0 {
        anyhow::bail!("--every must be at least 1");
    }

    let session = FileSession::open(&args.input, &settings)?;
    let block_size = settings.input.block_size;
    let sample_rate = f64::from(session.sample_rate());
    let total_blocks = session.pcm.frames().div_ceil(block_size);

    let draw = args.json.is_none();
    let progress = if draw {
        None
    } else {
        let pb = ProgressBar::new(total_blocks as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("##-"),
        );
        Some(pb)
    };

    let mut snapshots = Vec::new();
    let mut frames_fed = 0usize;

    for (index, block) in session.pcm.blocks(block_size).enumerate() {
        session.feeder.update(&block)?;
        frames_fed += block.frames();
        if let Some(pb) = &progress {
            pb.inc(1);
        }

        let fed = index + 1;
        if fed % args.every != 0 {
            continue;
        }
        let time_secs = frames_fed as f64 / sample_rate;
        let Some(snapshot) = Snapshot::capture(&session.analyser, fed, time_secs) else {
            continue;
        };

        if draw {
            let heights = bars::group_bins(
                &snapshot.frequency,
                settings.display.max_bins,
                settings.display.bars,
            );
            println!("{:>9.3}s |{}|", time_secs, bars::render(&heights));
        } else {
            snapshots.push(snapshot);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&snapshots)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!("Wrote {} snapshots to {}", snapshots.len(), path.display());
    }

    tracing::info!(blocks = total_blocks, frames = frames_fed, "analysis complete");
    Ok(())
}
