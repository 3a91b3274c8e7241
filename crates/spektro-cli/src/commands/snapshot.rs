//! Final analyser reading for a whole WAV file.

use super::common::{AnalyserFlags, FileSession, Snapshot};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SnapshotArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    flags: AnalyserFlags,
}

pub fn run(args: SnapshotArgs) -> anyhow::Result<()> {
    let settings = args.flags.resolve()?;
    let session = FileSession::open(&args.input, &settings)?;

    let mut blocks = 0;
    for block in session.pcm.blocks(settings.input.block_size) {
        session.feeder.update(&block)?;
        blocks += 1;
    }

    let time_secs = session.pcm.frames() as f64 / f64::from(session.sample_rate());
    let Some(snapshot) = Snapshot::capture(&session.analyser, blocks, time_secs) else {
        anyhow::bail!(
            "'{}' has {} frames, fewer than the FFT size of {}",
            args.input.display(),
            session.pcm.frames(),
            settings.analyser.fft_size
        );
    };

    println!("{}", serde_json::to_string(&snapshot)?);
    Ok(())
}
