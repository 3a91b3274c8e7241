//! Spektro CLI - run the audio analyser over WAV files.

mod bars;
mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spektro")]
#[command(author, version, about = "Spektro audio analyser CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream a WAV file through the analyser and draw the spectrum
    Analyze(commands::analyze::AnalyzeArgs),

    /// Print the analyser output after a whole WAV file as JSON
    Snapshot(commands::snapshot::SnapshotArgs),

    /// Generate a sine test file
    Generate(commands::generate::GenerateArgs),

    /// Show effective settings or the settings file location
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Snapshot(args) => commands::snapshot::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
