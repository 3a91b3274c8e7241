//! Settings inspection command.

use clap::Args;
use spektro_config::{Settings, default_config_path};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the default settings file path instead of the settings
    #[arg(long)]
    path: bool,

    /// Settings file to show (defaults to the per-user spektro.toml if present)
    #[arg(long, value_name = "FILE", conflicts_with = "path")]
    config: Option<PathBuf>,

    /// Write the effective settings to the default path
    #[arg(long, conflicts_with = "path")]
    init: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    if args.path {
        println!("{}", default_config_path().display());
        return Ok(());
    }

    let settings = Settings::load_or_default(args.config.as_deref())?;

    if args.init {
        let path = default_config_path();
        if path.exists() {
            anyhow::bail!("'{}' already exists", path.display());
        }
        settings.save(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    print!("{}", settings.to_toml_string()?);
    Ok(())
}
