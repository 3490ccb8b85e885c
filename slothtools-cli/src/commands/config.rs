//! Settings file generation

use anyhow::{bail, Context, Result};
use clap::Args;
use slothtools_core::ToolSettings;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct InitConfigArgs {
    /// Where to write the settings JSON
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: InitConfigArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", args.path.display());
    }
    slothtools_io::write_settings(&ToolSettings::default(), &args.path)
        .with_context(|| format!("writing {}", args.path.display()))?;
    info!(path = %args.path.display(), "wrote default settings");
    Ok(())
}
