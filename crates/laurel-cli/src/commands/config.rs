//! Config command implementation.

use std::path::Path;

use anyhow::{bail, Context, Result};

use laurel_core::config::Config;

use super::{ConfigAction, ConfigArgs};

/// Run the config command.
pub fn run(config_path: &Path, args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Init => init(config_path),
        ConfigAction::Show => show(config_path),
    }
}

fn init(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    Config::default()
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn show(path: &Path) -> Result<()> {
    let config = super::load_config(path);
    print!("{}", config.to_toml_string()?);
    Ok(())
}
