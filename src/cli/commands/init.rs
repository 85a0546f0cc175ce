//! `init` command: writes a default `.i18nlintrc.json` in the current directory.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::cli::ExitStatus;
use crate::config::{default_config_json, CONFIG_FILE_NAME};

pub fn run() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    println!("wrote {CONFIG_FILE_NAME}");
    Ok(ExitStatus::Success)
}
