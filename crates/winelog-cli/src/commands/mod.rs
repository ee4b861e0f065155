//! Subcommands.

pub mod batch;
pub mod config;
pub mod import;
pub mod parse;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use winelog_core::WinelogConfig;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("winelog")
        .join("config.json")
}

/// Load the explicit config file, else the user file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<WinelogConfig> {
    if let Some(path) = config_path {
        let path = Path::new(path);
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(WinelogConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config from {}", path.display());
        Ok(WinelogConfig::from_file(&path)?)
    } else {
        Ok(WinelogConfig::default())
    }
}

/// Read an input file, or stdin when the path is `-`.
pub fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read_to_string(input)?)
}
