//! Inspect or create the configuration file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use jumpcut_common::config::{config_file_path, AppConfig};

pub fn show(config: &AppConfig, path: Option<&Path>) -> anyhow::Result<()> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn init(config: &AppConfig, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => {
            config
                .save_to(&path)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            path
        }
        None => config.save().context("Failed to write config")?,
    };
    println!("Wrote configuration to {}", path.display());
    Ok(())
}
