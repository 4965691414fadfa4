//! CLI configuration at ~/.config/calgrid/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calgrid_core::LayoutConfig;
use serde::Deserialize;

fn default_visible_rows() -> usize {
    2
}

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Item source used when `--items` is not given
    pub items_file: Option<PathBuf>,

    /// Holiday feed (.ics) merged into every view
    pub holiday_feed: Option<PathBuf>,

    /// Rows shown per month cell before collapsing into "+N more"
    #[serde(default = "default_visible_rows")]
    pub visible_rows: usize,

    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            items_file: None,
            holiday_feed: None,
            visible_rows: default_visible_rows(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Get the config directory path (~/.config/calgrid)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("calgrid");
    Ok(config_dir)
}

/// Get the config file path (~/.config/calgrid/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from ~/.config/calgrid/config.toml, or defaults if it does not exist
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    let layout = config.layout.validated()?;
    Ok(Config { layout, ..config })
}

/// Write a default config file with all options commented out.
pub fn create_default_config(path: &Path) -> Result<()> {
    let contents = "\
# calgrid configuration

# Item source (JSON or TOML) used when --items is not given:
# items_file = \"~/calendar/items.json\"

# Holiday feed merged into every view:
# holiday_feed = \"~/calendar/holidays.ics\"

# Rows shown per month cell before \"+N more\":
# visible_rows = 2

[layout]
# Length in minutes of deadline and holiday markers in day/week views:
# marker_minutes = 30

# Minimum length in minutes of an event in day/week views:
# min_grid_minutes = 1
";

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create config directory: {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Could not write config file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calgrid/config.toml");

        create_default_config(&path).unwrap();
        let config = load_config_from(&path).unwrap();

        assert!(config.items_file.is_none());
        assert_eq!(config.visible_rows, 2);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_layout_table_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[layout]\nmin_grid_minutes = 0\n").unwrap();

        assert!(load_config_from(&path).is_err());
    }
}
