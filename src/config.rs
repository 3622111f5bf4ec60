//! Application configuration loaded from TOML.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub heatmap: HeatmapConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub max_rows: usize,
    pub cache: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./Data/Motor_Vehicle_Collisions_NYC.csv"),
            max_rows: 100_000,
            cache: true,
        }
    }
}

/// Hexagon heatmap layer settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Hexagon radius in meters.
    pub radius: f64,
    pub elevation_scale: f64,
    pub elevation_range: [f64; 2],
    /// Initial web-map zoom level around the data midpoint.
    pub zoom: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            elevation_scale: 4.0,
            elevation_range: [0.0, 1000.0],
            zoom: 11.0,
        }
    }
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}

/// Load an explicit config, fall back to `config.toml` if present, else defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.is_file() {
                load(default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [dataset]
            max_rows = 70000

            [heatmap]
            radius = 250.0
            "#,
        )
        .unwrap();

        assert_eq!(config.dataset.max_rows, 70_000);
        assert!(config.dataset.cache);
        assert_eq!(config.heatmap.radius, 250.0);
        assert_eq!(config.heatmap.elevation_range, [0.0, 1000.0]);
        assert_eq!(config.heatmap.elevation_scale, 4.0);
    }

    #[test]
    fn explicit_missing_file_fails() {
        assert!(load_or_default(Some(Path::new("no/such/config.toml"))).is_err());
    }
}
