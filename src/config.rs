use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::geometry::Point;
use crate::zone::WatchZone;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub zone: ZoneConfig,
    pub feed: FeedConfig,
    pub prediction: PredictionConfig,
    pub alerting: AlertingConfig,
}

/// The four named corners of the watch rectangle, each a `[lat, lon]` pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub north_west: [f64; 2],
    pub north_east: [f64; 2],
    pub south_west: [f64; 2],
    pub south_east: [f64; 2],
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            north_west: [40.778359, -75.370324],
            north_east: [40.781476, -75.286990],
            south_west: [40.697236, -75.293060],
            south_east: [40.702459, -75.253274],
        }
    }
}

impl ZoneConfig {
    pub fn watch_zone(&self) -> WatchZone {
        let corner = |c: [f64; 2]| Point::new(c[0], c[1]);
        WatchZone::new(
            corner(self.north_west),
            corner(self.north_east),
            corner(self.south_west),
            corner(self.south_east),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Snapshot endpoint URL.
    pub url: Option<String>,
    /// Local snapshot file, used instead of the URL when set.
    pub file: Option<PathBuf>,
    pub timeout_seconds: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub horizon_minutes: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            horizon_minutes: 3.0,
        }
    }
}

impl PredictionConfig {
    pub fn horizon_hours(&self) -> f64 {
        self.horizon_minutes / 60.0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlertingConfig {
    pub enabled: bool,
    pub endpoint_url: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads an explicit path, or falls back to the platform config file and
    /// finally to built-in defaults when no file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lapwing")
        .join("config.toml")
}
