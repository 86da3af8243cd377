//! Configuration for fares and data file locations.
//!
//! Load order: `.metro/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level metro configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetroConfig {
    pub fare: FareConfig,
    pub data: DataConfig,
}

/// Fare settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    /// Price of a single hop between adjacent stations.
    pub base_fare: u64,
    /// Label printed before prices.
    pub currency: String,
}

/// Locations of the flat data files. Relative paths resolve against the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub stations_file: PathBuf,
    pub lines_file: PathBuf,
    /// Append-only ticket log.
    pub tickets_file: PathBuf,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fare: 10,
            currency: "Rs".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            stations_file: PathBuf::from("data/stations.csv"),
            lines_file: PathBuf::from("data/lines.csv"),
            tickets_file: PathBuf::from("data/tickets.csv"),
        }
    }
}

impl DataConfig {
    pub fn stations_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.stations_file)
    }

    pub fn lines_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.lines_file)
    }

    pub fn tickets_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.tickets_file)
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl MetroConfig {
    /// Path of the config file for a project root.
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(".metro").join("config.toml")
    }

    /// Load config from `.metro/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = Self::config_path(project_root);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("METRO_BASE_FARE", &mut config.fare.base_fare);
        env_override("METRO_STATIONS_FILE", &mut config.data.stations_file);
        env_override("METRO_LINES_FILE", &mut config.data.lines_file);
        env_override("METRO_TICKETS_FILE", &mut config.data.tickets_file);

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.fare.base_fare == 0 {
            anyhow::bail!("fare.base_fare must be greater than zero");
        }
        Ok(())
    }
}
