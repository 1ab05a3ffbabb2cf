// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::sensors::DEFAULT_DETECTION_PROBABILITY;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Security system display name
    pub system_name: String,

    /// Name of the agent recorded in SYSTEM log entries
    pub agent_name: String,

    /// Data directory (holds the event database)
    pub data_dir: PathBuf,

    /// Log level used when no CLI flag overrides it
    pub log_level: String,

    /// Monitoring loop configuration
    pub monitor: MonitorConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Sensors to register at startup
    pub sensors: Vec<SensorSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system_name: "Smart Home Guardian".to_string(),
            agent_name: "MainAgent".to_string(),
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            monitor: MonitorConfig::default(),
            database: DatabaseConfig::default(),
            sensors: vec![
                SensorSpec::new("Front Door Sensor", "Front Door"),
                SensorSpec::new("Living Room Sensor", "Living Room"),
                SensorSpec::new("Back Door Sensor", "Back Door"),
                SensorSpec::new("Garage Sensor", "Garage"),
            ],
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("homeguard"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Resolved path of the event database
    pub fn db_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("homeguard.db"))
    }
}

/// Monitoring loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Minimum sleep between detection attempts, in seconds
    pub interval_min_secs: f64,

    /// Maximum sleep between detection attempts, in seconds
    pub interval_max_secs: f64,

    /// Detection probability applied to sensors without their own
    pub detection_probability: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_min_secs: 3.0,
            interval_max_secs: 10.0,
            detection_probability: DEFAULT_DETECTION_PROBABILITY,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database path; defaults to `<data_dir>/homeguard.db` when unset
    pub path: Option<PathBuf>,
}

/// A sensor registered at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSpec {
    /// Sensor display name
    pub name: String,

    /// Location the sensor covers
    pub location: String,

    /// Per-sensor detection probability override
    pub probability: Option<f64>,
}

impl SensorSpec {
    /// Spec with no probability override
    pub fn new(name: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            probability: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_registers_the_four_home_sensors() {
        let config = Config::default();
        assert_eq!(config.sensors.len(), 4);
        assert_eq!(config.sensors[0].location, "Front Door");
        assert_eq!(config.monitor.interval_min_secs, 3.0);
        assert_eq!(config.monitor.interval_max_secs, 10.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.system_name, config.system_name);
        assert_eq!(parsed.sensors.len(), config.sensors.len());
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.system_name, created.system_name);
    }

    #[test]
    fn test_db_path_prefers_explicit_override() {
        let mut config = Config::default();
        assert_eq!(config.db_path(), PathBuf::from("./data/homeguard.db"));

        config.database.path = Some(PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/custom.db"));
    }
}
