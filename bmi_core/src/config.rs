//! Configuration file support for the BMI analyzer.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi-analyzer/config.toml`.

use crate::units::{HeightUnit, WeightUnit};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "bmi-analyzer";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Units assumed when the command line does not name one
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitsConfig {
    #[serde(default = "default_weight_unit")]
    pub weight_unit: WeightUnit,

    #[serde(default = "default_height_unit")]
    pub height_unit: HeightUnit,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            weight_unit: default_weight_unit(),
            height_unit: default_height_unit(),
        }
    }
}

/// History display configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            display_limit: default_display_limit(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR)
}

fn default_weight_unit() -> WeightUnit {
    WeightUnit::Kilogram
}

fn default_height_unit() -> HeightUnit {
    HeightUnit::Meter
}

fn default_display_limit() -> usize {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history.display_limit == 0 {
            return Err(Error::Config(
                "history.display_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(APP_DIR).join("config.toml")
    }

    /// Location of the profile history inside a data directory
    pub fn history_path(data_dir: &Path) -> PathBuf {
        data_dir.join("history").join("profiles.jsonl")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.units.weight_unit, WeightUnit::Kilogram);
        assert_eq!(config.units.height_unit, HeightUnit::Meter);
        assert_eq!(config.history.display_limit, 10);
        assert!(config.data.data_dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.units.weight_unit = WeightUnit::Pound;
        config.units.height_unit = HeightUnit::FeetInches;
        config.history.display_limit = 25;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.units.weight_unit, WeightUnit::Pound);
        assert_eq!(loaded.units.height_unit, HeightUnit::FeetInches);
        assert_eq!(loaded.history.display_limit, 25);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[units]
height_unit = "cm"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.units.height_unit, HeightUnit::Centimeter);
        assert_eq!(config.units.weight_unit, WeightUnit::Kilogram); // default
        assert_eq!(config.history.display_limit, 10);
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let toml_str = r#"
[units]
weight_unit = "stone"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_zero_display_limit_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[history]\ndisplay_limit = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_history_path() {
        let path = Config::history_path(Path::new("/tmp/data"));
        assert_eq!(path, PathBuf::from("/tmp/data/history/profiles.jsonl"));
    }
}
