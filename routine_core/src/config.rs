//! Configuration file support for routinegen.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/routinegen/config.toml`.

use crate::types::{DifficultyTier, FitnessLevel};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub tuning: Tuning,

    #[serde(default)]
    pub defaults: PreferenceDefaults,
}

/// Where the exercise catalog comes from
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// JSON or CSV catalog file; the built-in catalog is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Numeric constants of the composer
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tuning {
    /// Minimum share of the time budget a routine must fill
    #[serde(default = "default_floor_percent")]
    pub floor_percent: u32,

    /// How far a group (and the whole routine) may run over its budget
    #[serde(default = "default_overshoot_percent")]
    pub overshoot_percent: u32,

    #[serde(default)]
    pub rep_scale_percent: RepScale,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            floor_percent: default_floor_percent(),
            overshoot_percent: default_overshoot_percent(),
            rep_scale_percent: RepScale::default(),
        }
    }
}

/// Rep multipliers per fitness level, in percent
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepScale {
    #[serde(default = "default_beginner_scale")]
    pub beginner: u32,

    #[serde(default = "default_intermediate_scale")]
    pub intermediate: u32,

    #[serde(default = "default_advanced_scale")]
    pub advanced: u32,
}

impl Default for RepScale {
    fn default() -> Self {
        Self {
            beginner: default_beginner_scale(),
            intermediate: default_intermediate_scale(),
            advanced: default_advanced_scale(),
        }
    }
}

impl RepScale {
    pub fn for_level(&self, level: DifficultyTier) -> u32 {
        match level {
            DifficultyTier::Beginner => self.beginner,
            DifficultyTier::Intermediate => self.intermediate,
            DifficultyTier::Advanced => self.advanced,
        }
    }
}

/// Fallback preferences for the command line
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferenceDefaults {
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    #[serde(default = "default_fitness_level")]
    pub fitness_level: FitnessLevel,

    #[serde(default)]
    pub equipment: Vec<String>,

    #[serde(default)]
    pub target_muscle_groups: Vec<String>,
}

impl Default for PreferenceDefaults {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration_minutes(),
            fitness_level: default_fitness_level(),
            equipment: Vec::new(),
            target_muscle_groups: Vec::new(),
        }
    }
}

// Default value functions
fn default_floor_percent() -> u32 {
    70
}

fn default_overshoot_percent() -> u32 {
    20
}

fn default_beginner_scale() -> u32 {
    100
}

fn default_intermediate_scale() -> u32 {
    115
}

fn default_advanced_scale() -> u32 {
    130
}

fn default_duration_minutes() -> u32 {
    30
}

fn default_fitness_level() -> FitnessLevel {
    DifficultyTier::Beginner
}

impl Tuning {
    /// Reject constants the composer cannot honor
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.floor_percent) {
            return Err(Error::Config(format!(
                "tuning.floor_percent must be between 1 and 100 (got {})",
                self.floor_percent
            )));
        }
        if self.overshoot_percent > 100 {
            return Err(Error::Config(format!(
                "tuning.overshoot_percent must be at most 100 (got {})",
                self.overshoot_percent
            )));
        }
        for level in DifficultyTier::ALL {
            let scale = self.rep_scale_percent.for_level(level);
            if scale == 0 || scale > 500 {
                return Err(Error::Config(format!(
                    "tuning.rep_scale_percent.{} must be between 1 and 500 (got {})",
                    level.as_str(),
                    scale
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.tuning.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .ok_or_else(|| {
                    Error::Config("cannot locate a config directory (HOME not set)".into())
                })?,
        };
        Ok(base.join("routinegen").join("config.toml"))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// target, so readers never see a half-written file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

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
        assert!(config.catalog.path.is_none());
        assert_eq!(config.tuning.floor_percent, 70);
        assert_eq!(config.tuning.overshoot_percent, 20);
        assert_eq!(config.tuning.rep_scale_percent.intermediate, 115);
        assert_eq!(config.defaults.duration_minutes, 30);
        assert!(config.tuning.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.catalog.path = Some(PathBuf::from("/srv/catalog.json"));
        config.defaults.equipment = vec!["dumbbells".into()];

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[tuning]
overshoot_percent = 10

[tuning.rep_scale_percent]
advanced = 150
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tuning.overshoot_percent, 10);
        assert_eq!(config.tuning.floor_percent, 70); // default
        assert_eq!(config.tuning.rep_scale_percent.advanced, 150);
        assert_eq!(config.tuning.rep_scale_percent.beginner, 100); // default
        assert_eq!(config.defaults.fitness_level, DifficultyTier::Beginner);
    }

    #[test]
    fn test_invalid_tuning_rejected_on_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[tuning]\nfloor_percent = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.defaults.duration_minutes = 45;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.duration_minutes, 45);

        let extras: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "config.toml")
            .collect();
        assert!(extras.is_empty(), "stray temp files: {:?}", extras);
    }
}
