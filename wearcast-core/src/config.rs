use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::outfit::UserProfile;

pub const DEFAULT_USER_AGENT: &str = "wearcast/0.1 (https://github.com/wearcast/wearcast)";
pub const DEFAULT_GEOCODE_BASE: &str = "https://api.zippopotam.us/us";
pub const DEFAULT_WEATHER_BASE: &str = "https://api.weather.gov";

/// Base URLs of the upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Postal-code lookup; the ZIP is appended as a path segment.
    pub geocode_base: String,
    /// Weather provider root serving `/points` and `/alerts/active`.
    pub weather_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocode_base: DEFAULT_GEOCODE_BASE.to_string(),
            weather_base: DEFAULT_WEATHER_BASE.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// user_agent = "wearcast/0.1 (contact: me@example.com)"
/// timeout_secs = 10
///
/// [profile]
/// cold_sensitivity = 1
/// commute_minutes = 45
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identifying client string sent with every request.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Overrides the platform cache directory.
    pub cache_dir: Option<PathBuf>,
    pub profile: UserProfile,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            cache_dir: None,
            profile: UserProfile::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Stored profile with sensitivity clamped to its valid range.
    pub fn user_profile(&self) -> UserProfile {
        UserProfile::new(self.profile.cold_sensitivity, self.profile.commute_minutes)
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = UserProfile::new(profile.cold_sensitivity, profile.commute_minutes);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if cfg.user_profile() != cfg.profile {
            tracing::warn!(
                cold_sensitivity = cfg.profile.cold_sensitivity,
                "cold_sensitivity outside [-2, 2], clamping"
            );
        }

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "wearcast", "wearcast")
            .ok_or_else(|| anyhow!("Could not determine platform directories"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory for geocode and points cache entries.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::project_dirs()?.cache_dir().to_path_buf()),
        }
    }

    /// JSON file holding the saved places.
    pub fn places_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("places.json"))
    }
}
