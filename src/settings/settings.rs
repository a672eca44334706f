// Settings management
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "food_orders.json";

/// Main application settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub version: i32, // Settings schema version for future migrations
    pub database_path: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: 1,
            database_path: PathBuf::from("food_orders.db"),
        }
    }
}

impl AppSettings {
    /// Get the settings file path
    pub fn get_settings_path(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE)
    }

    /// Load settings from file, or return defaults if the file doesn't exist
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::get_settings_path(dir);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        let settings: AppSettings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load settings, falling back to defaults with a warning on any failure
    pub fn load_or_default(dir: &Path) -> Self {
        Self::load(dir).unwrap_or_else(|e| {
            let reason = format!("{:#}", e);
            tracing::warn!(error = %reason, "using default settings");
            Self::default()
        })
    }
}
