use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ANGLE_DEG: f64 = 10.0;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Quiet period before a typed query is searched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Angle of attack a new session starts with
    #[serde(default = "default_angle_deg")]
    pub default_angle_deg: f64,
    /// CSV export of the aircraft characteristics sheet
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_angle_deg() -> f64 {
    DEFAULT_ANGLE_DEG
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_angle_deg: DEFAULT_ANGLE_DEG,
            dataset_path: None,
        }
    }
}

impl Settings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn default_path() -> PathBuf {
        crate::get_config_root().join("settings.json")
    }

    /// Loads from the per-user config directory. A missing or unreadable file
    /// yields the defaults.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable settings — path={} error={:#}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read settings.json")?;
        serde_json::from_str(&content).context("Failed to parse settings.json")
    }
}
