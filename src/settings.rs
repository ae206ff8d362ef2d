//! Game settings
//!
//! Read from a JSON file at startup. A missing or malformed file is not an
//! error: defaults are used and the problem is logged.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "BREAKOUT_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "breakout.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding sound assets
    pub assets_dir: PathBuf,
    /// Play sound effects
    pub sound_enabled: bool,
    /// Fixed seed for launch vectors (random per run when unset)
    pub seed: Option<u64>,
    /// Frame pacing target
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            sound_enabled: true,
            seed: None,
            target_fps: TICK_RATE,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if settings.target_fps == 0 {
            log::warn!("target_fps must be positive, using {}", TICK_RATE);
            settings.target_fps = TICK_RATE;
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Settings file location: `$BREAKOUT_SETTINGS` or `./breakout.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Seed for the next session: fixed if configured, otherwise fresh entropy
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
