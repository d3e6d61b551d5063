//! Persisted user configuration: the last-used ROM/cassette paths, the
//! audio sample rate, and the SDL scancodes bound to the reset button and
//! joystick. A missing or unparsable config file is never fatal — it falls
//! back to hardcoded defaults with a diagnostic, since configuration is a
//! convenience layer over those defaults, not a required input (§7).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rom_path: Option<String>,
    pub cassette_path: Option<String>,
    pub scale: u32,
    pub audio_sample_rate: u32,
    pub reset_scancode: String,
    pub joystick_fire_scancode: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rom_path: None,
            cassette_path: None,
            scale: 3,
            audio_sample_rate: 44_100,
            reset_scancode: "F12".to_string(),
            joystick_fire_scancode: "LCtrl".to_string(),
        }
    }
}

impl Config {
    /// Default config file location: `$XDG_CONFIG_HOME/phosphor/config.toml`
    /// (or the platform equivalent via `dirs::config_dir`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("phosphor").join("config.toml"))
    }

    /// Load from `path`, falling back to defaults (with a console diagnostic)
    /// if the file is missing or malformed.
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!(
                        "warning: failed to parse config {}: {e} (using defaults)",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist to `path`, creating parent directories as needed.
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self).unwrap_or_default();
        std::fs::write(path, text)
    }
}
