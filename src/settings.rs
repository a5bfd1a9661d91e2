//! Persisted viewer settings: mute flag, music playback position, and
//! the selected theme. Simple key-value state stored as JSON under the
//! platform config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const THEMES: [&str; 4] = ["defaultTheme", "fireTheme", "waterTheme", "grassTheme"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub muted: bool,
    pub playback_position: f64,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            playback_position: 0.0,
            theme: THEMES[0].to_string(),
        }
    }
}

impl Settings {
    /// Advance to the next theme in the fixed cycle. An unknown saved
    /// theme restarts the cycle from the default.
    pub fn cycle_theme(&mut self) {
        let index = THEMES
            .iter()
            .position(|theme| *theme == self.theme)
            .map(|index| (index + 1) % THEMES.len())
            .unwrap_or(0);
        self.theme = THEMES[index].to_string();
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }
}

pub fn default_path() -> PathBuf {
    let base = dirs_next::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("pokedex").join("settings.json")
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable (first run, or a corrupt write).
pub async fn load(path: &Path) -> Settings {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => Settings::default(),
    }
}

pub async fn save(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create settings directory: {}", e))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| format!("Failed to write settings: {}", e))?;
    Ok(())
}
