use super::slot::DEFAULT_SLOT_KEY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run due-today reminders
    pub reminders: bool,
    /// Key of the slot holding the task list
    pub slot: String,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminders: true,
            slot: DEFAULT_SLOT_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Load settings from settings.json, defaults when the file is missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    let Some(content) = super::read_file(path)? else {
        return Ok(Settings::default());
    };

    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file: {}", path.display()))?;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    super::atomic_write(path, &json)?;
    Ok(())
}
