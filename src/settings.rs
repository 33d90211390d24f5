//! User settings persistence.
//!
//! This module handles loading and saving user preferences across sessions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::vendors::VendorKind;

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Vendor assumed when `convert` is given no source
    #[serde(default)]
    pub default_source: Option<VendorKind>,
    /// Vendor assumed when `convert` is given no target
    #[serde(default)]
    pub default_target: Option<VendorKind>,
    /// Extension for universal documents written by `import`
    #[serde(default = "default_universal_extension")]
    pub universal_extension: String,
}

fn default_version() -> u32 {
    1
}

fn default_universal_extension() -> String {
    "yaml".to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: 1,
            default_source: None,
            default_target: None,
            universal_extension: default_universal_extension(),
        }
    }
}

impl UserSettings {
    /// Get the config directory path for plcudt
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("plcudt"))
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// `<name>.<universal_extension>` file name for an imported definition
    pub fn universal_file_name(&self, name: &str) -> String {
        let ext = self.universal_extension.trim_start_matches('.');
        let ext = if ext.is_empty() { "yaml" } else { ext };
        format!("{}.{}", name, ext)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
