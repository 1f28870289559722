//! User defaults persistence
//!
//! Stores defaults in `~/.config/codesteps/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::render::PresentationMode;

/// Defaults applied when the command line or a manifest doesn't say
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeStepsConfig {
    /// How active letters are shown
    #[serde(default)]
    pub presentation: PresentationMode,
    /// Trim host text by default
    #[serde(default)]
    pub trim: bool,
    /// Language used when a file extension is not recognized
    #[serde(default = "default_language")]
    pub fallback_language: String,
}

fn default_language() -> String {
    "plaintext".to_string()
}

impl Default for CodeStepsConfig {
    fn default() -> Self {
        Self {
            presentation: PresentationMode::default(),
            trim: false,
            fallback_language: default_language(),
        }
    }
}

impl CodeStepsConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; missing or invalid files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
