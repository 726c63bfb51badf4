//! Translator configuration, stored as TOML.
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use strum::EnumIs;

use crate::magic::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, ENV_CONFIG_PATH};
use crate::utils::error::{DloError, DloResult};

/// When to emit colored output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumIs)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Preferred line width when rendering records.
    pub width: usize,
    pub color: ColorMode,
    /// Verify every emitted set describes each variable exactly once.
    pub check_frames: bool,
    /// Log the normalized flow chain at debug level.
    pub dump_flow: bool,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            width: 80,
            color: ColorMode::Auto,
            check_frames: true,
            dump_flow: false,
        }
    }
}

impl TranslateConfig {
    /// Get the default path to the configuration file.
    pub fn default_path() -> PathBuf {
        // Check if the environment variable is set
        if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
            return config_path.into();
        }

        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push(CONFIG_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        path
    }

    /// Parse a configuration from TOML text. Missing keys take their default value.
    pub fn from_toml_str(toml_str: &str, file: &str) -> DloResult<Self> {
        toml::from_str(toml_str).map_err(|e| DloError::ConfigParseError {
            source: e,
            file: file.to_string(),
        })
    }

    /// Load a configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> DloResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str, &path.display().to_string())
    }

    /// Load from `path`, or from [`Self::default_path`] when `None`. A missing
    /// file yields the default configuration.
    pub fn load_or_default(path: Option<&Path>) -> DloResult<Self> {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);
        if !path.exists() {
            debug!(
                "No configuration found at `{}`, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        debug!("Loading configuration from `{}`", path.display());
        Self::load_from_toml(&path)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save_to_toml(&self, path: &Path) -> DloResult<()> {
        let toml_str = toml::to_string(self).map_err(|e| DloError::ConfigSerializeError {
            source: e,
            file: path.display().to_string(),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }
}
