use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk. The JMA endpoints are keyless, so
/// this holds preferences only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Office code forecasts default to, e.g. "130000".
    pub default_office: Option<String>,
}

impl Config {
    /// The configured default office code.
    pub fn default_office_code(&self) -> Result<&str> {
        self.default_office.as_deref().ok_or_else(|| {
            anyhow!(
                "No default office configured.\n\
                 Hint: run `jma configure <office>` (e.g. `jma configure 130000`) first."
            )
        })
    }

    pub fn set_default_office(&mut self, code: &str) {
        self.default_office = Some(code.to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

/// Platform directories shared by the config file and the area cache.
pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "jma-task", "jma-cli")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
