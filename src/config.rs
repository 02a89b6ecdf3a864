use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DATABASE, DEFAULT_MAX_WORKERS, ERROR_FLASH_MS};

const CONFIG_FILE: &str = "config.yaml";

/// Shell settings, read from `~/.mami/config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Upper bound on tasks running at the same time
    pub max_workers: usize,
    /// How long an error message stays in the error tone
    pub error_flash_ms: u64,
    /// Log file, relative to the working directory
    pub log_file: String,
    /// Database label shown in the status bar once connected
    pub database_name: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            max_workers: DEFAULT_MAX_WORKERS,
            error_flash_ms: ERROR_FLASH_MS,
            log_file: String::from("mami.log"),
            database_name: String::from(DEFAULT_DATABASE),
        }
    }
}

impl ShellConfig {
    /// Default configuration directory (`~/.mami`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mami")
    }

    /// Load from the default directory
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir())
    }

    /// Load `config.yaml` from `dir`; a missing file yields the defaults
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config: ShellConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;

        // A pool with no worker would never run anything
        config.max_workers = config.max_workers.max(1);
        Ok(config)
    }

    /// Write the configuration to `dir`, creating it if needed
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }

    pub fn error_flash(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.error_flash_ms)
    }
}
