use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::DiscoverySources;

const APP_DIR: &str = "ssh-tui";
const CONFIG_FILE: &str = "config.toml";
const LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ssh_config_file: PathBuf,
    pub known_hosts_file: PathBuf,
    pub include_known_hosts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Relative fallback keeps defaults constructible without a home dir.
        let ssh_dir = dirs::home_dir()
            .map(|home| home.join(".ssh"))
            .unwrap_or_else(|| PathBuf::from(".ssh"));

        Self {
            ssh_config_file: ssh_dir.join("config"),
            known_hosts_file: ssh_dir.join("known_hosts"),
            include_known_hosts: true,
        }
    }
}

impl AppConfig {
    pub fn discovery_sources(&self) -> DiscoverySources {
        DiscoverySources {
            ssh_config: self.ssh_config_file.clone(),
            known_hosts: self
                .include_known_hosts
                .then(|| self.known_hosts_file.clone()),
        }
    }
}

#[derive(Debug)]
pub struct ConfigManager {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join(APP_DIR);

        Self::with_dir(config_dir)
    }

    pub fn with_dir(config_dir: PathBuf) -> Result<Self> {
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        let config_file = config_dir.join(CONFIG_FILE);
        Ok(Self {
            config_dir,
            config_file,
        })
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        // First run: write the defaults so users have something to edit.
        if !self.config_file.exists() {
            let default_config = AppConfig::default();
            self.save_config(&default_config)?;
            tracing::info!("Created default config at {:?}", self.config_file);
            return Ok(default_config);
        }

        let content =
            fs::read_to_string(&self.config_file).context("Failed to read config file")?;
        let config: AppConfig = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.config_file, toml).context("Failed to write config file")?;
        Ok(())
    }

    pub fn log_dir(&self) -> PathBuf {
        self.config_dir.join(LOG_DIR)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_file
    }
}
