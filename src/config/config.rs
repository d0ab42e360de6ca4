//! VoxFlow configuration management
//! Handles loading and saving the config file

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::campaign::AdvanceMode;

/// VoxFlow configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Artificial per-request delays
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Campaign run simulation
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Console client settings
    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9191
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Delay in milliseconds applied before each API operation responds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub stats_ms: u64,
    pub list_agents_ms: u64,
    pub get_agent_ms: u64,
    pub create_agent_ms: u64,
    pub update_agent_ms: u64,
    pub list_campaigns_ms: u64,
    pub start_campaign_ms: u64,
    pub run_status_ms: u64,
    pub pause_run_ms: u64,
    pub stop_run_ms: u64,
    pub list_logs_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stats_ms: 200,
            list_agents_ms: 300,
            get_agent_ms: 200,
            create_agent_ms: 400,
            update_agent_ms: 400,
            list_campaigns_ms: 300,
            start_campaign_ms: 500,
            run_status_ms: 300,
            pause_run_ms: 200,
            stop_run_ms: 200,
            list_logs_ms: 200,
        }
    }
}

/// Campaign run simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Script lines appended per advance step
    pub messages_per_advance: usize,
    pub advance_mode: AdvanceMode,
    /// Ticker period, background mode only
    pub tick_interval_ms: u64,
    /// Load the demo agents and campaign on startup
    pub seed: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            messages_per_advance: 2,
            advance_mode: AdvanceMode::OnRead,
            tick_interval_ms: 2000,
            seed: true,
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Console client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    /// Consecutive failed polls tolerated before giving up
    pub max_poll_failures: u32,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://{}:{}", default_host(), default_port()),
            poll_interval_ms: 2000,
            max_poll_failures: 5,
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load config from the default location or specified path
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = Self::config_path(path)?;

        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&raw).context("Failed to parse config file")?;

        debug!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Save config to the default location or specified path
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = Self::config_path(path)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(&self)?;
        fs::write(&config_path, content).context("Failed to write config file")?;

        info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Get the config file path
    fn config_path(path: Option<&str>) -> Result<PathBuf> {
        // Check env override first
        if let Ok(env_path) = std::env::var("VOXFLOW_CONFIG") {
            return Ok(PathBuf::from(env_path));
        }

        if let Some(p) = path {
            return Ok(PathBuf::from(p));
        }

        let home = dirs::home_dir().context("Cannot find home directory")?;
        Ok(home.join(".voxflow").join("config.yml"))
    }

    /// Address the API server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
