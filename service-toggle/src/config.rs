//! Configuration for the toggle service

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::toggle::ServiceContext;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToggleConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Managed service process
    #[serde(default)]
    pub service: ServiceConfig,

    /// Editor display strings
    #[serde(default)]
    pub descriptions: DescriptionConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl ToggleConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4010))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Executable started on `Start`. Empty means nothing to run.
    #[serde(default)]
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            program: String::new(),
            args: Vec::new(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }
}

impl ServiceConfig {
    /// Build the context handed to every start/stop call
    pub fn context(&self) -> ServiceContext {
        ServiceContext {
            service_name: self.name.clone(),
            program: self.program.clone(),
            args: self.args.clone(),
            working_dir: self.working_dir.clone(),
            env: self.env.clone(),
        }
    }
}

fn default_service_name() -> String {
    "proxy".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionConfig {
    #[serde(default = "default_on_description")]
    pub on: String,

    #[serde(default = "default_off_description")]
    pub off: String,
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            on: default_on_description(),
            off: default_off_description(),
        }
    }
}

impl DescriptionConfig {
    pub fn for_state(&self, checked: bool) -> &str {
        if checked {
            &self.on
        } else {
            &self.off
        }
    }
}

fn default_on_description() -> String {
    "Start proxy service".to_string()
}

fn default_off_description() -> String {
    "Stop proxy service".to_string()
}

/// Hand-off storage. Without a data directory the configuration lives in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
}
