use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::api::DEFAULT_PATH_PREFIX;
use crate::storage::StorageConfig;
use crate::types::UpdatePolicy;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageSection,
    pub update: UpdateSection,
    pub logging: LoggingSection,
    pub diagnostics: DiagnosticsSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path = env::var("CABS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(&config_path)
    }

    /// Load configuration from `config_path` (if it exists) overlaid with
    /// `CABS_`-prefixed environment variables.
    pub fn load_from(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let mut builder = config::Config::builder();

        if config_path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CABS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Resolve the storage backend configuration.
    pub fn storage_runtime(&self) -> Result<StorageConfig> {
        self.storage.to_runtime()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix the cab routes are mounted under
    pub path_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageSection {
    pub backend: StorageBackendKind,
    pub local: Option<LocalStorageSection>,
}

impl StorageSection {
    pub fn to_runtime(&self) -> Result<StorageConfig> {
        match self.backend {
            StorageBackendKind::Memory => Ok(StorageConfig::Memory),
            StorageBackendKind::Local => {
                let local = self.local.clone().unwrap_or_default();
                if local.root_path.trim().is_empty() {
                    bail!("storage.local.root_path must be specified");
                }

                Ok(StorageConfig::Local {
                    root_path: local.root_path,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalStorageSection {
    pub root_path: String,
}

impl Default for LocalStorageSection {
    fn default() -> Self {
        Self {
            root_path: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UpdateSection {
    pub policy: UpdatePolicy,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSection {
    /// Report create requests through `tracing`; when off they are dropped
    pub enabled: bool,
}

impl Default for DiagnosticsSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}
