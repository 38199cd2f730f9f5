//! Storage Configuration
//!
//! Selects and builds the storage backend for the lifecycle coordinator's
//! stores. Configuration is environment-first with an optional YAML file.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use stratus_ports::{AppConfigStore, DisabledAppRegistry, JobConfigStore};

use crate::memory::{
    InMemoryAppConfigStore, InMemoryDisabledAppRegistry, InMemoryJobConfigStore,
};
use crate::redb::{RedbAppConfigStore, RedbDisabledAppRegistry, RedbJobConfigStore};

type Result<T> = std::result::Result<T, ConfigError>;

/// Which backend the store factory builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps; state is lost on restart.
    Memory,
    /// Durable embedded redb database files under `data_dir`.
    Redb,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "redb" => Ok(StorageBackend::Redb),
            _ => Err(ConfigError::InvalidValue("STRATUS_STORAGE_BACKEND".to_string())),
        }
    }
}

/// Storage configuration for the coordinator's stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend built by [`StorageConfig::build`].
    pub backend: StorageBackend,

    /// Directory holding the redb database files; unused by the memory
    /// backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl StorageConfig {
    /// Load configuration from environment and file.
    ///
    /// Precedence: a YAML file named by `STRATUS_CONFIG_PATH`, then inline
    /// YAML in `STRATUS_CONFIG_YAML`, then individual environment
    /// variables.
    pub fn load() -> Result<Self> {
        let config = match (
            std::env::var("STRATUS_CONFIG_PATH").ok(),
            std::env::var("STRATUS_CONFIG_YAML").ok(),
        ) {
            (Some(path), None) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path));
                }
                let content = std::fs::read_to_string(&path)?;
                serde_yaml::from_str(&content)?
            }
            (None, Some(yaml)) => serde_yaml::from_str(&yaml)?,
            _ => Self::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let backend = match std::env::var("STRATUS_STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Memory,
        };

        let data_dir = std::env::var("STRATUS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Ok(Self { backend, data_dir })
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::Redb && self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("data_dir".to_string()));
        }

        Ok(())
    }

    /// Build the configured backend and return handles for the three
    /// stores.
    pub async fn build(&self) -> Result<StorageHandles> {
        match self.backend {
            StorageBackend::Memory => {
                info!("Building in-memory storage backend");

                Ok(StorageHandles {
                    app_configs: Arc::new(InMemoryAppConfigStore::new()),
                    job_configs: Arc::new(InMemoryJobConfigStore::new()),
                    disabled_apps: Arc::new(InMemoryDisabledAppRegistry::new()),
                })
            }
            StorageBackend::Redb => {
                info!("Building redb storage backend in {}", self.data_dir.display());

                std::fs::create_dir_all(&self.data_dir)?;

                let app_configs =
                    RedbAppConfigStore::open(self.data_dir.join("app_configurations.redb"))
                        .map_err(|e| ConfigError::Storage(e.to_string()))?;
                app_configs
                    .init_schema()
                    .await
                    .map_err(|e| ConfigError::Storage(e.to_string()))?;

                let job_configs =
                    RedbJobConfigStore::open(self.data_dir.join("job_configurations.redb"))
                        .map_err(|e| ConfigError::Storage(e.to_string()))?;
                job_configs
                    .init_schema()
                    .await
                    .map_err(|e| ConfigError::Storage(e.to_string()))?;

                let disabled_apps =
                    RedbDisabledAppRegistry::open(self.data_dir.join("disabled_apps.redb"))
                        .map_err(|e| ConfigError::Storage(e.to_string()))?;
                disabled_apps
                    .init_schema()
                    .await
                    .map_err(|e| ConfigError::Storage(e.to_string()))?;

                Ok(StorageHandles {
                    app_configs: Arc::new(app_configs),
                    job_configs: Arc::new(job_configs),
                    disabled_apps: Arc::new(disabled_apps),
                })
            }
        }
    }
}

/// Handles to the built stores, ready for coordinator construction.
pub struct StorageHandles {
    pub app_configs: Arc<dyn AppConfigStore>,
    pub job_configs: Arc<dyn JobConfigStore>,
    pub disabled_apps: Arc<dyn DisabledAppRegistry>,
}

/// Storage configuration error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse configuration YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration value for {0}")]
    InvalidValue(String),

    #[error("Failed to build storage backend: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_yaml_configuration() {
        let config: StorageConfig = serde_yaml::from_str(
            r#"
            backend: redb
            data_dir: /var/lib/stratus
            "#,
        )
        .unwrap();

        assert_eq!(config.backend, StorageBackend::Redb);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/stratus"));
    }

    #[test]
    fn test_yaml_data_dir_defaults_when_omitted() {
        let config: StorageConfig = serde_yaml::from_str("backend: memory").unwrap();

        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_backend_parse_rejects_unknown_value() {
        let result: Result<StorageBackend> = "postgres".parse();
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validate_rejects_redb_without_data_dir() {
        let config = StorageConfig {
            backend: StorageBackend::Redb,
            data_dir: PathBuf::new(),
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[tokio::test]
    async fn test_build_memory_backend() {
        let handles = StorageConfig::default().build().await.unwrap();

        assert!(handles.app_configs.load_all().await.unwrap().is_empty());
        assert!(handles.job_configs.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_build_redb_backend_in_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Redb,
            data_dir: dir.path().join("stores"),
        };

        let handles = config.build().await.unwrap();

        assert!(handles.app_configs.load_all().await.unwrap().is_empty());
        assert!(!handles
            .disabled_apps
            .contains(&stratus_core::AppName::from("billing"))
            .await
            .unwrap());
    }
}
