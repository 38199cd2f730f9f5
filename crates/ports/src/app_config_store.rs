//! Application Configuration Store Port
//!
//! Defines the interface for durable application configuration storage,
//! keyed by application name.

use async_trait::async_trait;
use stratus_core::{AppConfiguration, AppName};

/// Application configuration store port
#[async_trait]
pub trait AppConfigStore: Send + Sync {
    /// Load one configuration by application name.
    async fn load(&self, name: &AppName)
        -> Result<Option<AppConfiguration>, AppConfigStoreError>;

    /// Persist a new configuration as a single write.
    async fn add(&self, config: &AppConfiguration) -> Result<(), AppConfigStoreError>;

    /// Replace a stored configuration wholesale.
    async fn update(&self, config: &AppConfiguration) -> Result<(), AppConfigStoreError>;

    /// Remove the configuration for `name`. Removing an absent entry is a
    /// no-op.
    async fn remove(&self, name: &AppName) -> Result<(), AppConfigStoreError>;

    /// Snapshot of every stored configuration, in store order.
    async fn load_all(&self) -> Result<Vec<AppConfiguration>, AppConfigStoreError>;
}

/// Application configuration store error
#[derive(thiserror::Error, Debug)]
pub enum AppConfigStoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored configuration is not decodable: {0}")]
    Serialization(String),
}
