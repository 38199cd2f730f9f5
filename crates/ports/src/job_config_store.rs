//! Job Configuration Store Port
//!
//! The coordinator only reads job configurations; their lifecycle is owned
//! by the job-configuration subsystem. No server-side filtered query is
//! assumed, so callers filter the full snapshot by owning application.

use async_trait::async_trait;
use stratus_core::JobConfiguration;

/// Job configuration store port
#[async_trait]
pub trait JobConfigStore: Send + Sync {
    /// Snapshot of every stored job configuration.
    async fn load_all(&self) -> Result<Vec<JobConfiguration>, JobConfigStoreError>;
}

/// Job configuration store error
#[derive(thiserror::Error, Debug)]
pub enum JobConfigStoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored configuration is not decodable: {0}")]
    Serialization(String),
}
