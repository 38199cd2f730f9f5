//! Disabled Application Registry Port
//!
//! A durable set of application names currently marked disabled. Absence
//! means "enabled".

use async_trait::async_trait;
use stratus_core::AppName;

/// Disabled application registry port
#[async_trait]
pub trait DisabledAppRegistry: Send + Sync {
    /// Whether `name` is currently marked disabled.
    ///
    /// A malformed registry payload surfaces as
    /// [`DisabledAppRegistryError::Decode`]; it is never reported as
    /// "enabled".
    async fn contains(&self, name: &AppName) -> Result<bool, DisabledAppRegistryError>;

    /// Mark `name` disabled. Adding an existing entry is a no-op.
    async fn add(&self, name: &AppName) -> Result<(), DisabledAppRegistryError>;

    /// Clear the disabled mark for `name`. Removing an absent entry is a
    /// no-op.
    async fn remove(&self, name: &AppName) -> Result<(), DisabledAppRegistryError>;
}

/// Disabled application registry error
#[derive(thiserror::Error, Debug)]
pub enum DisabledAppRegistryError {
    #[error("Registry backend error: {0}")]
    Backend(String),

    #[error("Undecodable registry entry: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_keeps_detail() {
        let err = DisabledAppRegistryError::Decode("trailing bytes".to_string());
        assert!(err.to_string().contains("Undecodable registry entry"));
        assert!(err.to_string().contains("trailing bytes"));
    }
}
