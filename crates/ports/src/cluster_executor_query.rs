//! Cluster Executor Query Port
//!
//! Read-only view over live cluster state: which executors are currently
//! running work for a given application.

use async_trait::async_trait;
use stratus_core::{AppName, ExecutorRef};

/// Cluster executor query port
#[async_trait]
pub trait ClusterExecutorQuery: Send + Sync {
    /// Live executors currently running work for `app`.
    ///
    /// An undecodable cluster state payload surfaces as
    /// [`ClusterQueryError::Decode`]; it is never reported as an empty
    /// executor list.
    async fn executors_for_app(&self, app: &AppName)
        -> Result<Vec<ExecutorRef>, ClusterQueryError>;
}

/// Cluster executor query error
#[derive(thiserror::Error, Debug)]
pub enum ClusterQueryError {
    #[error("Cluster state backend error: {0}")]
    Backend(String),

    #[error("Undecodable cluster state: {0}")]
    Decode(String),
}
