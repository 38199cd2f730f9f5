//! Ports - Collaborator Interfaces
//!
//! This crate defines the traits the lifecycle coordinator consumes. Each
//! collaborator is an independently-failing external subsystem; adapters
//! implement these traits in the infrastructure layer.

pub mod app_config_store;
pub mod cluster_executor_query;
pub mod disabled_app_registry;
pub mod job_config_store;
pub mod producer_scheduler;

pub use crate::app_config_store::{AppConfigStore, AppConfigStoreError};
pub use crate::cluster_executor_query::{ClusterExecutorQuery, ClusterQueryError};
pub use crate::disabled_app_registry::{DisabledAppRegistry, DisabledAppRegistryError};
pub use crate::job_config_store::{JobConfigStore, JobConfigStoreError};
pub use crate::producer_scheduler::{ProducerScheduler, ProducerSchedulerError};
