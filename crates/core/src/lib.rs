//! Domain Core - Application Lifecycle Types
//!
//! This crate contains the entities and value objects shared by the
//! lifecycle coordinator, its collaborator ports, and the store adapters.

pub mod app;
pub mod executor;
pub mod job;

// Re-export all types for easy importing
pub use crate::app::{AppConfiguration, AppName};
pub use crate::executor::{ExecutorRef, STOP_EXECUTOR_PAYLOAD};
pub use crate::job::{JobConfiguration, JobExecutionType, JobName};
