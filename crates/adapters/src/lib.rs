//! Adapters - Store Implementations
//!
//! This crate contains the implementations of the store ports defined in
//! stratus-ports, plus the configuration used to pick and build a storage
//! backend.

pub mod config;
pub mod memory;
pub mod redb;

pub use crate::config::{ConfigError, StorageBackend, StorageConfig, StorageHandles};
pub use crate::memory::{
    InMemoryAppConfigStore, InMemoryDisabledAppRegistry, InMemoryJobConfigStore,
};
pub use crate::redb::{RedbAppConfigStore, RedbDisabledAppRegistry, RedbJobConfigStore};
