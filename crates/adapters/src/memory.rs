//! In-Memory Store Adapters
//!
//! Map-backed implementations of the store ports for tests and
//! single-process development setups.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use stratus_core::{AppConfiguration, AppName, JobConfiguration};
use stratus_ports::{
    AppConfigStore, AppConfigStoreError, DisabledAppRegistry, DisabledAppRegistryError,
    JobConfigStore, JobConfigStoreError,
};

#[derive(Default)]
pub struct InMemoryAppConfigStore {
    apps: Mutex<HashMap<AppName, AppConfiguration>>,
}

impl InMemoryAppConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppConfigStore for InMemoryAppConfigStore {
    async fn load(
        &self,
        name: &AppName,
    ) -> Result<Option<AppConfiguration>, AppConfigStoreError> {
        let apps = self.apps.lock().await;
        Ok(apps.get(name).cloned())
    }

    async fn add(&self, config: &AppConfiguration) -> Result<(), AppConfigStoreError> {
        let mut apps = self.apps.lock().await;
        apps.insert(config.app_name.clone(), config.clone());
        Ok(())
    }

    async fn update(&self, config: &AppConfiguration) -> Result<(), AppConfigStoreError> {
        let mut apps = self.apps.lock().await;
        apps.insert(config.app_name.clone(), config.clone());
        Ok(())
    }

    async fn remove(&self, name: &AppName) -> Result<(), AppConfigStoreError> {
        let mut apps = self.apps.lock().await;
        apps.remove(name);
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<AppConfiguration>, AppConfigStoreError> {
        let apps = self.apps.lock().await;
        Ok(apps.values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryJobConfigStore {
    jobs: Mutex<Vec<JobConfiguration>>,
}

impl InMemoryJobConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a job configuration. Job lifecycle is owned by the
    /// job-configuration subsystem; this is the write path it would use.
    pub async fn push(&self, job: JobConfiguration) {
        self.jobs.lock().await.push(job);
    }
}

#[async_trait]
impl JobConfigStore for InMemoryJobConfigStore {
    async fn load_all(&self) -> Result<Vec<JobConfiguration>, JobConfigStoreError> {
        let jobs = self.jobs.lock().await;
        Ok(jobs.clone())
    }
}

#[derive(Default)]
pub struct InMemoryDisabledAppRegistry {
    entries: Mutex<HashSet<AppName>>,
}

impl InMemoryDisabledAppRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DisabledAppRegistry for InMemoryDisabledAppRegistry {
    async fn contains(&self, name: &AppName) -> Result<bool, DisabledAppRegistryError> {
        let entries = self.entries.lock().await;
        Ok(entries.contains(name))
    }

    async fn add(&self, name: &AppName) -> Result<(), DisabledAppRegistryError> {
        let mut entries = self.entries.lock().await;
        entries.insert(name.clone());
        Ok(())
    }

    async fn remove(&self, name: &AppName) -> Result<(), DisabledAppRegistryError> {
        let mut entries = self.entries.lock().await;
        entries.remove(name);
        Ok(())
    }
}
