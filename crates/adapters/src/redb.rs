//! Redb Store Adapters
//!
//! Durable single-node implementations of the store ports on top of the
//! redb embedded key-value store. Keys are application or job names;
//! values are JSON-encoded.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition};
use tokio::sync::Mutex;
use tracing::{debug, info};

use stratus_core::{AppConfiguration, AppName, JobConfiguration, JobName};
use stratus_ports::{
    AppConfigStore, AppConfigStoreError, DisabledAppRegistry, DisabledAppRegistryError,
    JobConfigStore, JobConfigStoreError,
};

const APPS_TABLE: TableDefinition<'static, &'static str, Vec<u8>> =
    TableDefinition::new("app_configurations");

const JOBS_TABLE: TableDefinition<'static, &'static str, Vec<u8>> =
    TableDefinition::new("job_configurations");

const DISABLED_TABLE: TableDefinition<'static, &'static str, Vec<u8>> =
    TableDefinition::new("disabled_apps");

/// Redb-backed application configuration store
pub struct RedbAppConfigStore {
    db: Arc<Mutex<Database>>,
}

impl RedbAppConfigStore {
    /// Open (or create) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppConfigStoreError> {
        let db = Database::create(path).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to open app config database: {}", e))
        })?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Create the backing table so later reads do not race table creation.
    pub async fn init_schema(&self) -> Result<(), AppConfigStoreError> {
        info!("Initializing redb schema for app configurations");

        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;
        tx.open_table(APPS_TABLE).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to create table: {}", e))
        })?;
        tx.commit().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    fn encode(config: &AppConfiguration) -> Result<Vec<u8>, AppConfigStoreError> {
        serde_json::to_vec(config).map_err(|e| {
            AppConfigStoreError::Serialization(format!(
                "Failed to encode app configuration: {}",
                e
            ))
        })
    }

    fn decode(bytes: &[u8]) -> Result<AppConfiguration, AppConfigStoreError> {
        serde_json::from_slice(bytes).map_err(|e| {
            AppConfigStoreError::Serialization(format!(
                "Failed to decode stored app configuration: {}",
                e
            ))
        })
    }

    async fn write(&self, config: &AppConfiguration) -> Result<(), AppConfigStoreError> {
        debug!("Persisting app configuration: {}", config.app_name);

        let value = Self::encode(config)?;
        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let mut table = tx.open_table(APPS_TABLE).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to open table: {}", e))
        })?;
        table.insert(config.app_name.as_str(), value).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to insert configuration: {}", e))
        })?;
        drop(table); // Explicitly drop before commit

        tx.commit().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl AppConfigStore for RedbAppConfigStore {
    async fn load(
        &self,
        name: &AppName,
    ) -> Result<Option<AppConfiguration>, AppConfigStoreError> {
        let db = self.db.lock().await;
        let tx = db.begin_read().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let table = tx.open_table(APPS_TABLE).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to open table: {}", e))
        })?;
        let value = table.get(name.as_str()).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to read configuration: {}", e))
        })?;

        match value {
            Some(guard) => Ok(Some(Self::decode(&guard.value())?)),
            None => Ok(None),
        }
    }

    async fn add(&self, config: &AppConfiguration) -> Result<(), AppConfigStoreError> {
        self.write(config).await
    }

    async fn update(&self, config: &AppConfiguration) -> Result<(), AppConfigStoreError> {
        self.write(config).await
    }

    async fn remove(&self, name: &AppName) -> Result<(), AppConfigStoreError> {
        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let mut table = tx.open_table(APPS_TABLE).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to open table: {}", e))
        })?;
        table.remove(name.as_str()).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to remove configuration: {}", e))
        })?;
        drop(table); // Explicitly drop before commit

        tx.commit().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<AppConfiguration>, AppConfigStoreError> {
        let db = self.db.lock().await;
        let tx = db.begin_read().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let table = tx.open_table(APPS_TABLE).map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to open table: {}", e))
        })?;
        let iter = table.iter().map_err(|e| {
            AppConfigStoreError::Backend(format!("Failed to iterate table: {}", e))
        })?;

        let mut configs = Vec::new();
        for item in iter {
            let (_key, value) = item.map_err(|e| {
                AppConfigStoreError::Backend(format!("Failed to read entry: {}", e))
            })?;
            configs.push(Self::decode(&value.value())?);
        }

        Ok(configs)
    }
}

/// Redb-backed job configuration store
///
/// The lifecycle coordinator only reads from this store; `put` and
/// `delete` are the write path used by the job-configuration subsystem.
pub struct RedbJobConfigStore {
    db: Arc<Mutex<Database>>,
}

impl RedbJobConfigStore {
    /// Open (or create) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, JobConfigStoreError> {
        let db = Database::create(path).map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to open job config database: {}", e))
        })?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Create the backing table so later reads do not race table creation.
    pub async fn init_schema(&self) -> Result<(), JobConfigStoreError> {
        info!("Initializing redb schema for job configurations");

        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;
        tx.open_table(JOBS_TABLE).map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to create table: {}", e))
        })?;
        tx.commit().map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    /// Insert or replace one job configuration.
    pub async fn put(&self, job: &JobConfiguration) -> Result<(), JobConfigStoreError> {
        debug!("Persisting job configuration: {}", job.job_name);

        let value = serde_json::to_vec(job).map_err(|e| {
            JobConfigStoreError::Serialization(format!(
                "Failed to encode job configuration: {}",
                e
            ))
        })?;

        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let mut table = tx.open_table(JOBS_TABLE).map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to open table: {}", e))
        })?;
        table.insert(job.job_name.as_str(), value).map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to insert configuration: {}", e))
        })?;
        drop(table); // Explicitly drop before commit

        tx.commit().map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    /// Remove one job configuration. Removing an absent entry is a no-op.
    pub async fn delete(&self, job: &JobName) -> Result<(), JobConfigStoreError> {
        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let mut table = tx.open_table(JOBS_TABLE).map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to open table: {}", e))
        })?;
        table.remove(job.as_str()).map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to remove configuration: {}", e))
        })?;
        drop(table); // Explicitly drop before commit

        tx.commit().map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl JobConfigStore for RedbJobConfigStore {
    async fn load_all(&self) -> Result<Vec<JobConfiguration>, JobConfigStoreError> {
        let db = self.db.lock().await;
        let tx = db.begin_read().map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let table = tx.open_table(JOBS_TABLE).map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to open table: {}", e))
        })?;
        let iter = table.iter().map_err(|e| {
            JobConfigStoreError::Backend(format!("Failed to iterate table: {}", e))
        })?;

        let mut jobs = Vec::new();
        for item in iter {
            let (_key, value) = item.map_err(|e| {
                JobConfigStoreError::Backend(format!("Failed to read entry: {}", e))
            })?;
            let job = serde_json::from_slice(&value.value()).map_err(|e| {
                JobConfigStoreError::Serialization(format!(
                    "Failed to decode stored job configuration: {}",
                    e
                ))
            })?;
            jobs.push(job);
        }

        Ok(jobs)
    }
}

/// Redb-backed disabled application registry
///
/// Each entry stores a JSON-encoded copy of the application name; a
/// payload that no longer decodes surfaces as
/// [`DisabledAppRegistryError::Decode`] rather than reading as "enabled".
pub struct RedbDisabledAppRegistry {
    db: Arc<Mutex<Database>>,
}

impl RedbDisabledAppRegistry {
    /// Open (or create) the registry file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DisabledAppRegistryError> {
        let db = Database::create(path).map_err(|e| {
            DisabledAppRegistryError::Backend(format!(
                "Failed to open disabled-app database: {}",
                e
            ))
        })?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Create the backing table so later reads do not race table creation.
    pub async fn init_schema(&self) -> Result<(), DisabledAppRegistryError> {
        info!("Initializing redb schema for the disabled-app registry");

        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to begin transaction: {}", e))
        })?;
        tx.open_table(DISABLED_TABLE).map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to create table: {}", e))
        })?;
        tx.commit().map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl DisabledAppRegistry for RedbDisabledAppRegistry {
    async fn contains(&self, name: &AppName) -> Result<bool, DisabledAppRegistryError> {
        let db = self.db.lock().await;
        let tx = db.begin_read().map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let table = tx.open_table(DISABLED_TABLE).map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to open table: {}", e))
        })?;
        let value = table.get(name.as_str()).map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to read entry: {}", e))
        })?;

        match value {
            Some(guard) => {
                serde_json::from_slice::<String>(&guard.value()).map_err(|e| {
                    DisabledAppRegistryError::Decode(format!(
                        "Failed to decode registry entry for '{}': {}",
                        name, e
                    ))
                })?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add(&self, name: &AppName) -> Result<(), DisabledAppRegistryError> {
        debug!("Marking application disabled: {}", name);

        let value = serde_json::to_vec(name.as_str()).map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to encode registry entry: {}", e))
        })?;

        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let mut table = tx.open_table(DISABLED_TABLE).map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to open table: {}", e))
        })?;
        table.insert(name.as_str(), value).map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to insert entry: {}", e))
        })?;
        drop(table); // Explicitly drop before commit

        tx.commit().map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }

    async fn remove(&self, name: &AppName) -> Result<(), DisabledAppRegistryError> {
        debug!("Clearing disabled mark: {}", name);

        let db = self.db.lock().await;
        let tx = db.begin_write().map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to begin transaction: {}", e))
        })?;

        let mut table = tx.open_table(DISABLED_TABLE).map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to open table: {}", e))
        })?;
        table.remove(name.as_str()).map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to remove entry: {}", e))
        })?;
        drop(table); // Explicitly drop before commit

        tx.commit().map_err(|e| {
            DisabledAppRegistryError::Backend(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(())
    }
}
