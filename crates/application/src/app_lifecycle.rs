//! Application Lifecycle Coordination
//!
//! Orchestrates multi-step state transitions across the configuration
//! stores, the disabled-app registry, the producer scheduler, and the
//! cluster executor query.
//!
//! Authoritative writes (registry, configuration store) fail the operation
//! outright; per-job and per-executor cascade steps are independent units
//! of work whose failures are collected into a [`CascadeReport`] instead of
//! aborting the remaining items.

use std::sync::Arc;

use tracing::{debug, info, warn};

use stratus_core::{
    AppConfiguration, AppName, ExecutorRef, JobConfiguration, JobName, STOP_EXECUTOR_PAYLOAD,
};
use stratus_ports::{
    AppConfigStore, AppConfigStoreError, ClusterExecutorQuery, DisabledAppRegistry,
    DisabledAppRegistryError, JobConfigStore, JobConfigStoreError, ProducerScheduler,
};

/// Coordinates application lifecycle transitions.
///
/// Holds no state of its own; every collaborator is injected at
/// construction so deployments and tests can substitute implementations.
/// Consistency relies on the collaborators' own per-key guarantees: the
/// coordinator takes no in-process lock, and overlapping calls for the
/// same application race with last-write-wins on the registry.
pub struct AppLifecycleCoordinator<A, J, D, S, C>
where
    A: AppConfigStore + ?Sized,
    J: JobConfigStore + ?Sized,
    D: DisabledAppRegistry + ?Sized,
    S: ProducerScheduler + ?Sized,
    C: ClusterExecutorQuery + ?Sized,
{
    app_configs: Arc<A>,
    job_configs: Arc<J>,
    disabled_apps: Arc<D>,
    scheduler: Arc<S>,
    cluster: Arc<C>,
}

impl<A, J, D, S, C> AppLifecycleCoordinator<A, J, D, S, C>
where
    A: AppConfigStore + ?Sized,
    J: JobConfigStore + ?Sized,
    D: DisabledAppRegistry + ?Sized,
    S: ProducerScheduler + ?Sized,
    C: ClusterExecutorQuery + ?Sized,
{
    /// Create a new coordinator instance.
    pub fn new(
        app_configs: Arc<A>,
        job_configs: Arc<J>,
        disabled_apps: Arc<D>,
        scheduler: Arc<S>,
        cluster: Arc<C>,
    ) -> Self {
        Self {
            app_configs,
            job_configs,
            disabled_apps,
            scheduler,
            cluster,
        }
    }

    /// Register a new application configuration.
    ///
    /// Fails with [`LifecycleError::AlreadyExists`] if a configuration for
    /// the same name is already stored; nothing is written in that case.
    pub async fn register_app(&self, config: AppConfiguration) -> Result<(), LifecycleError> {
        if config.app_name.is_empty() {
            return Err(LifecycleError::Validation(
                "application name must not be empty".to_string(),
            ));
        }

        if self.app_configs.load(&config.app_name).await?.is_some() {
            return Err(LifecycleError::AlreadyExists(config.app_name));
        }

        self.app_configs.add(&config).await?;
        info!("Registered application: {}", config.app_name);

        Ok(())
    }

    /// Replace the stored configuration for an already-registered
    /// application. No cascading effects on jobs or the scheduler.
    pub async fn update_app(&self, config: AppConfiguration) -> Result<(), LifecycleError> {
        if self.app_configs.load(&config.app_name).await?.is_none() {
            return Err(LifecycleError::NotFound(config.app_name));
        }

        self.app_configs.update(&config).await?;
        info!("Updated application: {}", config.app_name);

        Ok(())
    }

    /// Load one application configuration. Absence is a structured result,
    /// not an error.
    pub async fn get_app(
        &self,
        name: &AppName,
    ) -> Result<Option<AppConfiguration>, LifecycleError> {
        Ok(self.app_configs.load(name).await?)
    }

    /// Snapshot of every registered application, in store order.
    pub async fn list_apps(&self) -> Result<Vec<AppConfiguration>, LifecycleError> {
        Ok(self.app_configs.load_all().await?)
    }

    /// Whether `name` is currently marked disabled.
    ///
    /// A malformed registry payload surfaces as
    /// [`LifecycleError::MalformedState`], never as `false`.
    pub async fn is_disabled(&self, name: &AppName) -> Result<bool, LifecycleError> {
        Ok(self.disabled_apps.contains(name).await?)
    }

    /// Mark an application disabled and stop producing runs of its jobs.
    ///
    /// A no-op when the application is not registered. The registry write
    /// lands before the per-job cascade so that a crash mid-cascade leaves
    /// the application correctly marked disabled; a retry is safe and
    /// idempotent.
    pub async fn disable_app(&self, name: &AppName) -> Result<CascadeReport, LifecycleError> {
        if self.app_configs.load(name).await?.is_none() {
            debug!("Disable requested for unregistered application: {}", name);
            return Ok(CascadeReport::default());
        }

        self.disabled_apps.add(name).await?;
        info!("Application marked disabled: {}", name);

        let mut report = CascadeReport {
            applied: true,
            ..CascadeReport::default()
        };
        for job in self.jobs_of(name).await? {
            match self.scheduler.unschedule(&job.job_name).await {
                Ok(()) => report.jobs_signaled += 1,
                Err(err) => record_failure(
                    &mut report,
                    CascadeFailure::Job {
                        job: job.job_name,
                        reason: err.to_string(),
                    },
                ),
            }
        }

        Ok(report)
    }

    /// Clear the disabled mark and resume producing runs of the
    /// application's jobs.
    ///
    /// Mirror of [`disable_app`](Self::disable_app): a no-op when the
    /// application is not registered, and the registry write lands before
    /// the cascade.
    pub async fn enable_app(&self, name: &AppName) -> Result<CascadeReport, LifecycleError> {
        if self.app_configs.load(name).await?.is_none() {
            debug!("Enable requested for unregistered application: {}", name);
            return Ok(CascadeReport::default());
        }

        self.disabled_apps.remove(name).await?;
        info!("Application marked enabled: {}", name);

        let mut report = CascadeReport {
            applied: true,
            ..CascadeReport::default()
        };
        for job in self.jobs_of(name).await? {
            match self.scheduler.reschedule(&job.job_name).await {
                Ok(()) => report.jobs_signaled += 1,
                Err(err) => record_failure(
                    &mut report,
                    CascadeFailure::Job {
                        job: job.job_name,
                        reason: err.to_string(),
                    },
                ),
            }
        }

        Ok(report)
    }

    /// Remove an application and everything scheduled under it.
    ///
    /// A no-op when the application is not registered. Configuration and
    /// scheduling state are removed first; stopping live executors is a
    /// best-effort cleanup performed last, and its failures never roll the
    /// removals back.
    pub async fn deregister_app(&self, name: &AppName) -> Result<CascadeReport, LifecycleError> {
        if self.app_configs.load(name).await?.is_none() {
            debug!("Deregister requested for unregistered application: {}", name);
            return Ok(CascadeReport::default());
        }

        let mut report = CascadeReport {
            applied: true,
            ..CascadeReport::default()
        };
        for job in self.jobs_of(name).await? {
            match self.scheduler.deregister(&job.job_name).await {
                Ok(()) => report.jobs_signaled += 1,
                Err(err) => record_failure(
                    &mut report,
                    CascadeFailure::Job {
                        job: job.job_name,
                        reason: err.to_string(),
                    },
                ),
            }
        }

        self.disabled_apps.remove(name).await?;
        self.app_configs.remove(name).await?;
        info!("Deregistered application: {}", name);

        self.stop_executors(name, &mut report).await;

        Ok(report)
    }

    /// Jobs owned by `name`, filtered client-side from the full snapshot.
    async fn jobs_of(&self, name: &AppName) -> Result<Vec<JobConfiguration>, LifecycleError> {
        let jobs = self.job_configs.load_all().await?;
        Ok(jobs
            .into_iter()
            .filter(|job| job.app_name == *name)
            .collect())
    }

    /// Best-effort stop signal to every live executor of `name`.
    async fn stop_executors(&self, name: &AppName, report: &mut CascadeReport) {
        let executors = match self.cluster.executors_for_app(name).await {
            Ok(executors) => executors,
            Err(err) => {
                record_failure(
                    report,
                    CascadeFailure::ExecutorQuery {
                        reason: err.to_string(),
                    },
                );
                return;
            }
        };

        for executor in executors {
            if let Err(err) = self
                .scheduler
                .send_message(&executor, STOP_EXECUTOR_PAYLOAD)
                .await
            {
                record_failure(
                    report,
                    CascadeFailure::ExecutorStop {
                        executor,
                        reason: err.to_string(),
                    },
                );
            }
        }
    }
}

impl<A, J, D, S, C> Clone for AppLifecycleCoordinator<A, J, D, S, C>
where
    A: AppConfigStore + ?Sized,
    J: JobConfigStore + ?Sized,
    D: DisabledAppRegistry + ?Sized,
    S: ProducerScheduler + ?Sized,
    C: ClusterExecutorQuery + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            app_configs: self.app_configs.clone(),
            job_configs: self.job_configs.clone(),
            disabled_apps: self.disabled_apps.clone(),
            scheduler: self.scheduler.clone(),
            cluster: self.cluster.clone(),
        }
    }
}

fn record_failure(report: &mut CascadeReport, failure: CascadeFailure) {
    warn!("Lifecycle cascade step failed: {}", failure);
    report.failures.push(failure);
}

/// Aggregate outcome of a lifecycle cascade.
///
/// Authoritative writes either landed or the operation returned an error
/// instead; `failures` lists the per-item best-effort steps that did not
/// complete.
#[derive(Debug, Default)]
pub struct CascadeReport {
    /// False when the target application was not registered and the call
    /// was a no-op.
    pub applied: bool,

    /// Jobs successfully signaled to the scheduler.
    pub jobs_signaled: usize,

    /// Best-effort steps that failed, in attempt order.
    pub failures: Vec<CascadeFailure>,
}

impl CascadeReport {
    /// True when the cascade ran and every step completed.
    pub fn is_clean(&self) -> bool {
        self.applied && self.failures.is_empty()
    }
}

/// A single failed step within a lifecycle cascade.
#[derive(thiserror::Error, Debug)]
pub enum CascadeFailure {
    #[error("Job '{job}' could not be signaled: {reason}")]
    Job { job: JobName, reason: String },

    #[error("Stop signal to {executor} failed: {reason}")]
    ExecutorStop { executor: ExecutorRef, reason: String },

    #[error("Cluster executor query failed: {reason}")]
    ExecutorQuery { reason: String },
}

/// Errors returned by [`AppLifecycleCoordinator`] operations.
///
/// The gateway maps `AlreadyExists` to an already-exists response,
/// `NotFound` to a not-found response, and every other kind to a generic
/// failure response carrying the diagnostic detail.
#[derive(thiserror::Error, Debug)]
pub enum LifecycleError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Application '{0}' already exists")]
    AlreadyExists(AppName),

    #[error("Application '{0}' not found")]
    NotFound(AppName),

    #[error("Malformed collaborator state: {0}")]
    MalformedState(String),

    #[error("Application configuration store error: {0}")]
    AppConfigStore(#[from] AppConfigStoreError),

    #[error("Job configuration store error: {0}")]
    JobConfigStore(#[from] JobConfigStoreError),

    #[error("Disabled-app registry error: {0}")]
    Registry(DisabledAppRegistryError),
}

impl From<DisabledAppRegistryError> for LifecycleError {
    fn from(err: DisabledAppRegistryError) -> Self {
        match err {
            DisabledAppRegistryError::Decode(detail) => LifecycleError::MalformedState(detail),
            other => LifecycleError::Registry(other),
        }
    }
}
