//! Producer Scheduler Port
//!
//! The scheduling subsystem that owns per-job timers and queues, plus the
//! channel for pushing framework messages to live executors.

use async_trait::async_trait;
use stratus_core::{ExecutorRef, JobName};

/// Producer scheduler port
#[async_trait]
pub trait ProducerScheduler: Send + Sync {
    /// Stop producing new runs of `job` until it is rescheduled.
    async fn unschedule(&self, job: &JobName) -> Result<(), ProducerSchedulerError>;

    /// Resume producing runs of `job`.
    async fn reschedule(&self, job: &JobName) -> Result<(), ProducerSchedulerError>;

    /// Remove `job` from the scheduler entirely; stronger than unschedule.
    async fn deregister(&self, job: &JobName) -> Result<(), ProducerSchedulerError>;

    /// Push an asynchronous framework message to one executor.
    async fn send_message(
        &self,
        executor: &ExecutorRef,
        payload: &[u8],
    ) -> Result<(), ProducerSchedulerError>;
}

/// Producer scheduler error
#[derive(thiserror::Error, Debug)]
pub enum ProducerSchedulerError {
    #[error("Scheduler backend error: {0}")]
    Backend(String),

    #[error("Scheduler rejected the request: {0}")]
    Rejected(String),
}
