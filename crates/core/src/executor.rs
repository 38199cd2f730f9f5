//! References to live executors on the cluster

use serde::{Deserialize, Serialize};

/// Identifies a live executor process serving an application's jobs.
///
/// Supplied on demand by the cluster state query; never persisted by the
/// coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutorRef {
    pub executor_id: String,
    pub slave_id: String,
}

impl ExecutorRef {
    pub fn new(executor_id: impl Into<String>, slave_id: impl Into<String>) -> Self {
        Self {
            executor_id: executor_id.into(),
            slave_id: slave_id.into(),
        }
    }
}

impl std::fmt::Display for ExecutorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "executor '{}' on slave '{}'", self.executor_id, self.slave_id)
    }
}

/// Payload of the framework message that asks an executor to shut down.
pub const STOP_EXECUTOR_PAYLOAD: &[u8] = b"STOP";
