//! Job configuration entities
//!
//! A job is a schedulable unit of work belonging to exactly one
//! application. Job lifecycle is owned by the job-configuration
//! collaborator; the coordinator only reads these records and signals the
//! scheduler.

use serde::{Deserialize, Serialize};

use crate::app::AppName;

/// Unique name of a job configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(String);

impl JobName {
    pub fn new(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobName {
    fn from(s: String) -> Self {
        JobName::new(s)
    }
}

impl From<&str> for JobName {
    fn from(s: &str) -> Self {
        JobName::new(s.to_string())
    }
}

impl std::fmt::Display for JobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the scheduler runs a job once it has been produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobExecutionType {
    /// Long-running job kept resident on its executor.
    Daemon,
    /// Short-lived job launched per triggering.
    Transient,
}

impl std::fmt::Display for JobExecutionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobExecutionType::Daemon => write!(f, "DAEMON"),
            JobExecutionType::Transient => write!(f, "TRANSIENT"),
        }
    }
}

/// Configuration of a single schedulable job.
///
/// `app_name` is an advisory foreign key: referential integrity is not
/// enforced by the stores, so readers filter defensively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfiguration {
    pub job_name: JobName,
    pub app_name: AppName,

    /// Cron expression driving production of new runs.
    pub cron: String,

    #[serde(default = "default_cpu_count")]
    pub cpu_count: f64,

    #[serde(default = "default_memory_mb")]
    pub memory_mb: f64,

    #[serde(default = "default_execution_type")]
    pub execution_type: JobExecutionType,
}

impl JobConfiguration {
    /// Create a job configuration with default resource settings.
    pub fn new(job_name: JobName, app_name: AppName, cron: impl Into<String>) -> Self {
        Self {
            job_name,
            app_name,
            cron: cron.into(),
            cpu_count: default_cpu_count(),
            memory_mb: default_memory_mb(),
            execution_type: default_execution_type(),
        }
    }
}

fn default_cpu_count() -> f64 {
    1.0
}

fn default_memory_mb() -> f64 {
    128.0
}

fn default_execution_type() -> JobExecutionType {
    JobExecutionType::Transient
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_name_display() {
        let name = JobName::from("billing.invoice");
        assert_eq!(format!("{}", name), "billing.invoice");
    }

    #[test]
    fn test_new_job_fills_defaults() {
        let job = JobConfiguration::new(
            JobName::from("billing.invoice"),
            AppName::from("billing"),
            "0 0 * * *",
        );

        assert_eq!(job.cpu_count, 1.0);
        assert_eq!(job.memory_mb, 128.0);
        assert_eq!(job.execution_type, JobExecutionType::Transient);
    }

    #[test]
    fn test_execution_type_serializes_uppercase() {
        let json = serde_json::to_string(&JobExecutionType::Daemon).unwrap();
        assert_eq!(json, r#""DAEMON""#);
    }
}
