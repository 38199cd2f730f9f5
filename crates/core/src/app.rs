//! Application configuration entities
//!
//! An application is a named group of jobs sharing lifecycle state. Its
//! configuration is keyed by name across every store that holds
//! application state.

use serde::{Deserialize, Serialize};

/// Unique name of a registered application.
///
/// The name is the primary key across the configuration stores and the
/// disabled-app registry; two configurations with the same name refer to
/// the same application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppName(String);

impl AppName {
    pub fn new(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AppName {
    fn from(s: String) -> Self {
        AppName::new(s)
    }
}

impl From<&str> for AppName {
    fn from(s: &str) -> Self {
        AppName::new(s.to_string())
    }
}

impl std::fmt::Display for AppName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration of an application registered on the platform.
///
/// The payload carries the packaging and resource settings consumed by the
/// scheduler and the executors; the lifecycle coordinator itself only keys
/// on `app_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfiguration {
    pub app_name: AppName,

    /// Where executors fetch the application package from.
    pub app_url: String,

    /// Entry script executed when an executor bootstraps the application.
    pub bootstrap_script: String,

    /// CPUs reserved for the application-level executor.
    #[serde(default = "default_cpu_count")]
    pub cpu_count: f64,

    /// Memory reserved for the application-level executor, in megabytes.
    #[serde(default = "default_memory_mb")]
    pub memory_mb: f64,

    /// Whether executors may reuse a cached copy of the package.
    #[serde(default = "default_app_cache_enable")]
    pub app_cache_enable: bool,

    /// How many execution events to sample into the trace store. Zero
    /// disables sampling.
    #[serde(default)]
    pub event_trace_sampling_count: u32,
}

impl AppConfiguration {
    /// Create a configuration with default resource settings.
    pub fn new(
        app_name: AppName,
        app_url: impl Into<String>,
        bootstrap_script: impl Into<String>,
    ) -> Self {
        Self {
            app_name,
            app_url: app_url.into(),
            bootstrap_script: bootstrap_script.into(),
            cpu_count: default_cpu_count(),
            memory_mb: default_memory_mb(),
            app_cache_enable: default_app_cache_enable(),
            event_trace_sampling_count: 0,
        }
    }
}

fn default_cpu_count() -> f64 {
    1.0
}

fn default_memory_mb() -> f64 {
    128.0
}

fn default_app_cache_enable() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_app_name_display() {
        let name = AppName::from("billing");
        assert_eq!(name.to_string(), "billing");
        assert_eq!(name.as_str(), "billing");
    }

    #[test]
    fn test_new_configuration_fills_defaults() {
        let config = AppConfiguration::new(
            AppName::from("billing"),
            "http://packages.internal/billing.tar.gz",
            "bin/start.sh",
        );

        assert_eq!(config.cpu_count, 1.0);
        assert_eq!(config.memory_mb, 128.0);
        assert!(config.app_cache_enable);
        assert_eq!(config.event_trace_sampling_count, 0);
    }

    #[test]
    fn test_deserialize_fills_missing_fields_with_defaults() {
        let json = r#"{
            "app_name": "billing",
            "app_url": "http://packages.internal/billing.tar.gz",
            "bootstrap_script": "bin/start.sh"
        }"#;

        let config: AppConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.app_name, AppName::from("billing"));
        assert_eq!(config.cpu_count, 1.0);
        assert_eq!(config.memory_mb, 128.0);
        assert!(config.app_cache_enable);
    }
}
