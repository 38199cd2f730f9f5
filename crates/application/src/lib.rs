//! Application Layer
//!
//! Use cases that move a registered application between enabled, disabled,
//! and deregistered states and propagate each transition to the
//! configuration stores, the producer scheduler, and live executors.

pub mod app_lifecycle;

// Re-exports
pub use app_lifecycle::{
    AppLifecycleCoordinator, CascadeFailure, CascadeReport, LifecycleError,
};
