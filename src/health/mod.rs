//! URL health checks
//!
//! HEAD requests against every tool's listed URL, run on a bounded
//! pool of concurrent requests.

pub mod checker;

// Re-export commonly used items
pub use checker::{CheckHealth, HealthChecker, HealthEntry, HealthStatus};
