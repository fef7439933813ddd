//! Maintenance tooling for a curated directory of AI tools.
//!
//! The directory lives in a JavaScript data file holding a JSON array. This
//! crate audits it (duplicates, stale entries, category gaps, URL health),
//! follows and classifies the redirects the audit finds, rewrites moved URLs
//! back into the data file and re-checks them.

pub mod audit;
pub mod catalog;
pub mod config;
pub mod core;
pub mod health;
pub mod http;
pub mod logging;
pub mod redirects;
pub mod repair;
pub mod ui;

pub use audit::{AuditReport, Auditor};
pub use catalog::{ToolDataFile, locate_tool_data};
pub use config::{CliConfig, Config};
pub use crate::core::{Result, Tool, ToolAuditError, ToolType};
pub use health::{CheckHealth, HealthChecker, HealthEntry, HealthStatus};
pub use redirects::{RedirectAnalysis, RedirectAnalyzer, RedirectFollower, RedirectKind, classify};
pub use repair::{FixOptions, FixReport, RedirectFixer, UrlVerifier};
