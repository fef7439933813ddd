use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::audit::categories::CategoryGap;
use crate::audit::duplicates::DuplicateEntry;
use crate::audit::outdated::OutdatedEntry;
use crate::catalog::{load_json, save_json};
use crate::core::error::Result;
use crate::health::{HealthEntry, HealthStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSummary {
    pub total: usize,
    pub healthy: usize,
    pub redirected: usize,
    pub not_found: usize,
    pub errors: usize,
    pub duplicates: usize,
    pub outdated: usize,
}

impl AuditSummary {
    /// Label/value pairs in report order, for console output.
    pub fn rows(&self) -> [(&'static str, usize); 7] {
        [
            ("Total", self.total),
            ("Healthy", self.healthy),
            ("Redirected", self.redirected),
            ("Not Found", self.not_found),
            ("Errors", self.errors),
            ("Duplicates", self.duplicates),
            ("Outdated", self.outdated),
        ]
    }
}

/// Per-bucket findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditDetails {
    pub healthy: Vec<HealthEntry>,
    pub redirected: Vec<HealthEntry>,
    #[serde(rename = "notFound")]
    pub not_found: Vec<HealthEntry>,
    pub error: Vec<HealthEntry>,
    pub outdated: Vec<OutdatedEntry>,
    pub duplicate: Vec<DuplicateEntry>,
}

impl AuditDetails {
    /// File a health check result under its status.
    pub fn push_health(&mut self, entry: HealthEntry) {
        let bucket = match entry.status {
            HealthStatus::Healthy => &mut self.healthy,
            HealthStatus::Redirected => &mut self.redirected,
            HealthStatus::NotFound => &mut self.not_found,
            HealthStatus::Error => &mut self.error,
        };
        bucket.push(entry);
    }

    pub fn rate_limited(&self) -> usize {
        self.error.iter().filter(|entry| entry.is_rate_limited()).count()
    }
}

/// Contents of `audit-report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// RFC 3339 local time the report was generated
    pub timestamp: String,
    #[serde(default)]
    pub summary: AuditSummary,
    #[serde(default)]
    pub category_analysis: BTreeMap<String, CategoryGap>,
    #[serde(default)]
    pub details: AuditDetails,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AuditReport {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(path, self)
    }
}

/// Actionable follow-ups, in a fixed order.
pub fn recommendations(
    details: &AuditDetails,
    category_analysis: &BTreeMap<String, CategoryGap>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !details.duplicate.is_empty() {
        recommendations.push(format!("Remove {} duplicate tools", details.duplicate.len()));
    }
    if !details.not_found.is_empty() {
        recommendations.push(format!(
            "Fix or remove {} tools with 404 errors",
            details.not_found.len()
        ));
    }
    if !details.redirected.is_empty() {
        recommendations.push(format!(
            "Update URLs for {} redirected tools",
            details.redirected.len()
        ));
    }
    if !details.outdated.is_empty() {
        recommendations.push(format!(
            "Review and update {} potentially outdated tools",
            details.outdated.len()
        ));
    }
    if !category_analysis.is_empty() {
        recommendations.push(format!(
            "Add more tools to {} underrepresented categories",
            category_analysis.len()
        ));
    }

    let rate_limited = details.rate_limited();
    if rate_limited > 0 {
        recommendations.push(format!(
            "{rate_limited} tools were rate limited (HTTP 429); re-run later or lower --concurrency"
        ));
    }

    recommendations
}
