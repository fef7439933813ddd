//! Directory audit
//!
//! Duplicate detection, optional URL health checks, watch-list matching and
//! category gap analysis, combined into an [`AuditReport`].

pub mod categories;
pub mod duplicates;
pub mod outdated;
pub mod report;

pub use categories::{CategoryGap, analyze_category_gaps};
pub use duplicates::{DuplicateEntry, DuplicateReason, find_duplicates};
pub use outdated::{OutdatedEntry, find_outdated};
pub use report::{AuditDetails, AuditReport, AuditSummary, recommendations};

use log::info;

use crate::config::{Config, WatchEntry};
use crate::core::types::Tool;
use crate::health::CheckHealth;
use crate::ui::progress::ProgressReporter;

pub struct Auditor {
    watchlist: Vec<WatchEntry>,
    min_personal_per_category: usize,
    min_enterprise_per_sector: usize,
}

impl Auditor {
    pub fn new(config: &Config) -> Self {
        Self {
            watchlist: config.watchlist(),
            min_personal_per_category: config.min_personal_per_category(),
            min_enterprise_per_sector: config.min_enterprise_per_sector(),
        }
    }

    /// Run every audit step over `tools`.
    ///
    /// Health checks only happen when a checker is given; otherwise the health
    /// buckets stay empty.
    pub async fn run<C>(
        &self,
        tools: &[Tool],
        checker: Option<&C>,
        progress: Option<&mut ProgressReporter>,
    ) -> AuditReport
    where
        C: CheckHealth + Sync,
    {
        let mut details = AuditDetails {
            duplicate: find_duplicates(tools),
            ..Default::default()
        };
        info!("Found {} duplicates", details.duplicate.len());

        match checker {
            Some(checker) => {
                for entry in checker.check_all(tools.to_vec(), progress).await {
                    details.push_health(entry);
                }
            }
            None => info!("Skipping URL health checks"),
        }

        details.outdated = find_outdated(tools, &self.watchlist);
        info!("Found {} potentially outdated tools", details.outdated.len());

        let category_analysis = analyze_category_gaps(
            tools,
            self.min_personal_per_category,
            self.min_enterprise_per_sector,
        );
        info!(
            "Found {} categories needing more tools",
            category_analysis.len()
        );

        let summary = AuditSummary {
            total: tools.len(),
            healthy: details.healthy.len(),
            redirected: details.redirected.len(),
            not_found: details.not_found.len(),
            errors: details.error.len(),
            duplicates: details.duplicate.len(),
            outdated: details.outdated.len(),
        };
        let recommendations = recommendations(&details, &category_analysis);

        AuditReport {
            timestamp: chrono::Local::now().to_rfc3339(),
            summary,
            category_analysis,
            details,
            recommendations,
        }
    }
}
