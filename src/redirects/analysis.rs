use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::time::{Duration, sleep};

use crate::audit::AuditReport;
use crate::catalog::{load_json, save_json};
use crate::config::Config;
use crate::core::error::Result;
use crate::redirects::classifier::{RedirectKind, classify};
use crate::redirects::follower::{RedirectChain, RedirectFollower};
use crate::ui::progress::ProgressReporter;

/// A tool the audit saw redirecting, as read back from the audit report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectedTool {
    pub name: String,
    pub id: String,
    pub original_url: String,
    /// Status the health check saw, if it recorded one
    pub status_code: Option<u16>,
}

impl RedirectedTool {
    /// Every entry under `details.redirected`, in report order.
    pub fn from_report(report: &AuditReport) -> Vec<Self> {
        report
            .details
            .redirected
            .iter()
            .map(|entry| Self {
                name: entry.tool.name().to_string(),
                id: entry.tool.id(),
                original_url: entry.tool.source_url().to_string(),
                status_code: entry.code,
            })
            .collect()
    }
}

/// Where one tool's URL ends up and how much it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectResult {
    pub tool: RedirectedTool,
    pub chain: RedirectChain,
    pub final_url: String,
    /// Only present when the chain has more than one hop
    pub classification: Option<RedirectKind>,
    pub analysis: Option<String>,
    pub chain_length: usize,
    pub needs_update: bool,
}

impl RedirectResult {
    /// Classify a followed chain. Returns `None` for an empty chain.
    pub fn from_chain(tool: RedirectedTool, chain: RedirectChain) -> Option<Self> {
        let final_url = chain.final_url()?.to_string();
        let classification = chain
            .was_redirected()
            .then(|| classify(&tool.original_url, &final_url));

        Some(Self {
            chain_length: chain.len(),
            analysis: classification.map(|kind| kind.to_string()),
            needs_update: classification.is_some_and(RedirectKind::needs_update),
            classification,
            final_url,
            chain,
            tool,
        })
    }

    pub fn original_url(&self) -> &str {
        &self.tool.original_url
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectSummary {
    pub total_redirects: usize,
    pub minor_changes: usize,
    pub path_changes: usize,
    pub subdomain_changes: usize,
    pub major_changes: usize,
    /// Chains that stopped at the first hop, so nothing was classified
    pub no_redirect: usize,
}

/// Contents of `redirect-analysis.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectAnalysis {
    #[serde(default)]
    pub summary: RedirectSummary,
    #[serde(default)]
    pub details: Vec<RedirectResult>,
    /// Tool name to the URL it should be listed under
    #[serde(default)]
    pub update_recommendations: BTreeMap<String, String>,
}

impl RedirectAnalysis {
    pub fn from_results(details: Vec<RedirectResult>) -> Self {
        let mut summary = RedirectSummary {
            total_redirects: details.len(),
            ..Default::default()
        };
        for result in &details {
            let counter = match result.classification {
                Some(RedirectKind::Minor) => &mut summary.minor_changes,
                Some(RedirectKind::PathChange) => &mut summary.path_changes,
                Some(RedirectKind::Subdomain) => &mut summary.subdomain_changes,
                Some(RedirectKind::Major) => &mut summary.major_changes,
                None => &mut summary.no_redirect,
            };
            *counter += 1;
        }

        let update_recommendations = details
            .iter()
            .filter(|result| result.needs_update)
            .map(|result| (result.tool.name.clone(), result.final_url.clone()))
            .collect();

        Self {
            summary,
            details,
            update_recommendations,
        }
    }

    /// Results with the given classification, in run order.
    pub fn with_kind(&self, kind: RedirectKind) -> impl Iterator<Item = &RedirectResult> {
        self.details
            .iter()
            .filter(move |result| result.classification == Some(kind))
    }

    pub fn needs_update_count(&self) -> usize {
        self.details.iter().filter(|result| result.needs_update).count()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(path, self)
    }
}

/// Follows redirected tools one at a time with a pause between them.
pub struct RedirectAnalyzer {
    follower: RedirectFollower,
    delay: Duration,
}

impl RedirectAnalyzer {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_follower(
            RedirectFollower::new(config)?,
            config.redirect_delay_duration(),
        ))
    }

    pub fn with_follower(follower: RedirectFollower, delay: Duration) -> Self {
        Self { follower, delay }
    }

    pub async fn analyze(&self, tool: RedirectedTool) -> Option<RedirectResult> {
        let chain = self.follower.follow(&tool.original_url).await;
        let result = RedirectResult::from_chain(tool, chain);
        if let Some(ref result) = result {
            info!(
                "{}: {} -> {} ({})",
                result.tool.name,
                result.original_url(),
                result.final_url,
                result.analysis.as_deref().unwrap_or("no redirect")
            );
        }
        result
    }

    /// Analyse every tool sequentially. Tools without a URL are skipped.
    pub async fn analyze_all(
        &self,
        tools: Vec<RedirectedTool>,
        mut progress: Option<&mut ProgressReporter>,
    ) -> RedirectAnalysis {
        let total = tools.len();
        if let Some(ref mut prog) = progress {
            prog.start_redirects(total);
        }

        let mut results = Vec::with_capacity(total);
        for (index, tool) in tools.into_iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }

            if let Some(ref prog) = progress {
                prog.update_redirect_progress(index, &tool.name);
            }

            let name = tool.name.clone();
            match self.analyze(tool).await {
                Some(result) => results.push(result),
                None => {
                    warn!("Skipping {name}: no URL to follow");
                    if let Some(ref prog) = progress {
                        prog.log_warning(&format!("Skipping {name}: no URL to follow"));
                    }
                }
            }
        }

        let analysis = RedirectAnalysis::from_results(results);
        if let Some(ref prog) = progress {
            prog.update_redirect_progress(total, "");
            prog.finish_redirects(analysis.needs_update_count(), total);
        }
        analysis
    }
}
