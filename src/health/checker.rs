use async_trait::async_trait;
use futures::{StreamExt, stream};
use log::{debug, info};
use regex::Regex;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};
use tokio::time::{Duration, sleep};

use crate::config::Config;
use crate::core::constants::{error_messages, http_status};
use crate::core::error::Result;
use crate::core::types::Tool;
use crate::http::{build_client, describe_error};
use crate::ui::progress::ProgressReporter;

/// Bucket a tool lands in after its health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthStatus {
    Healthy,
    Redirected,
    NotFound,
    Error,
}

/// Outcome of one HEAD request against a tool's listed URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntry {
    pub tool: Tool,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// `Location` header of a redirect, empty when the server sent none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthEntry {
    /// Map an HTTP status (and any `Location`) onto a health bucket.
    pub fn from_response(tool: Tool, code: u16, location: Option<String>) -> Self {
        let (status, location, message) = match code {
            http_status::OK => (HealthStatus::Healthy, None, None),
            300..=399 => (
                HealthStatus::Redirected,
                Some(location.unwrap_or_default()),
                None,
            ),
            http_status::NOT_FOUND => (HealthStatus::NotFound, None, None),
            http_status::TOO_MANY_REQUESTS => (
                HealthStatus::Error,
                None,
                Some(error_messages::RATE_LIMITED.to_string()),
            ),
            _ => (HealthStatus::Error, None, None),
        };

        Self {
            tool,
            status,
            code: Some(code),
            location,
            message,
        }
    }

    /// A check that never got a response.
    pub fn failure(tool: Tool, message: String) -> Self {
        Self {
            tool,
            status: HealthStatus::Error,
            code: None,
            location: None,
            message: Some(message),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    pub fn is_rate_limited(&self) -> bool {
        self.code == Some(http_status::TOO_MANY_REQUESTS)
    }
}

#[async_trait]
pub trait CheckHealth {
    async fn check_all(
        &self,
        tools: Vec<Tool>,
        progress: Option<&mut ProgressReporter>,
    ) -> Vec<HealthEntry>;
}

/// HEAD-checks tool URLs on a bounded pool of concurrent requests.
#[derive(Debug, Clone)]
pub struct HealthChecker {
    client: reqwest::Client,
    concurrency: usize,
    delay: Duration,
    exclude_patterns: Vec<Regex>,
}

impl HealthChecker {
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client(config, config.timeout_duration(), Policy::none())?;

        Ok(Self {
            client,
            concurrency: config.concurrency().max(1),
            delay: config.health_delay_duration(),
            exclude_patterns: config.compile_exclude_patterns()?,
        })
    }

    pub fn is_excluded(&self, tool: &Tool) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(tool.source_url()))
    }

    /// Single HEAD request, redirects not followed.
    pub async fn check(&self, tool: Tool) -> HealthEntry {
        let url = tool.source_url().trim().to_string();
        if url.is_empty() {
            return HealthEntry::failure(tool, error_messages::MISSING_SOURCE_URL.to_string());
        }

        match self.client.head(&url).send().await {
            Ok(response) => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                HealthEntry::from_response(tool, response.status().as_u16(), location)
            }
            Err(err) => HealthEntry::failure(tool, describe_error(&err)),
        }
    }
}

#[async_trait]
impl CheckHealth for HealthChecker {
    async fn check_all(
        &self,
        tools: Vec<Tool>,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Vec<HealthEntry> {
        let (excluded, tools): (Vec<Tool>, Vec<Tool>) =
            tools.into_iter().partition(|tool| self.is_excluded(tool));
        if !excluded.is_empty() {
            info!("Skipping {} excluded tool URL(s)", excluded.len());
        }

        let total = tools.len();
        if let Some(ref mut prog) = progress {
            prog.start_health_checks(total);
        }

        let delay = self.delay;
        let mut checks = stream::iter(tools)
            .map(|tool| async move {
                let entry = self.check(tool).await;
                // Keep each worker slot busy a little longer to stay under rate limits
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                entry
            })
            .buffer_unordered(self.concurrency);

        let mut results = Vec::with_capacity(total);
        while let Some(entry) = checks.next().await {
            debug!(
                "[{}/{}] {} -> {:?} {:?}",
                results.len() + 1,
                total,
                entry.tool.name(),
                entry.status,
                entry.code
            );
            results.push(entry);

            if let Some(ref prog) = progress {
                prog.update_health_progress(results.len());
            }
        }

        if let Some(ref prog) = progress {
            let healthy = results.iter().filter(|entry| entry.is_healthy()).count();
            prog.finish_health_checks(healthy, results.len());
        }

        results
    }
}
