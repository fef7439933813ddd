use log::debug;
use reqwest::redirect::Policy;
use std::fmt;

use crate::config::Config;
use crate::core::constants::{defaults, display, http_status};
use crate::core::error::Result;
use crate::http::{build_client, describe_error};
use crate::repair::fixer::UrlUpdate;

/// Outcome of re-checking one updated URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Final status after following redirects
    Status(u16),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    pub name: String,
    pub url: String,
    pub outcome: VerifyOutcome,
}

impl VerifyResult {
    pub fn is_ok(&self) -> bool {
        self.outcome == VerifyOutcome::Status(http_status::OK)
    }
}

impl fmt::Display for VerifyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            VerifyOutcome::Status(http_status::OK) => {
                write!(f, "{} {}: {}", display::HEALTHY_EMOJI, self.name, self.url)
            }
            VerifyOutcome::Status(code) => write!(
                f,
                "{}  {code} {}: {}",
                display::WARNING_EMOJI,
                self.name,
                self.url
            ),
            VerifyOutcome::Failed(message) => write!(
                f,
                "{} {}: Error - {message}",
                display::ERROR_EMOJI,
                self.name
            ),
        }
    }
}

/// HEAD-checks updated URLs, following redirects this time.
pub struct UrlVerifier {
    client: reqwest::Client,
}

impl UrlVerifier {
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client(
            config,
            config.timeout_duration(),
            Policy::limited(defaults::VERIFY_MAX_REDIRECTS),
        )?;
        Ok(Self { client })
    }

    pub async fn verify(&self, update: &UrlUpdate) -> VerifyResult {
        let outcome = match self.client.head(&update.new_url).send().await {
            Ok(response) => VerifyOutcome::Status(response.status().as_u16()),
            Err(err) => VerifyOutcome::Failed(describe_error(&err)),
        };
        debug!("{} -> {:?}", update.new_url, outcome);

        VerifyResult {
            name: update.name.clone(),
            url: update.new_url.clone(),
            outcome,
        }
    }

    /// Check every update in order.
    pub async fn verify_all(&self, updates: &[UrlUpdate]) -> Vec<VerifyResult> {
        let mut results = Vec::with_capacity(updates.len());
        for update in updates {
            results.push(self.verify(update).await);
        }
        results
    }
}
