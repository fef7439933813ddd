//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, timeouts};
use crate::core::error::{Result, ToolAuditError};

/// A tool known to have changed since it was listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEntry {
    /// Exact tool name to match
    pub name: String,
    /// Short status label, e.g. "rebranded" or "check"
    pub status: String,
    /// What to look at when reviewing the tool
    pub note: String,
}

/// Rename applied by the redirect fixer once a tool's URL points at its new brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebrandRule {
    /// Current tool name
    pub name: String,
    /// Only apply when the (updated) source URL contains this text
    pub url_contains: String,
    /// Name written to the record
    pub new_name: String,
    /// Brand substituted for the old name inside the short description
    pub new_brand: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Health check timeout in seconds
    pub timeout: Option<u64>,

    /// Per-hop timeout in seconds when following redirects
    pub redirect_timeout: Option<u64>,

    /// Number of concurrent health checks
    pub concurrency: Option<usize>,

    /// Delay in milliseconds after each health check
    pub health_delay: Option<u64>,

    /// Delay in milliseconds between tools when following redirects
    pub redirect_delay: Option<u64>,

    /// Maximum hops recorded per redirect chain
    pub max_hops: Option<usize>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Location of toolData.js when not found in the standard places
    pub data_path: Option<String>,

    /// Tool URLs matching any of these patterns are not health checked (regex)
    pub exclude_patterns: Option<Vec<String>>,

    /// Personal categories below this many tools are reported as gaps
    pub min_personal_per_category: Option<usize>,

    /// Enterprise sectors below this many tools are reported as gaps
    pub min_enterprise_per_sector: Option<usize>,

    /// Tools known to have changed
    pub watchlist: Option<Vec<WatchEntry>>,

    /// Renames applied after URL fixes
    pub rebrands: Option<Vec<RebrandRule>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_HEALTH_TIMEOUT_SECONDS),
            redirect_timeout: Some(timeouts::DEFAULT_REDIRECT_TIMEOUT_SECONDS),
            concurrency: Some(defaults::CONCURRENCY),
            health_delay: Some(timeouts::DEFAULT_HEALTH_DELAY_MS),
            redirect_delay: Some(timeouts::DEFAULT_REDIRECT_DELAY_MS),
            max_hops: Some(defaults::MAX_HOPS),
            user_agent: None,
            verbose: Some(false),
            data_path: None,
            exclude_patterns: None,
            min_personal_per_category: Some(defaults::MIN_PERSONAL_PER_CATEGORY),
            min_enterprise_per_sector: Some(defaults::MIN_ENTERPRISE_PER_SECTOR),
            watchlist: None, // Falls back to default_watchlist()
            rebrands: None,  // Falls back to default_rebrands()
        }
    }
}

/// Tools the curators flagged as changed when the directory was last reviewed.
pub fn default_watchlist() -> Vec<WatchEntry> {
    [
        ("Jasper", "rebranded", "Check if still Jasper.ai or changed"),
        ("Copy.ai", "evolved", "Now has enterprise features"),
        ("Cognosys", "check", "May have pivoted or shut down"),
        ("Bing", "rebranded", "Now Microsoft Copilot Designer"),
        ("AutoGPT", "updated", "Now AutoGPT Forge"),
        ("DeepSeek", "check", "Verify current status and capabilities"),
    ]
    .into_iter()
    .map(|(name, status, note)| WatchEntry {
        name: name.to_string(),
        status: status.to_string(),
        note: note.to_string(),
    })
    .collect()
}

/// Rebrands known to follow from redirects seen in the directory.
pub fn default_rebrands() -> Vec<RebrandRule> {
    [
        ("Tome", "lightfield", "Lightfield (formerly Tome)", "Lightfield"),
        ("Codeium", "windsurf", "Windsurf (formerly Codeium)", "Windsurf"),
    ]
    .into_iter()
    .map(|(name, url_contains, new_name, new_brand)| RebrandRule {
        name: name.to_string(),
        url_contains: url_contains.to_string(),
        new_name: new_name.to_string(),
        new_brand: new_brand.to_string(),
    })
    .collect()
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ToolAuditError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ToolAuditError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Network
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Redirect following
        if let Some(max_hops) = cli_config.max_hops {
            self.max_hops = Some(max_hops);
        }
        if let Some(redirect_delay) = cli_config.redirect_delay {
            self.redirect_delay = Some(redirect_delay);
        }

        // Data
        if let Some(ref data_path) = cli_config.data_path {
            self.data_path = Some(data_path.clone());
        }

        // Output
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Compile exclude patterns into regex objects
    pub fn compile_exclude_patterns(&self) -> Result<Vec<Regex>> {
        let mut compiled = Vec::new();
        if let Some(ref patterns) = self.exclude_patterns {
            for pattern in patterns {
                compiled.push(Regex::new(pattern)?);
            }
        }
        Ok(compiled)
    }

    /// Get health check timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.timeout
                .unwrap_or(timeouts::DEFAULT_HEALTH_TIMEOUT_SECONDS),
        )
    }

    /// Get per-hop redirect timeout as Duration
    pub fn redirect_timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.redirect_timeout
                .unwrap_or(timeouts::DEFAULT_REDIRECT_TIMEOUT_SECONDS),
        )
    }

    /// Get the post-check health delay as Duration
    pub fn health_delay_duration(&self) -> Duration {
        Duration::from_millis(self.health_delay.unwrap_or(timeouts::DEFAULT_HEALTH_DELAY_MS))
    }

    /// Get the delay between redirect chains as Duration
    pub fn redirect_delay_duration(&self) -> Duration {
        Duration::from_millis(
            self.redirect_delay
                .unwrap_or(timeouts::DEFAULT_REDIRECT_DELAY_MS),
        )
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(defaults::CONCURRENCY)
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops.unwrap_or(defaults::MAX_HOPS)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(defaults::USER_AGENT)
    }

    pub fn min_personal_per_category(&self) -> usize {
        self.min_personal_per_category
            .unwrap_or(defaults::MIN_PERSONAL_PER_CATEGORY)
    }

    pub fn min_enterprise_per_sector(&self) -> usize {
        self.min_enterprise_per_sector
            .unwrap_or(defaults::MIN_ENTERPRISE_PER_SECTOR)
    }

    pub fn watchlist(&self) -> Vec<WatchEntry> {
        self.watchlist.clone().unwrap_or_else(default_watchlist)
    }

    pub fn rebrands(&self) -> Vec<RebrandRule> {
        self.rebrands.clone().unwrap_or_else(default_rebrands)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("Timeout", self.timeout),
            ("Redirect timeout", self.redirect_timeout),
        ] {
            if let Some(seconds) = value {
                if seconds == 0 {
                    return Err(ToolAuditError::Config(format!(
                        "{label} cannot be 0. Expected a positive integer representing seconds."
                    )));
                }
                if seconds > timeouts::MAX_TIMEOUT_SECONDS {
                    return Err(ToolAuditError::Config(format!(
                        "{label} of {seconds} seconds is extremely large (>1 hour). Consider using a smaller value."
                    )));
                }
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(ToolAuditError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > 100 {
                return Err(ToolAuditError::Config(format!(
                    "Concurrency of {concurrency} would hammer the listed sites. Consider using a smaller value."
                )));
            }
        }

        if let Some(max_hops) = self.max_hops
            && !(1..=50).contains(&max_hops)
        {
            return Err(ToolAuditError::Config(format!(
                "Max hops of {max_hops} is invalid. Expected a value between 1-50."
            )));
        }

        for (label, value) in [
            ("Personal category minimum", self.min_personal_per_category),
            ("Enterprise sector minimum", self.min_enterprise_per_sector),
        ] {
            if value == Some(0) {
                return Err(ToolAuditError::Config(format!(
                    "{label} cannot be 0. Expected a positive integer."
                )));
            }
        }

        if let Some(ref rebrands) = self.rebrands
            && let Some(rule) = rebrands.iter().find(|rule| rule.url_contains.is_empty())
        {
            return Err(ToolAuditError::Config(format!(
                "Rebrand rule for '{}' needs a non-empty url_contains.",
                rule.name
            )));
        }

        // Validate exclude patterns by trying to compile them
        self.compile_exclude_patterns()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Network
    pub timeout: Option<u64>,        // --timeout
    pub concurrency: Option<usize>,  // --concurrency
    pub user_agent: Option<String>,  // --user-agent

    // Redirect following
    pub max_hops: Option<usize>,      // redirects --max-hops
    pub redirect_delay: Option<u64>,  // redirects --delay

    // Data
    pub data_path: Option<String>, // --path

    // Output
    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
