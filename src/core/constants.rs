/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Defaults for every tunable live here; `Config` falls back to them.
/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - healthy tool URL
    pub const OK: u16 = 200;
    /// HTTP 404 Not Found - tool page is gone
    pub const NOT_FOUND: u16 = 404;
    /// HTTP 429 Too Many Requests - the target is rate limiting us
    pub const TOO_MANY_REQUESTS: u16 = 429;
    /// Redirect codes the follower chases
    pub const REDIRECTS: [u16; 5] = [301, 302, 303, 307, 308];
}

/// Timeout and duration constants
pub mod timeouts {
    /// Health check HEAD timeout in seconds
    pub const DEFAULT_HEALTH_TIMEOUT_SECONDS: u64 = 5;
    /// Per-hop GET timeout for the redirect follower in seconds
    pub const DEFAULT_REDIRECT_TIMEOUT_SECONDS: u64 = 10;
    /// Maximum reasonable timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Pause after each health check completes, per worker
    pub const DEFAULT_HEALTH_DELAY_MS: u64 = 100;
    /// Pause between tools while following redirect chains
    pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 500;
}

/// Default configuration values
pub mod defaults {
    /// Concurrent health checks
    pub const CONCURRENCY: usize = 10;
    /// Maximum hops recorded per redirect chain
    pub const MAX_HOPS: usize = 5;
    /// Redirects followed by `verify` before giving up
    pub const VERIFY_MAX_REDIRECTS: usize = 10;
    /// User-Agent sent with every request
    pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; ToolCurator/1.0)";
    /// Personal categories with fewer tools than this are flagged
    pub const MIN_PERSONAL_PER_CATEGORY: usize = 5;
    /// Enterprise sectors with fewer tools than this are flagged
    pub const MIN_ENTERPRISE_PER_SECTOR: usize = 3;
    /// Sector reported for enterprise tools that have none
    pub const UNKNOWN_SECTOR: &str = "Unknown";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".toolaudit.toml";
}

/// Default file locations
pub mod files {
    /// Audit report written by `audit`, read by `redirects`
    pub const AUDIT_REPORT: &str = "audit-report.json";
    /// Redirect analysis written by `redirects`, read by `fix-redirects`
    pub const REDIRECT_ANALYSIS: &str = "redirect-analysis.json";
    /// Fix report written by `fix-redirects`, read by `verify`
    pub const REDIRECT_FIX_REPORT: &str = "redirect-fix-report.json";
    /// Where the tool data file is searched for when no path is given
    pub const TOOL_DATA_CANDIDATES: [&str; 3] = [
        "frontend/src/app/utils/toolData.js",
        "src/app/utils/toolData.js",
        "toolData.js",
    ];
    /// Marker inserted between the data file name and the backup timestamp
    pub const BACKUP_MARKER: &str = "backup";
    /// chrono format for backup timestamps
    pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
}

/// Error message constants
pub mod error_messages {
    /// Health check or hop that hit the client timeout
    pub const TIMEOUT: &str = "Timeout";
    /// Health check answered with 429
    pub const RATE_LIMITED: &str = "rate limited (HTTP 429)";
    /// Tool record without a URL
    pub const MISSING_SOURCE_URL: &str = "missing source_url";
    /// Unknown error fallback
    pub const UNKNOWN_ERROR: &str = "Unknown error";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for healthy tools
    pub const HEALTHY_EMOJI: &str = "✅";
    /// Emoji for redirects
    pub const REDIRECT_EMOJI: &str = "🔄";
    /// Emoji for 404s and hard failures
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for warnings
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for major changes
    pub const MAJOR_EMOJI: &str = "🚨";
    /// Width of section separators
    pub const RULE_WIDTH: usize = 80;
}
