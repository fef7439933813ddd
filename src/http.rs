//! Shared HTTP client construction and error descriptions

use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::error_messages;
use crate::core::error::Result;

/// Build a client with the configured User-Agent and the given timeout and redirect policy.
pub fn build_client(config: &Config, timeout: Duration, redirect_policy: Policy) -> Result<reqwest::Client> {
    let concurrency = config.concurrency();

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .redirect(redirect_policy)
        .user_agent(config.user_agent())
        .pool_max_idle_per_host(concurrency.min(20)) // Limit idle connections per host
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .build()?;

    Ok(client)
}

/// Human readable reason for a failed request.
///
/// Timeouts collapse to a fixed message; otherwise the innermost cause is used,
/// which is more useful than reqwest's "error sending request" wrapper.
pub fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return error_messages::TIMEOUT.to_string();
    }

    let mut source = std::error::Error::source(err);
    let mut description = None;
    while let Some(cause) = source {
        description = Some(cause.to_string());
        source = cause.source();
    }

    description.unwrap_or_else(|| {
        let text = err.to_string();
        if text.is_empty() {
            error_messages::UNKNOWN_ERROR.to_string()
        } else {
            text
        }
    })
}
