use log::debug;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::core::constants::http_status;
use crate::core::error::Result;
use crate::http::{build_client, describe_error};

/// One request in a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// URL requested at this hop
    pub url: String,
    /// Response status, `None` when the request failed
    pub status: Option<u16>,
    /// Why the request failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Hop {
    pub fn response(url: String, status: u16) -> Self {
        Self {
            url,
            status: Some(status),
            error: None,
        }
    }

    pub fn failure(url: String, error: String) -> Self {
        Self {
            url,
            status: None,
            error: Some(error),
        }
    }

    pub fn is_redirect(&self) -> bool {
        self.status
            .is_some_and(|status| http_status::REDIRECTS.contains(&status))
    }
}

/// Ordered hops from the listed URL to wherever the chain stopped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectChain {
    hops: Vec<Hop>,
}

impl RedirectChain {
    pub fn new(hops: Vec<Hop>) -> Self {
        Self { hops }
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// URL of the last recorded hop.
    pub fn final_url(&self) -> Option<&str> {
        self.hops.last().map(|hop| hop.url.as_str())
    }

    /// More than one hop means the listed URL moved somewhere.
    pub fn was_redirected(&self) -> bool {
        self.hops.len() > 1
    }
}

/// Resolve a `Location` header against the URL that produced it.
fn next_location(current: &str, headers: &HeaderMap) -> Option<String> {
    let location = headers.get(LOCATION)?.to_str().ok()?.trim();
    if location.is_empty() {
        return None;
    }

    let base = Url::parse(current).ok()?;
    base.join(location).ok().map(String::from)
}

/// Follows redirects one hop at a time so every intermediate status is recorded.
#[derive(Debug, Clone)]
pub struct RedirectFollower {
    client: reqwest::Client,
    max_hops: usize,
}

impl RedirectFollower {
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client(config, config.redirect_timeout_duration(), Policy::none())?;
        Ok(Self::with_client(client, config.max_hops()))
    }

    /// Use an existing client. It must not follow redirects by itself.
    pub fn with_client(client: reqwest::Client, max_hops: usize) -> Self {
        Self {
            client,
            max_hops: max_hops.max(1),
        }
    }

    /// Walk the chain starting at `url`.
    ///
    /// Stops at the first non-redirect status, a redirect without a usable
    /// `Location`, a failed request, or after `max_hops` requests. An empty URL
    /// produces an empty chain.
    pub async fn follow(&self, url: &str) -> RedirectChain {
        let mut hops = Vec::new();
        let mut current = url.trim().to_string();
        if current.is_empty() {
            return RedirectChain::new(hops);
        }

        while hops.len() < self.max_hops {
            match self.client.get(&current).send().await {
                Ok(response) => {
                    let hop = Hop::response(current.clone(), response.status().as_u16());
                    let is_redirect = hop.is_redirect();
                    hops.push(hop);
                    if !is_redirect {
                        break;
                    }

                    match next_location(&current, response.headers()) {
                        Some(next) => {
                            debug!("{current} -> {next}");
                            current = next;
                        }
                        None => {
                            debug!("{current} redirected without a usable Location header");
                            break;
                        }
                    }
                }
                Err(err) => {
                    hops.push(Hop::failure(current.clone(), describe_error(&err)));
                    break;
                }
            }
        }

        RedirectChain::new(hops)
    }
}
