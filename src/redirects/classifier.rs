use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// How much a tool's URL changed between the listed address and where it ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectKind {
    /// Same host and path; only scheme, case or a trailing slash differ
    Minor,
    /// Same host, different path
    PathChange,
    /// Host moved to a parent or child domain (or gained/lost `www.`)
    Subdomain,
    /// Unrelated host, possibly a rebrand or acquisition
    Major,
}

impl RedirectKind {
    /// Whether the listed URL should be replaced by the final one.
    pub fn needs_update(self) -> bool {
        matches!(self, RedirectKind::Major | RedirectKind::PathChange)
    }

    /// Short label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            RedirectKind::Minor => "minor",
            RedirectKind::PathChange => "path change",
            RedirectKind::Subdomain => "subdomain",
            RedirectKind::Major => "major",
        }
    }
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RedirectKind::Minor => "MINOR: Trailing slash or protocol change",
            RedirectKind::PathChange => "PATH CHANGE: Same domain, different path",
            RedirectKind::Subdomain => "SUBDOMAIN: Related domain change",
            RedirectKind::Major => "MAJOR: Complete domain change (possible rebrand/acquisition)",
        };
        f.write_str(text)
    }
}

/// Host (with any non-default port) and path without trailing slashes, lowercased.
#[derive(Debug, PartialEq, Eq)]
struct UrlParts {
    host: String,
    path: String,
}

impl UrlParts {
    fn parse(raw: &str) -> Option<Self> {
        let url = Url::parse(&raw.trim().to_lowercase()).ok()?;
        let host = url.host_str()?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Some(Self {
            host,
            path: url.path().trim_end_matches('/').to_string(),
        })
    }
}

/// Drop a leading `www.` unless that would leave a bare TLD.
fn strip_www(host: &str) -> &str {
    match host.strip_prefix("www.") {
        Some(rest) if rest.contains('.') => rest,
        _ => host,
    }
}

/// True when the hosts are equal or one is a subdomain of the other, ignoring `www.`.
///
/// The comparison works on whole labels, so `notexample.com` is not related to
/// `example.com`.
pub fn hosts_related(a: &str, b: &str) -> bool {
    let (a, b) = (strip_www(a), strip_www(b));
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let is_child = |child: &str, parent: &str| {
        child
            .strip_suffix(parent)
            .is_some_and(|rest| rest.ends_with('.'))
    };

    a == b || is_child(a, b) || is_child(b, a)
}

/// Bucket the change from `original` to `final_url`.
///
/// Unparseable URLs are treated as a major change.
///
/// # Examples
/// ```
/// use toolaudit::redirects::{RedirectKind, classify};
///
/// assert_eq!(classify("http://example.com", "https://example.com/"), RedirectKind::Minor);
/// assert_eq!(classify("http://old.com", "https://new.com"), RedirectKind::Major);
/// ```
pub fn classify(original: &str, final_url: &str) -> RedirectKind {
    let (Some(from), Some(to)) = (UrlParts::parse(original), UrlParts::parse(final_url)) else {
        return RedirectKind::Major;
    };

    if from.host == to.host {
        if from.path == to.path {
            RedirectKind::Minor
        } else {
            RedirectKind::PathChange
        }
    } else if hosts_related(&from.host, &to.host) {
        RedirectKind::Subdomain
    } else {
        RedirectKind::Major
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_classify__protocol_and_trailing_slash_is_minor() {
        assert_eq!(
            classify("http://example.com", "https://example.com/"),
            RedirectKind::Minor
        );
        assert_eq!(
            classify("https://Example.com/Pricing/", "https://example.com/pricing"),
            RedirectKind::Minor
        );
    }

    #[test]
    fn test_classify__default_port_is_minor() {
        assert_eq!(
            classify("http://example.com:80/app", "http://example.com/app/"),
            RedirectKind::Minor
        );
    }

    #[test]
    fn test_classify__query_is_ignored() {
        assert_eq!(
            classify("https://pitch.com", "https://pitch.com/?ref=directory"),
            RedirectKind::Minor
        );
    }

    #[test]
    fn test_classify__same_host_new_path() {
        assert_eq!(
            classify("https://slack.com/ai", "https://slack.com/features/ai"),
            RedirectKind::PathChange
        );
    }

    #[test]
    fn test_classify__www_change_is_subdomain() {
        assert_eq!(
            classify("https://sembly.ai", "https://www.sembly.ai/"),
            RedirectKind::Subdomain
        );
    }

    #[test]
    fn test_classify__child_domain_is_subdomain() {
        assert_eq!(
            classify("https://deepset.ai", "https://haystack.deepset.ai"),
            RedirectKind::Subdomain
        );
        assert_eq!(
            classify("https://app.tool.io/login", "https://tool.io"),
            RedirectKind::Subdomain
        );
    }

    #[test]
    fn test_classify__different_host_is_major() {
        assert_eq!(
            classify("http://old.com", "https://new.com"),
            RedirectKind::Major
        );
        assert_eq!(
            classify("https://codeium.com", "https://windsurf.com/editor"),
            RedirectKind::Major
        );
    }

    #[test]
    fn test_classify__substring_host_is_not_subdomain() {
        assert_eq!(
            classify("https://example.com", "https://notexample.com"),
            RedirectKind::Major
        );
    }

    #[test]
    fn test_classify__sibling_subdomains_are_major() {
        assert_eq!(
            classify("https://docs.tool.io", "https://app.tool.io"),
            RedirectKind::Major
        );
    }

    #[test]
    fn test_classify__unparseable_is_major() {
        assert_eq!(classify("not a url", "https://tool.io"), RedirectKind::Major);
        assert_eq!(classify("https://tool.io", ""), RedirectKind::Major);
    }

    #[test]
    fn test_classify__www_second_level_domain_is_not_stripped() {
        assert_eq!(
            classify("https://www.com", "https://example.com"),
            RedirectKind::Major
        );
        assert!(!hosts_related("www.com", "example.com"));
        assert!(hosts_related("www.com", "app.www.com"));
        assert_eq!(strip_www("www.com"), "www.com");
        assert_eq!(strip_www("www.tool.io"), "tool.io");
    }

    #[test]
    fn test_hosts_related() {
        assert!(hosts_related("www.tool.io", "tool.io"));
        assert!(hosts_related("eu.app.tool.io", "tool.io"));
        assert!(!hosts_related("mytool.io", "tool.io"));
        assert!(!hosts_related("", "tool.io"));
    }

    #[test]
    fn test_needs_update() {
        assert!(RedirectKind::Major.needs_update());
        assert!(RedirectKind::PathChange.needs_update());
        assert!(!RedirectKind::Subdomain.needs_update());
        assert!(!RedirectKind::Minor.needs_update());
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(
            RedirectKind::PathChange.to_string(),
            "PATH CHANGE: Same domain, different path"
        );
        assert_eq!(
            serde_json::to_string(&RedirectKind::PathChange).unwrap(),
            "\"path_change\""
        );
    }
}
