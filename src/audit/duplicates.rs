use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Tool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateReason {
    DuplicateName,
    DuplicateUrl,
}

impl DuplicateReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DuplicateReason::DuplicateName => "duplicate_name",
            DuplicateReason::DuplicateUrl => "duplicate_url",
        }
    }
}

/// A later tool colliding with one seen earlier in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    /// First tool seen with this key
    pub tool1: Tool,
    /// The colliding tool
    pub tool2: Tool,
    pub reason: DuplicateReason,
}

fn name_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

fn url_key(url: &str) -> String {
    url.to_lowercase().trim_end_matches('/').to_string()
}

fn record<'a>(
    seen: &mut FxHashMap<String, &'a Tool>,
    key: String,
    tool: &'a Tool,
    reason: DuplicateReason,
    duplicates: &mut Vec<DuplicateEntry>,
) {
    match seen.get(&key) {
        Some(first) => duplicates.push(DuplicateEntry {
            tool1: (*first).clone(),
            tool2: tool.clone(),
            reason,
        }),
        None => {
            seen.insert(key, tool);
        }
    }
}

/// Scan tools in order for repeated names and URLs.
///
/// A tool may produce both a name and a URL entry. The first occurrence of a
/// key stays the reference for every later collision.
pub fn find_duplicates(tools: &[Tool]) -> Vec<DuplicateEntry> {
    let mut names: FxHashMap<String, &Tool> = FxHashMap::default();
    let mut urls: FxHashMap<String, &Tool> = FxHashMap::default();
    let mut duplicates = Vec::new();

    for tool in tools {
        record(
            &mut names,
            name_key(tool.name()),
            tool,
            DuplicateReason::DuplicateName,
            &mut duplicates,
        );
        // Missing URLs are a health problem, not a duplicate
        let url = url_key(tool.source_url());
        if !url.is_empty() {
            record(
                &mut urls,
                url,
                tool,
                DuplicateReason::DuplicateUrl,
                &mut duplicates,
            );
        }
    }

    duplicates
}
