use serde::{Deserialize, Serialize};

use crate::config::WatchEntry;
use crate::core::types::Tool;

/// A listed tool that appears on the watch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutdatedEntry {
    pub tool: Tool,
    pub status: String,
    pub note: String,
}

/// Match tools against the watch list on their exact name, in list order.
pub fn find_outdated(tools: &[Tool], watchlist: &[WatchEntry]) -> Vec<OutdatedEntry> {
    tools
        .iter()
        .filter_map(|tool| {
            watchlist
                .iter()
                .find(|entry| entry.name == tool.name())
                .map(|entry| OutdatedEntry {
                    tool: tool.clone(),
                    status: entry.status.clone(),
                    note: entry.note.clone(),
                })
        })
        .collect()
}
