use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::{Tool, ToolType};

/// A category (personal) or sector (enterprise) below its minimum size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGap {
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub count: usize,
    pub needs_more: usize,
}

/// Count personal tools per `category` and enterprise tools per `sector`,
/// keeping the groups that fall short of their minimum.
///
/// Personal tools without a category are not counted. When a personal
/// category and an enterprise sector share a name, the enterprise gap wins.
pub fn analyze_category_gaps(
    tools: &[Tool],
    min_personal: usize,
    min_enterprise: usize,
) -> BTreeMap<String, CategoryGap> {
    let mut personal: BTreeMap<&str, usize> = BTreeMap::new();
    let mut enterprise: BTreeMap<&str, usize> = BTreeMap::new();

    for tool in tools {
        match tool.tool_type() {
            ToolType::Personal => {
                if let Some(category) = tool.category() {
                    *personal.entry(category).or_default() += 1;
                }
            }
            ToolType::Enterprise => *enterprise.entry(tool.sector()).or_default() += 1,
        }
    }

    let mut gaps = BTreeMap::new();
    let groups = [
        (ToolType::Personal, personal, min_personal),
        (ToolType::Enterprise, enterprise, min_enterprise),
    ];
    for (tool_type, counts, minimum) in groups {
        for (name, count) in counts {
            if count < minimum {
                gaps.insert(
                    name.to_string(),
                    CategoryGap {
                        tool_type,
                        count,
                        needs_more: minimum - count,
                    },
                );
            }
        }
    }

    gaps
}
