use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::{ToolDataFile, load_json, save_json};
use crate::config::RebrandRule;
use crate::core::error::Result;
use crate::core::types::Tool;

const REDIRECTED_MARKER: &str = "?redirected=";

/// One rewritten `source_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlUpdate {
    pub name: String,
    pub old_url: String,
    pub new_url: String,
}

/// Contents of `redirect-fix-report.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixReport {
    pub timestamp: String,
    pub total_updates: usize,
    #[serde(default)]
    pub url_updates: Vec<UrlUpdate>,
    /// "Old → New" labels
    #[serde(default)]
    pub rebrands: Vec<String>,
}

impl FixReport {
    pub fn new(url_updates: Vec<UrlUpdate>, rebrands: Vec<String>) -> Self {
        Self {
            timestamp: chrono::Local::now().to_rfc3339(),
            total_updates: url_updates.len(),
            url_updates,
            rebrands,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(path, self)
    }
}

/// Drop everything from a `?redirected=` marker on, then trailing slashes.
pub fn clean_recommended_url(url: &str) -> String {
    let url = match url.find(REDIRECTED_MARKER) {
        Some(index) => &url[..index],
        None => url,
    };
    url.trim_end_matches('/').to_string()
}

/// Point every recommended tool at its new URL.
///
/// Matching is on the exact tool name; every tool sharing a recommended name is
/// updated.
pub fn apply_url_updates(tools: &mut [Tool], recommendations: &BTreeMap<String, String>) -> Vec<UrlUpdate> {
    let mut updates = Vec::new();

    for tool in tools.iter_mut() {
        let Some(recommended) = recommendations.get(tool.name()) else {
            continue;
        };

        let new_url = clean_recommended_url(recommended);
        let update = UrlUpdate {
            name: tool.name().to_string(),
            old_url: tool.source_url().to_string(),
            new_url,
        };
        tool.set_source_url(&update.new_url);
        info!("Updated {}: {} → {}", update.name, update.old_url, update.new_url);
        updates.push(update);
    }

    updates
}

/// Rename tools whose (updated) URL now points at their new brand.
///
/// The first matching rule wins for each tool.
pub fn apply_rebrands(tools: &mut [Tool], rules: &[RebrandRule]) -> Vec<String> {
    let mut rebrands = Vec::new();

    for tool in tools.iter_mut() {
        let Some(rule) = rules
            .iter()
            .find(|rule| tool.name() == rule.name && tool.source_url().contains(&rule.url_contains))
        else {
            continue;
        };

        tool.set_name(&rule.new_name);
        if tool.fields().contains_key("short_description") {
            let description = tool.short_description().replace(&rule.name, &rule.new_brand);
            tool.set_short_description(&description);
        }
        rebrands.push(format!("{} → {}", rule.name, rule.new_brand));
    }

    rebrands
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixOptions {
    /// Copy the data file aside before rewriting it
    pub backup: bool,
    /// Compute the changes without writing anything
    pub dry_run: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            backup: true,
            dry_run: false,
        }
    }
}

/// What a fixer run changed.
#[derive(Debug)]
pub struct FixOutcome {
    pub report: FixReport,
    pub backup_path: Option<PathBuf>,
}

pub struct RedirectFixer {
    rebrands: Vec<RebrandRule>,
    options: FixOptions,
}

impl RedirectFixer {
    pub fn new(rebrands: Vec<RebrandRule>, options: FixOptions) -> Self {
        Self { rebrands, options }
    }

    /// Apply URL updates and rebrands to `data`, saving it unless this is a dry run.
    pub fn run(
        &self,
        data: &mut ToolDataFile,
        recommendations: &BTreeMap<String, String>,
    ) -> Result<FixOutcome> {
        info!("{} tools need URL updates", recommendations.len());

        let backup_path = if self.options.backup && !self.options.dry_run {
            Some(data.backup()?)
        } else {
            None
        };

        let url_updates = apply_url_updates(data.tools_mut(), recommendations);
        let rebrands = apply_rebrands(data.tools_mut(), &self.rebrands);

        let unmatched = recommendations.len().saturating_sub(url_updates.len());
        if unmatched > 0 {
            warn!("{unmatched} recommended tools were not found in the data file");
        }

        if !self.options.dry_run {
            data.save()?;
        }

        Ok(FixOutcome {
            report: FixReport::new(url_updates, rebrands),
            backup_path,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::config::default_rebrands;
    use std::fs;
    use tempfile::TempDir;

    const DATA: &str = r#"// generated
export const TOOL_DATA = [
  {
    "id": 1,
    "name": "Tome",
    "source_url": "https://tome.app",
    "short_description": "Tome builds decks",
    "type": "personal"
  },
  {
    "id": 2,
    "name": "Gamma",
    "source_url": "https://gamma.app",
    "short_description": "Decks"
  }
];
export default TOOL_DATA;
"#;

    fn recommendations(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(name, url)| (name.to_string(), url.to_string()))
            .collect()
    }

    fn write_data(dir: &TempDir) -> Result<ToolDataFile> {
        let path = dir.path().join("toolData.js");
        fs::write(&path, DATA)?;
        ToolDataFile::load(&path)
    }

    #[test]
    fn test_clean_recommended_url() {
        assert_eq!(clean_recommended_url("https://new.example/"), "https://new.example");
        assert_eq!(clean_recommended_url("https://new.example///"), "https://new.example");
        assert_eq!(
            clean_recommended_url("https://windsurf.com/editor?redirected=codeium"),
            "https://windsurf.com/editor"
        );
        assert_eq!(
            clean_recommended_url("https://windsurf.com/?redirected=codeium"),
            "https://windsurf.com"
        );
        assert_eq!(clean_recommended_url("https://a.example/x"), "https://a.example/x");
    }

    #[test]
    fn test_apply_url_updates__only_recommended_tools() {
        let mut tools = vec![
            Tool::new("1", "Tome", "https://tome.app"),
            Tool::new("2", "Gamma", "https://gamma.app"),
        ];

        let updates = apply_url_updates(
            &mut tools,
            &recommendations(&[("Tome", "https://lightfield.app/"), ("Missing", "https://x.example")]),
        );

        assert_eq!(
            updates,
            vec![UrlUpdate {
                name: "Tome".to_string(),
                old_url: "https://tome.app".to_string(),
                new_url: "https://lightfield.app".to_string(),
            }]
        );
        assert_eq!(tools[0].source_url(), "https://lightfield.app");
        assert_eq!(tools[1].source_url(), "https://gamma.app");
    }

    #[test]
    fn test_apply_rebrands__requires_url_match() {
        let mut tools = vec![
            Tool::new("1", "Tome", "https://lightfield.app")
                .with_field("short_description", "Tome makes Tome decks"),
            Tool::new("2", "Codeium", "https://codeium.com"),
        ];

        let rebrands = apply_rebrands(&mut tools, &default_rebrands());

        assert_eq!(rebrands, vec!["Tome → Lightfield"]);
        assert_eq!(tools[0].name(), "Lightfield (formerly Tome)");
        assert_eq!(tools[0].short_description(), "Lightfield makes Lightfield decks");
        assert_eq!(tools[1].name(), "Codeium");
    }

    #[test]
    fn test_apply_rebrands__missing_description_is_not_added() {
        let mut tools = vec![Tool::new("1", "Codeium", "https://windsurf.com")];

        let rebrands = apply_rebrands(&mut tools, &default_rebrands());

        assert_eq!(rebrands, vec!["Codeium → Windsurf"]);
        assert!(!tools[0].fields().contains_key("short_description"));
    }

    #[test]
    fn test_run__rewrites_file_with_backup() -> Result<()> {
        let dir = TempDir::new()?;
        let mut data = write_data(&dir)?;
        let fixer = RedirectFixer::new(default_rebrands(), FixOptions::default());

        let outcome = fixer.run(
            &mut data,
            &recommendations(&[("Tome", "https://lightfield.app/")]),
        )?;

        assert_eq!(outcome.report.total_updates, 1);
        assert_eq!(outcome.report.rebrands, vec!["Tome → Lightfield"]);

        let backup = outcome.backup_path.expect("backup should be created");
        assert_eq!(fs::read_to_string(&backup)?, DATA);
        let backup_name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(backup_name.starts_with("toolData.js.backup."));

        let rewritten = fs::read_to_string(data.path())?;
        assert!(rewritten.starts_with("// generated\nexport const TOOL_DATA = ["));
        assert!(rewritten.ends_with("];\nexport default TOOL_DATA;\n"));
        assert!(rewritten.contains(r#""source_url": "https://lightfield.app""#));
        assert!(rewritten.contains(r#""name": "Lightfield (formerly Tome)""#));

        let reloaded = ToolDataFile::load(data.path())?;
        assert_eq!(reloaded.tools()[1], ToolDataFile::parse("x", DATA)?.tools()[1]);
        Ok(())
    }

    #[test]
    fn test_run__dry_run_writes_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        let mut data = write_data(&dir)?;
        let options = FixOptions {
            backup: true,
            dry_run: true,
        };

        let outcome = RedirectFixer::new(default_rebrands(), options).run(
            &mut data,
            &recommendations(&[("Gamma", "https://gamma.app/docs")]),
        )?;

        assert_eq!(outcome.report.total_updates, 1);
        assert!(outcome.backup_path.is_none());
        assert_eq!(fs::read_to_string(data.path())?, DATA);
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_run__without_backup() -> Result<()> {
        let dir = TempDir::new()?;
        let mut data = write_data(&dir)?;
        let options = FixOptions {
            backup: false,
            dry_run: false,
        };

        let outcome = RedirectFixer::new(vec![], options).run(&mut data, &BTreeMap::new())?;

        assert!(outcome.backup_path.is_none());
        assert_eq!(outcome.report.total_updates, 0);
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_fix_report_save_and_load() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("redirect-fix-report.json");
        let report = FixReport::new(
            vec![UrlUpdate {
                name: "Tome".to_string(),
                old_url: "https://tome.app".to_string(),
                new_url: "https://lightfield.app".to_string(),
            }],
            vec!["Tome → Lightfield".to_string()],
        );

        report.save(&path)?;
        let json: serde_json::Value = load_json(&path)?;
        assert_eq!(json["total_updates"], 1);
        assert_eq!(json["url_updates"][0]["new_url"], "https://lightfield.app");

        assert_eq!(FixReport::load(&path)?, report);
        Ok(())
    }
}
