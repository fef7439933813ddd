//! Console output for every command
//!
//! `format_*` functions build the lines, `display_*` functions print them.

use std::path::Path;

use crate::audit::AuditReport;
use crate::config::Config;
use crate::core::constants::display;
use crate::health::HealthStatus;
use crate::redirects::{RedirectAnalysis, RedirectKind, RedirectResult};
use crate::repair::{FixReport, VerifyResult};
use crate::ui::color::{Colors, bold, colorize};

/// Duplicates listed in the audit output before truncating
const DUPLICATES_SHOWN: usize = 3;

pub fn rule() -> String {
    "=".repeat(display::RULE_WIDTH)
}

pub fn health_emoji(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => display::HEALTHY_EMOJI,
        HealthStatus::Redirected => display::REDIRECT_EMOJI,
        HealthStatus::NotFound => display::ERROR_EMOJI,
        HealthStatus::Error => display::WARNING_EMOJI,
    }
}

fn setting(label: &str, value: impl ToString) -> String {
    format!(
        "{}: {}",
        colorize(&bold(label), Colors::CYAN),
        value.to_string()
    )
}

/// Effective settings, shown with `--verbose`.
pub fn format_config_info(config: &Config, data_path: Option<&Path>) -> Vec<String> {
    let mut lines = vec![
        setting("Concurrency", config.concurrency()),
        setting("Health timeout (seconds)", config.timeout_duration().as_secs()),
        setting(
            "Redirect timeout (seconds)",
            config.redirect_timeout_duration().as_secs(),
        ),
        setting("Max hops", config.max_hops()),
        setting("User-Agent", config.user_agent()),
    ];
    if let Some(path) = data_path {
        lines.push(setting("Tool data", path.display()));
    }
    lines
}

pub fn display_config_info(config: &Config, data_path: Option<&Path>) {
    for line in format_config_info(config, data_path) {
        println!("{line}");
    }
    println!();
}

pub fn format_audit(report: &AuditReport) -> Vec<String> {
    let details = &report.details;
    let mut lines = vec![
        format!("Total tools audited: {}", report.summary.total),
        rule(),
    ];

    lines.push(format!("Found {} duplicates", details.duplicate.len()));
    for duplicate in details.duplicate.iter().take(DUPLICATES_SHOWN) {
        lines.push(format!("  - {} vs {}", duplicate.tool1, duplicate.tool2));
        lines.push(format!("    Reason: {}", duplicate.reason.as_str()));
    }
    if details.duplicate.len() > DUPLICATES_SHOWN {
        lines.push(format!(
            "  ... and {} more",
            details.duplicate.len() - DUPLICATES_SHOWN
        ));
    }

    for entry in details.not_found.iter().chain(&details.error) {
        let reason = match (&entry.message, entry.code) {
            (Some(message), _) => message.clone(),
            (None, Some(code)) => format!("HTTP {code}"),
            (None, None) => "unknown".to_string(),
        };
        lines.push(format!(
            "{} {} - {}",
            health_emoji(entry.status),
            entry.tool.name(),
            reason
        ));
    }

    lines.push(format!(
        "Found {} potentially outdated tools",
        details.outdated.len()
    ));
    for entry in &details.outdated {
        lines.push(format!("  - {}: {}", entry.tool.name(), entry.note));
    }

    if !report.category_analysis.is_empty() {
        lines.push(format!(
            "Found {} categories needing more tools:",
            report.category_analysis.len()
        ));
        for (category, gap) in &report.category_analysis {
            lines.push(format!(
                "  - {category}: {} tools (needs {} more)",
                gap.count, gap.needs_more
            ));
        }
    }

    lines.push(rule());
    lines.push("Summary:".to_string());
    for (label, value) in report.summary.rows() {
        lines.push(format!("  {label}: {value}"));
    }

    if !report.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations:".to_string());
        for recommendation in &report.recommendations {
            lines.push(format!("  • {recommendation}"));
        }
    }

    lines
}

pub fn display_audit(report: &AuditReport, output: &Path) {
    for line in format_audit(report) {
        println!("{line}");
    }
    println!();
    println!(
        "{} Report saved to: {}",
        colorize(display::HEALTHY_EMOJI, Colors::GREEN),
        output.display()
    );
}

fn change_line(result: &RedirectResult) -> String {
    format!(
        "  • {}: {} → {}",
        result.tool.name,
        result.original_url(),
        result.final_url
    )
}

/// One tool's chain, as printed while following redirects.
pub fn format_redirect_result(result: &RedirectResult) -> Vec<String> {
    let mut lines = vec![
        format!("Original URL: {}", result.original_url()),
        format!("Final URL: {}", result.final_url),
        format!(
            "Analysis: {}",
            result.analysis.as_deref().unwrap_or("no redirect")
        ),
    ];
    if result.chain_length > 2 {
        lines.push("Redirect chain:".to_string());
        for hop in result.chain.hops() {
            let status = match (hop.status, &hop.error) {
                (Some(status), _) => status.to_string(),
                (None, Some(error)) => format!("Error: {error}"),
                (None, None) => "Error".to_string(),
            };
            lines.push(format!("  → {} ({status})", hop.url));
        }
    }
    lines
}

pub fn format_redirect_summary(analysis: &RedirectAnalysis) -> Vec<String> {
    let mut lines = vec![rule(), "REDIRECT ANALYSIS SUMMARY".to_string(), rule()];

    let groups = [
        (
            RedirectKind::Minor,
            display::HEALTHY_EMOJI,
            "MINOR CHANGES (No action needed)",
            analysis.summary.minor_changes,
        ),
        (
            RedirectKind::PathChange,
            display::WARNING_EMOJI,
            "PATH CHANGES (Should update)",
            analysis.summary.path_changes,
        ),
        (
            RedirectKind::Subdomain,
            display::REDIRECT_EMOJI,
            "SUBDOMAIN CHANGES (Review)",
            analysis.summary.subdomain_changes,
        ),
        (
            RedirectKind::Major,
            display::MAJOR_EMOJI,
            "MAJOR CHANGES (Must update)",
            analysis.summary.major_changes,
        ),
    ];

    for (kind, emoji, title, count) in groups {
        lines.push(String::new());
        lines.push(format!("{emoji} {title}: {count} tools"));
        for result in analysis.with_kind(kind) {
            lines.push(change_line(result));
            if kind == RedirectKind::Major
                && let Some(ref text) = result.analysis
            {
                lines.push(format!("    Analysis: {text}"));
            }
        }
    }

    if analysis.summary.no_redirect > 0 {
        lines.push(String::new());
        lines.push(format!(
            "No longer redirecting: {} tools",
            analysis.summary.no_redirect
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Tools needing URL updates: {}",
        analysis.needs_update_count()
    ));
    lines
}

pub fn display_redirect_analysis(analysis: &RedirectAnalysis, output: &Path, show_details: bool) {
    if show_details {
        for (index, result) in analysis.details.iter().enumerate() {
            println!();
            println!(
                "[{}/{}] {}",
                index + 1,
                analysis.details.len(),
                bold(&result.tool.name)
            );
            for line in format_redirect_result(result) {
                println!("{line}");
            }
        }
        println!();
    }

    for line in format_redirect_summary(analysis) {
        println!("{line}");
    }
    println!("Detailed report saved to: {}", output.display());
}

pub fn format_fix_report(report: &FixReport, backup: Option<&Path>, dry_run: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if dry_run {
        lines.push("Dry run: no files were written".to_string());
    }
    if let Some(path) = backup {
        lines.push(format!("Created backup: {}", path.display()));
    }

    for update in &report.url_updates {
        lines.push(format!(
            "✓ Updated {}: {} → {}",
            update.name, update.old_url, update.new_url
        ));
    }
    for rebrand in &report.rebrands {
        lines.push(format!("✓ Rebranded {rebrand}"));
    }

    lines.push(String::new());
    lines.push("Update Report:".to_string());
    lines.push(format!("  - URL updates: {}", report.url_updates.len()));
    lines.push(format!("  - Rebrands handled: {}", report.rebrands.len()));
    lines
}

pub fn display_fix_report(report: &FixReport, backup: Option<&Path>, dry_run: bool, output: Option<&Path>) {
    for line in format_fix_report(report, backup, dry_run) {
        println!("{line}");
    }
    if let Some(path) = output {
        println!("  - Report saved: {}", path.display());
    }
    if let Some(path) = backup {
        println!();
        println!("To revert changes, restore from: {}", path.display());
    }
}

pub fn format_verify_results(results: &[VerifyResult], rebrands: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = results.iter().map(ToString::to_string).collect();
    lines.push(String::new());
    lines.push("Rebranded tools:".to_string());
    for rebrand in rebrands {
        lines.push(format!("  • {rebrand}"));
    }
    lines
}

pub fn display_verify_results(results: &[VerifyResult], rebrands: &[String]) {
    println!("Verifying updated URLs...");
    println!("{}", "=".repeat(60));
    for line in format_verify_results(results, rebrands) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditDetails, AuditSummary, DuplicateEntry, DuplicateReason};
    use crate::core::types::Tool;
    use crate::health::HealthEntry;
    use crate::redirects::{Hop, RedirectChain, RedirectedTool};
    use crate::repair::{UrlUpdate, VerifyOutcome};
    use std::collections::BTreeMap;

    fn redirect_result(name: &str, hops: &[(&str, u16)]) -> RedirectResult {
        let tool = RedirectedTool {
            name: name.to_string(),
            id: "1".to_string(),
            original_url: hops[0].0.to_string(),
            status_code: Some(301),
        };
        let chain = RedirectChain::new(
            hops.iter()
                .map(|(url, status)| Hop::response(url.to_string(), *status))
                .collect(),
        );
        RedirectResult::from_chain(tool, chain).unwrap()
    }

    #[test]
    fn test_format_audit_lists_findings() {
        let tool1 = Tool::new("1", "Gamma", "https://gamma.app");
        let tool2 = Tool::new("2", "Gamma", "https://gamma.app/");
        let mut details = AuditDetails::default();
        details.duplicate.push(DuplicateEntry {
            tool1: tool1.clone(),
            tool2: tool2.clone(),
            reason: DuplicateReason::DuplicateName,
        });
        details.push_health(HealthEntry::from_response(tool1, 404, None));
        details.push_health(HealthEntry::failure(tool2, "Timeout".to_string()));

        let report = AuditReport {
            timestamp: String::new(),
            summary: AuditSummary {
                total: 2,
                not_found: 1,
                errors: 1,
                duplicates: 1,
                ..Default::default()
            },
            category_analysis: BTreeMap::new(),
            details,
            recommendations: vec!["Remove 1 duplicate tools".to_string()],
        };

        let lines = format_audit(&report);

        assert!(lines.contains(&"  - Gamma (ID: 1) vs Gamma (ID: 2)".to_string()));
        assert!(lines.contains(&"    Reason: duplicate_name".to_string()));
        assert!(lines.contains(&"❌ Gamma - HTTP 404".to_string()));
        assert!(lines.contains(&"⚠️ Gamma - Timeout".to_string()));
        assert!(lines.contains(&"  Not Found: 1".to_string()));
        assert_eq!(lines.last().unwrap(), "  • Remove 1 duplicate tools");
    }

    #[test]
    fn test_format_redirect_summary_groups() {
        let analysis = RedirectAnalysis::from_results(vec![
            redirect_result(
                "Tome",
                &[("https://tome.app", 301), ("https://lightfield.app", 200)],
            ),
            redirect_result(
                "Pitch",
                &[("http://pitch.com", 301), ("https://pitch.com/", 200)],
            ),
        ]);

        let lines = format_redirect_summary(&analysis);

        assert!(lines.contains(&"✅ MINOR CHANGES (No action needed): 1 tools".to_string()));
        assert!(lines.contains(&"🚨 MAJOR CHANGES (Must update): 1 tools".to_string()));
        assert!(lines.contains(&"  • Tome: https://tome.app → https://lightfield.app".to_string()));
        assert!(lines.contains(
            &"    Analysis: MAJOR: Complete domain change (possible rebrand/acquisition)".to_string()
        ));
        assert_eq!(lines.last().unwrap(), "Tools needing URL updates: 1");
    }

    #[test]
    fn test_format_redirect_result_shows_long_chains() {
        let short = redirect_result("A", &[("https://a.example", 301), ("https://b.example", 200)]);
        assert_eq!(format_redirect_result(&short).len(), 3);

        let long = redirect_result(
            "A",
            &[
                ("https://a.example", 301),
                ("https://b.example", 302),
                ("https://c.example", 200),
            ],
        );
        let lines = format_redirect_result(&long);
        assert_eq!(lines[3], "Redirect chain:");
        assert_eq!(lines[4], "  → https://a.example (301)");
    }

    #[test]
    fn test_format_fix_report() {
        let report = FixReport::new(
            vec![UrlUpdate {
                name: "Tome".to_string(),
                old_url: "https://tome.app".to_string(),
                new_url: "https://lightfield.app".to_string(),
            }],
            vec!["Tome → Lightfield".to_string()],
        );

        let lines = format_fix_report(&report, None, true);

        assert_eq!(lines[0], "Dry run: no files were written");
        assert!(lines.contains(&"✓ Updated Tome: https://tome.app → https://lightfield.app".to_string()));
        assert!(lines.contains(&"  - Rebrands handled: 1".to_string()));
    }

    #[test]
    fn test_format_verify_results() {
        let results = vec![VerifyResult {
            name: "Tome".to_string(),
            url: "https://lightfield.app".to_string(),
            outcome: VerifyOutcome::Status(200),
        }];

        let lines = format_verify_results(&results, &["Tome → Lightfield".to_string()]);

        assert_eq!(
            lines,
            vec![
                "✅ Tome: https://lightfield.app",
                "",
                "Rebranded tools:",
                "  • Tome → Lightfield",
            ]
        );
    }

    #[test]
    fn test_format_config_info() {
        let lines = format_config_info(&Config::default(), Some(Path::new("toolData.js")));
        assert!(lines.contains(&"Concurrency: 10".to_string()));
        assert!(lines.contains(&"Tool data: toolData.js".to_string()));
    }
}
