use clap::Parser;
use toolaudit::audit::{AuditReport, Auditor};
use toolaudit::catalog::{ToolDataFile, locate_tool_data};
use toolaudit::config::{CliConfig, Config};
use toolaudit::health::HealthChecker;
use toolaudit::logging;
use toolaudit::redirects::{RedirectAnalysis, RedirectAnalyzer, RedirectedTool};
use toolaudit::repair::{FixOptions, FixReport, RedirectFixer, UrlVerifier};
use toolaudit::ui::ProgressReporter;
use toolaudit::ui::output;
use toolaudit::ui::{Cli, Commands, cli_to_config, generate_completions};

use std::path::{Path, PathBuf};
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_toolaudit_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Commands::CompletionGenerate { shell } => {
            generate_completions(shell);
            Some(0)
        }
        _ => None,
    }
}

/// Dispatch the selected subcommand, extracted from main() for testing
pub async fn run_toolaudit_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    match &cli.command {
        Commands::Audit {
            check_urls,
            path,
            output,
        } => {
            run_audit(&config, &output_settings, *check_urls, path.as_deref(), output).await?;
        }
        Commands::Redirects { report, output, .. } => {
            run_redirects(&config, &output_settings, report, output).await?;
        }
        Commands::FixRedirects {
            analysis,
            path,
            output,
            no_backup,
            dry_run,
        } => {
            let options = FixOptions {
                backup: !no_backup,
                dry_run: *dry_run,
            };
            run_fix_redirects(
                &config,
                &output_settings,
                analysis,
                path.as_deref(),
                output,
                options,
            )?;
        }
        Commands::Verify { report } => {
            run_verify(&config, &output_settings, report).await?;
        }
        Commands::CompletionGenerate { .. } => {}
    }

    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub show_progress: bool,
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        show_progress,
    }
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    if output_settings.show_progress {
        Some(ProgressReporter::new(true))
    } else {
        None
    }
}

/// Finalize progress reporting
pub fn finalize_progress_reporter(progress: Option<ProgressReporter>) {
    if let Some(ref progress) = progress {
        progress.finish_and_clear();
    }
}

/// Find the data file: `--path`, then the standard locations, then `data_path` from the config
pub fn resolve_data_path(
    explicit: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base = std::env::current_dir()?;
    let configured = config.data_path.as_deref().map(Path::new);
    Ok(locate_tool_data(explicit, configured, &base)?)
}

pub async fn run_audit(
    config: &Config,
    output_settings: &OutputSettings,
    check_urls: bool,
    path: Option<&Path>,
    output: &Path,
) -> Result<AuditReport, Box<dyn std::error::Error>> {
    let data_path = resolve_data_path(path, config)?;
    let data = ToolDataFile::load(&data_path)?;
    logging::log_data_file(&data_path, data.tools().len());

    if output_settings.verbose && !output_settings.quiet {
        output::display_config_info(config, Some(&data_path));
    }

    let checker = if check_urls {
        Some(HealthChecker::new(config)?)
    } else {
        if !output_settings.quiet {
            println!("Skipping URL health check (use --check-urls to enable)");
        }
        None
    };

    logging::log_run_start("audit", data.tools().len());
    let start_time = Instant::now();

    let mut progress = create_progress_reporter(output_settings);
    let report = Auditor::new(config)
        .run(data.tools(), checker.as_ref(), progress.as_mut())
        .await;
    finalize_progress_reporter(progress);

    report.save(output)?;
    logging::log_run_complete(
        "audit",
        report.recommendations.len(),
        start_time.elapsed().as_millis(),
    );

    if !output_settings.quiet {
        output::display_audit(&report, output);
    }
    Ok(report)
}

pub async fn run_redirects(
    config: &Config,
    output_settings: &OutputSettings,
    report_path: &Path,
    output: &Path,
) -> Result<RedirectAnalysis, Box<dyn std::error::Error>> {
    let report = AuditReport::load(report_path)?;
    let tools = RedirectedTool::from_report(&report);

    logging::log_run_start("redirects", tools.len());
    let start_time = Instant::now();

    let analyzer = RedirectAnalyzer::new(config)?;
    let mut progress = create_progress_reporter(output_settings);
    let analysis = analyzer.analyze_all(tools, progress.as_mut()).await;
    finalize_progress_reporter(progress);

    analysis.save(output)?;
    logging::log_run_complete(
        "redirects",
        analysis.needs_update_count(),
        start_time.elapsed().as_millis(),
    );

    if !output_settings.quiet {
        output::display_redirect_analysis(&analysis, output, output_settings.verbose);
    }
    Ok(analysis)
}

pub fn run_fix_redirects(
    config: &Config,
    output_settings: &OutputSettings,
    analysis_path: &Path,
    path: Option<&Path>,
    output: &Path,
    options: FixOptions,
) -> Result<FixReport, Box<dyn std::error::Error>> {
    let analysis = RedirectAnalysis::load(analysis_path)?;
    let data_path = resolve_data_path(path, config)?;
    let mut data = ToolDataFile::load(&data_path)?;
    logging::log_data_file(&data_path, data.tools().len());

    let fixer = RedirectFixer::new(config.rebrands(), options);
    let outcome = fixer.run(&mut data, &analysis.update_recommendations)?;

    let saved_to = if options.dry_run {
        None
    } else {
        outcome.report.save(output)?;
        Some(output)
    };

    if !output_settings.quiet {
        output::display_fix_report(
            &outcome.report,
            outcome.backup_path.as_deref(),
            options.dry_run,
            saved_to,
        );
    }
    Ok(outcome.report)
}

pub async fn run_verify(
    config: &Config,
    output_settings: &OutputSettings,
    report_path: &Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    let report = FixReport::load(report_path)?;
    let verifier = UrlVerifier::new(config)?;

    logging::log_run_start("verify", report.url_updates.len());
    let start_time = Instant::now();
    let results = verifier.verify_all(&report.url_updates).await;
    let failing = results.iter().filter(|result| !result.is_ok()).count();
    logging::log_run_complete("verify", failing, start_time.elapsed().as_millis());

    if !output_settings.quiet {
        output::display_verify_results(&results, &report.rebrands);
    }
    Ok(failing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DATA: &str = r#"export const TOOL_DATA = [
  { "id": 1, "name": "Tome", "source_url": "https://tome.app", "type": "personal", "category": "Slides" },
  { "id": 2, "name": "Tome", "source_url": "https://tome.app/", "type": "personal", "category": "Slides" }
];
"#;

    fn quiet_settings() -> OutputSettings {
        OutputSettings {
            quiet: true,
            verbose: false,
            show_progress: false,
        }
    }

    #[test]
    fn test_setup_output_settings() {
        let cli_config = CliConfig {
            quiet: true,
            ..Default::default()
        };
        let settings = setup_output_settings(&cli_config, &Config::default());
        assert!(settings.quiet);
        assert!(!settings.show_progress);
        assert!(create_progress_reporter(&settings).is_none());

        let settings = setup_output_settings(&CliConfig::default(), &Config::default());
        assert!(settings.show_progress);
    }

    #[test]
    fn test_load_and_merge_config_no_config() {
        let cli_config = CliConfig {
            no_config: true,
            timeout: Some(9),
            ..Default::default()
        };
        let config = load_and_merge_config(&cli_config).unwrap();
        assert_eq!(config.timeout, Some(9));
    }

    #[test]
    fn test_load_and_merge_config_missing_file() {
        let cli_config = CliConfig {
            config_file: Some("/definitely/missing.toml".to_string()),
            ..Default::default()
        };
        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[tokio::test]
    async fn test_run_audit_writes_report() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("toolData.js");
        let output = dir.path().join("audit-report.json");
        fs::write(&data_path, DATA).unwrap();

        let report = run_audit(
            &Config::default(),
            &quiet_settings(),
            false,
            Some(&data_path),
            &output,
        )
        .await
        .unwrap();

        assert_eq!(report.summary.duplicates, 2);
        assert_eq!(AuditReport::load(&output).unwrap(), report);
    }

    #[tokio::test]
    async fn test_run_redirects_missing_report_fails() {
        let dir = TempDir::new().unwrap();
        let result = run_redirects(
            &Config::default(),
            &quiet_settings(),
            &dir.path().join("audit-report.json"),
            &dir.path().join("redirect-analysis.json"),
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_run_fix_redirects_dry_run() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("toolData.js");
        let analysis_path = dir.path().join("redirect-analysis.json");
        let output = dir.path().join("redirect-fix-report.json");
        fs::write(&data_path, DATA).unwrap();
        fs::write(
            &analysis_path,
            r#"{ "update_recommendations": { "Tome": "https://lightfield.app/" } }"#,
        )
        .unwrap();

        let report = run_fix_redirects(
            &Config::default(),
            &quiet_settings(),
            &analysis_path,
            Some(&data_path),
            &output,
            FixOptions {
                backup: true,
                dry_run: true,
            },
        )
        .unwrap();

        assert_eq!(report.total_updates, 2);
        assert_eq!(report.rebrands.len(), 2);
        assert_eq!(fs::read_to_string(&data_path).unwrap(), DATA);
        assert!(!output.exists());
    }
}
