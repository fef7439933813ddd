// Command-line interface definitions and parsing for toolaudit

use std::io;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::core::constants::{files, timeouts};
use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    // Network
    /// Health check timeout in seconds (default: 5)
    #[arg(
        short = 't',
        long,
        global = true,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..),
        help_heading = "Network"
    )]
    pub timeout: Option<u64>,

    /// Concurrent health checks (default: 10)
    #[arg(
        long,
        global = true,
        value_name = "COUNT",
        value_parser = clap::value_parser!(u64).range(1..),
        help_heading = "Network"
    )]
    pub concurrency: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, global = true, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, global = true, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit the tool directory for duplicates, stale entries and category gaps
    Audit {
        /// Check every tool URL with a HEAD request (takes longer)
        #[arg(long)]
        check_urls: bool,

        /// Path to toolData.js
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Where to write the audit report
        #[arg(long, value_name = "FILE", default_value = files::AUDIT_REPORT)]
        output: PathBuf,
    },
    /// Follow the redirects found by an audit and classify them
    Redirects {
        /// Audit report to read redirected tools from
        #[arg(long, value_name = "FILE", default_value = files::AUDIT_REPORT)]
        report: PathBuf,

        /// Where to write the redirect analysis
        #[arg(long, value_name = "FILE", default_value = files::REDIRECT_ANALYSIS)]
        output: PathBuf,

        /// Maximum hops recorded per chain (default: 5)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
        max_hops: Option<u64>,

        /// Delay between tools in ms (default: 500)
        #[arg(long, value_name = "MS")]
        delay: Option<u64>,
    },
    /// Rewrite tool URLs (and rebrands) from a redirect analysis
    #[command(name = "fix-redirects")]
    FixRedirects {
        /// Redirect analysis to read update recommendations from
        #[arg(long, value_name = "FILE", default_value = files::REDIRECT_ANALYSIS)]
        analysis: PathBuf,

        /// Path to toolData.js
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Where to write the fix report
        #[arg(long, value_name = "FILE", default_value = files::REDIRECT_FIX_REPORT)]
        output: PathBuf,

        /// Do not copy toolData.js aside before rewriting it
        #[arg(long)]
        no_backup: bool,

        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Re-check the URLs written by fix-redirects
    Verify {
        /// Fix report to read updated URLs from
        #[arg(long, value_name = "FILE", default_value = files::REDIRECT_FIX_REPORT)]
        report: PathBuf,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let global = &cli.global;
    let mut cli_config = CliConfig::default();

    // Network
    if let Some(timeout) = global.timeout {
        if timeout > timeouts::MAX_TIMEOUT_SECONDS {
            eprintln!(
                "Warning: Timeout of {timeout} seconds is quite large. Consider using a smaller value for better user experience."
            );
        }
        cli_config.timeout = Some(timeout);
    }

    if let Some(concurrency) = global.concurrency {
        if concurrency > 100 {
            eprintln!(
                "Warning: Concurrency of {concurrency} is quite high and may get tools rate limited. Consider using a smaller value."
            );
        }
        cli_config.concurrency = Some(concurrency as usize);
    }

    cli_config.user_agent = global.user_agent.clone();

    // Command specific
    match &cli.command {
        Commands::Audit { path, .. } | Commands::FixRedirects { path, .. } => {
            cli_config.data_path = path.as_ref().map(|path| path.display().to_string());
        }
        Commands::Redirects {
            max_hops, delay, ..
        } => {
            cli_config.max_hops = max_hops.map(|hops| hops as usize);
            cli_config.redirect_delay = *delay;
        }
        Commands::Verify { .. } | Commands::CompletionGenerate { .. } => {}
    }

    // Output
    cli_config.quiet = global.quiet;
    cli_config.verbose = global.verbose;
    cli_config.no_progress = global.no_progress;

    // Configuration
    cli_config.config_file = global.config.clone();
    cli_config.no_config = global.no_config;

    cli_config
}

/// Write completions for `shell` to stdout
pub fn generate_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}
