use crate::config::Config;
use log::{debug, error, info, warn};
use std::path::Path;

/// Level forced onto the logger, or `None` to leave `RUST_LOG` in charge
fn forced_level(verbose: bool, quiet: bool, rust_log_set: bool) -> Option<log::LevelFilter> {
    if quiet {
        Some(log::LevelFilter::Off)
    } else if verbose {
        Some(log::LevelFilter::Debug)
    } else if rust_log_set {
        None
    } else {
        Some(log::LevelFilter::Off) // Only show structured logs in verbose mode
    }
}

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let rust_log_set = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = forced_level(verbose, quiet, rust_log_set) {
        builder.filter_level(level);
    }

    // `try_init` so a second call (tests, embedding) is harmless
    let _ = builder
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized (verbose={verbose}, quiet={quiet})");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: concurrency={}, timeout={}s, redirect_timeout={}s",
        config.concurrency(),
        config.timeout_duration().as_secs(),
        config.redirect_timeout_duration().as_secs()
    );
    info!(
        "Delays: health={}ms, redirect={}ms, max_hops={}",
        config.health_delay_duration().as_millis(),
        config.redirect_delay_duration().as_millis(),
        config.max_hops()
    );
    debug!("User-Agent: {}", config.user_agent());
}

/// Log which data file is in use
pub fn log_data_file(path: &Path, tool_count: usize) {
    info!("Using {} ({tool_count} tools)", path.display());
}

/// Log the start of a command run
pub fn log_run_start(command: &str, item_count: usize) {
    info!("Starting {command} over {item_count} item(s)");
}

/// Log the end of a command run
pub fn log_run_complete(command: &str, issues: usize, duration_ms: u128) {
    if issues == 0 {
        info!("✅ {command} complete, nothing to act on ({duration_ms}ms)");
    } else {
        warn!("{command} complete: {issues} item(s) need attention ({duration_ms}ms)");
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
