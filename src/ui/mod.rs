//! User interface and interaction
//!
//! This module contains all components related to user interaction,
//! including CLI parsing, console output, progress reporting,
//! and shell completion generation.

pub mod cli;
pub mod color;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, Commands, GlobalArgs, cli_to_config, generate_completions};
pub use progress::ProgressReporter;
