//! Color and formatting helpers for terminal output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";

    pub const GREEN: &'static str = "\x1b[32m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Bold wrapper around [`colorize`]
pub fn bold(text: &str) -> String {
    colorize(text, Colors::BOLD)
}

/// Terminal capability detection
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    // Check if colors are explicitly disabled
    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    // Force enable if explicitly requested
    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) if term == "dumb" || term.is_empty() => false,
        Ok(term) => {
            term.contains("color")
                || term.contains("256")
                || term.starts_with("xterm")
                || term.starts_with("screen")
                || term.starts_with("tmux")
                || term == "linux"
        }
        // Windows terminals and some IDE consoles leave TERM unset
        Err(_) => env::var("TERM_PROGRAM").is_ok() || env::var("WT_SESSION").is_ok(),
    }
}
