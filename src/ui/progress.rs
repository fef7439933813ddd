use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

pub struct ProgressReporter {
    multi_progress: Arc<MultiProgress>,
    health_progress: Option<ProgressBar>,
    redirect_progress: Option<ProgressBar>,
    enabled: bool,
}

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::new()),
            health_progress: None,
            redirect_progress: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_health_checks(&mut self, total_tools: usize) {
        if !self.enabled {
            return;
        }

        let pb = self
            .multi_progress
            .add(ProgressBar::new(total_tools as u64));
        pb.set_style(bar_style(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} tool URLs checked ({eta})",
        ));
        pb.enable_steady_tick(Duration::from_millis(120));
        self.health_progress = Some(pb);
    }

    pub fn update_health_progress(&self, current: usize) {
        if let Some(ref pb) = self.health_progress {
            pb.set_position(current as u64);
        }
    }

    pub fn finish_health_checks(&self, healthy: usize, total: usize) {
        if let Some(ref pb) = self.health_progress {
            let message = if healthy == total {
                "✓ All tool URLs healthy".to_string()
            } else {
                format!("✓ Health checks complete ({healthy}/{total} healthy)")
            };
            pb.finish_with_message(message);
        }
    }

    pub fn start_redirects(&mut self, total_tools: usize) {
        if !self.enabled {
            return;
        }

        let pb = self
            .multi_progress
            .add(ProgressBar::new(total_tools as u64));
        pb.set_style(bar_style(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        ));
        pb.enable_steady_tick(Duration::from_millis(120));
        self.redirect_progress = Some(pb);
    }

    /// Show which tool is being followed and how many are done.
    pub fn update_redirect_progress(&self, current: usize, tool_name: &str) {
        if let Some(ref pb) = self.redirect_progress {
            pb.set_position(current as u64);
            pb.set_message(tool_name.to_string());
        }
    }

    pub fn finish_redirects(&self, needs_update: usize, total: usize) {
        if let Some(ref pb) = self.redirect_progress {
            pb.finish_with_message(format!(
                "✓ Redirect chains followed ({needs_update}/{total} need an update)"
            ));
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            self.multi_progress.clear().unwrap_or(());
            println!();
        }
    }

    pub fn log_warning(&self, message: &str) {
        if self.enabled {
            self.multi_progress
                .println(format!("⚠ {message}"))
                .unwrap_or(());
        }
    }
}
