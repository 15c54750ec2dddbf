//! Progress reporting for analysis runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pipeline_application::{AnalysisProgressNotifier, StoredLocation};
use pipeline_domain::{ModelId, TaskType};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner while the model is working, status lines around it
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProgressNotifier for ProgressReporter {
    fn on_model_selected(&self, task: &TaskType, model: &ModelId) {
        eprintln!(
            "{} {} {} {}",
            "->".cyan(),
            task.as_str().bold(),
            "routed to".dimmed(),
            model
        );
    }

    fn on_dispatch_start(&self, model: &ModelId) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(model.to_string());
        pb.set_message("thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(pb);
        }
    }

    fn on_dispatch_complete(&self, model: &ModelId, success: bool) {
        if let Some(pb) = self.take_spinner() {
            if success {
                pb.finish_with_message(format!("{}", "done".green()));
            } else {
                pb.abandon_with_message(format!("{} ({})", "failed".red(), model));
            }
        }
    }

    fn on_result_persisted(&self, location: &StoredLocation) {
        eprintln!("{} {}", "Saved to".dimmed(), location);
    }
}

/// Plain status lines, for when stderr is not a terminal
pub struct SimpleProgress;

impl AnalysisProgressNotifier for SimpleProgress {
    fn on_task_classified(&self, task: &TaskType) {
        eprintln!("{} task: {}", "->".cyan(), task);
    }

    fn on_model_selected(&self, _task: &TaskType, model: &ModelId) {
        eprintln!("{} model: {}", "->".cyan(), model);
    }

    fn on_dispatch_complete(&self, model: &ModelId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_result_persisted(&self, location: &StoredLocation) {
        eprintln!("  saved: {}", location);
    }
}
