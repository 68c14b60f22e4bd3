//! Progress reporting during a solve run

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use math_quorum_application::ports::progress::ProgressNotifier;
use math_quorum_domain::{Model, Phase};
use std::sync::Mutex;

/// Progress bar over the models of the running phase
pub struct ProgressReporter {
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &Phase) -> &'static str {
        match phase {
            Phase::Query => "Querying models",
            Phase::Reconcile => "Reconciling answers",
        }
    }

    fn task_message(model: &Model, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), model)
        } else {
            format!("{} {}", "x".red(), model)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = ProgressBar::new(total_tasks as u64);
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, model: &Model, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::task_message(model, success));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        let bar = self.phase_bar.lock().ok().and_then(|mut slot| slot.take());
        if let Some(pb) = bar {
            pb.finish_with_message(format!("{} complete", phase.display_name().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI), used when stderr is not a terminal
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, model: &Model, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_phase_bar() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(&Phase::Query, 3);
        reporter.on_task_complete(&Phase::Query, &Model::ChatGpt, true);
        reporter.on_task_complete(&Phase::Query, &Model::Claude, false);
        {
            let slot = reporter.phase_bar.lock().unwrap();
            assert_eq!(slot.as_ref().map(|pb| pb.position()), Some(2));
        }
        reporter.on_phase_complete(&Phase::Query);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_task_without_phase_is_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_task_complete(&Phase::Query, &Model::DeepSeek, true);
        reporter.on_phase_complete(&Phase::Query);
    }
}
