//! Progress reporting functionality
//!
//! Shows a spinner with the current file while artifacts are analyzed. The
//! spinner is hidden in quiet mode or when progress display is turned off.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::Cell;
use std::time::Duration;

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    verbose: bool,
    processed: Cell<usize>,
}

impl ProgressReporter {
    /// Create a new progress reporter; `enabled == false` turns every call
    /// into a no-op
    pub fn new(enabled: bool, verbose: bool) -> Self {
        let spinner = if enabled {
            let spinner = ProgressBar::new_spinner();
            let template = "{spinner:.green} [{elapsed}] {pos} {msg}";
            if let Ok(style) = ProgressStyle::default_spinner().template(template) {
                spinner.set_style(style);
            }
            Some(spinner)
        } else {
            None
        };

        Self {
            spinner,
            verbose,
            processed: Cell::new(0),
        }
    }

    /// A reporter that never draws anything
    pub fn hidden() -> Self {
        let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        Self {
            spinner: Some(spinner),
            verbose: false,
            processed: Cell::new(0),
        }
    }

    /// Start a new progress operation
    pub fn start(&self, operation: &str) {
        self.processed.set(0);
        if let Some(spinner) = &self.spinner {
            spinner.reset();
            spinner.set_message(operation.to_string());
            spinner.enable_steady_tick(Duration::from_millis(100));
        }
        if self.verbose {
            println!("Starting: {}", operation);
        }
    }

    /// Record one processed item
    pub fn tick(&self, message: &str) {
        self.processed.set(self.processed.get() + 1);
        if let Some(spinner) = &self.spinner {
            spinner.inc(1);
            spinner.set_message(message.to_string());
        }
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
        if self.verbose {
            println!("Finished: {}", message);
        }
    }

    /// Items processed since the last `start`
    pub fn processed(&self) -> usize {
        self.processed.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.spinner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_still_counts() {
        let progress = ProgressReporter::new(false, false);
        assert!(!progress.is_enabled());

        progress.start("Analyzing classes");
        progress.tick("A.class");
        progress.tick("B.class");
        assert_eq!(progress.processed(), 2);
        progress.finish("done");
    }

    #[test]
    fn test_hidden_reporter() {
        let progress = ProgressReporter::hidden();
        progress.start("Analyzing classes");
        progress.tick("A.class");
        progress.finish("done");
        assert_eq!(progress.processed(), 1);
    }
}
