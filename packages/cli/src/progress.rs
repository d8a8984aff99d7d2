//! Progress display for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::runtime::RunSummary;

/// Spinner shown while the queue drains.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager.
    ///
    /// If progress is disabled, the spinner is hidden.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {elapsed_precise} {msg}")
                .expect("Invalid progress bar template"),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    /// Show the current totals and queue depth.
    pub fn update(&self, summary: &RunSummary, pending: usize) {
        self.bar.set_message(format!(
            "{} dirs, {} files, {} chunks, {pending} pending",
            summary.directories, summary.files, summary.chunks
        ));
    }

    /// Remove the spinner (for clean output after completion).
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}
