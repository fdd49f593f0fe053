//! Terminal progress reporting.
//!
//! Bars are hidden when logging is verbose so log lines and the bar do not
//! fight over stderr.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar for per-ticker quote lookups.
pub(crate) fn fetch_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Spinner for a single slow step.
pub(crate) fn spinner(message: &'static str, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
