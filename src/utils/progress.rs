//! Progress helpers using indicatif
//!
//! Bars draw on stderr and stay hidden when it is not a terminal, so they
//! never interleave with operation output on stdout.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for record streams of unknown length
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {pos} records")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Create a progress bar for a region batch
pub fn create_batch_progress(regions: u64, action: &str) -> ProgressBar {
    let pb = ProgressBar::new(regions);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );
    pb.set_prefix(action.to_string());
    pb
}

/// Finish a spinner with a success message
pub fn finish_with_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✅ {}", message));
}
