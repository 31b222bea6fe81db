//! Logging and progress utilities.
//!
//! Standardized operation logging plus a progress bar for multi-file source
//! directories.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Template for the source-loading progress bar.
pub const DEFAULT_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Log the start of a file operation with consistent format.
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log the completion of a file operation with consistent format.
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    rows: usize,
    elapsed: Option<Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {operation} {rows} rows from {} in {duration:?}",
            path.display()
        );
    } else {
        log::info!("Successfully {operation} {rows} rows from {}", path.display());
    }
}

/// Log a warning with an optional related path.
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{message}: {}", path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Create a progress bar with the standard style.
#[must_use]
pub fn create_progress_bar(length: u64, description: &str) -> ProgressBar {
    let bar = ProgressBar::new(length);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(DEFAULT_BAR_TEMPLATE)
            .unwrap()
            .progress_chars("#>-"),
    );
    bar.set_message(description.to_string());
    bar
}
