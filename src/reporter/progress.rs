//! Progress bar for the scan fetch loop.

use indicatif::{ProgressBar, ProgressStyle};

/// Minimum number of images to display a progress bar.
const MIN_IMAGES_FOR_PROGRESS: usize = 5;

/// Progress bar manager for the fetch loop.
pub struct FetchProgress {
    bar: Option<ProgressBar>,
}

impl FetchProgress {
    /// Create a progress bar if conditions are met: at least five images,
    /// an interactive terminal, and not CI mode.
    pub fn new(total_images: usize, is_tty: bool, is_ci: bool) -> Self {
        let bar = if should_show_progress(total_images, is_tty, is_ci) {
            Some(create_progress_bar(total_images))
        } else {
            None
        };
        Self { bar }
    }

    /// A progress handle that displays nothing.
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    /// Count one image as processed (fetched, reused, or skipped).
    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Finish and clear the progress bar.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

fn should_show_progress(total_images: usize, is_tty: bool, is_ci: bool) -> bool {
    total_images >= MIN_IMAGES_FOR_PROGRESS && is_tty && !is_ci
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "Fetching scans {bar:40} {pos:>3}/{len:3} images ({percent:>3}%)",
        )
        .expect("Invalid progress bar template")
        .progress_chars("⣿⣀ "),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_show_progress_below_threshold() {
        assert!(!should_show_progress(4, true, false));
    }

    #[test]
    fn test_should_show_progress_at_threshold() {
        assert!(should_show_progress(5, true, false));
    }

    #[test]
    fn test_should_not_show_in_non_tty() {
        assert!(!should_show_progress(100, false, false));
    }

    #[test]
    fn test_should_not_show_in_ci() {
        assert!(!should_show_progress(100, true, true));
    }

    #[test]
    fn test_hidden_has_no_bar() {
        assert!(FetchProgress::hidden().bar.is_none());
    }

    #[test]
    fn test_new_creates_bar_when_conditions_met() {
        let progress = FetchProgress::new(10, true, false);
        assert!(progress.bar.is_some());
    }

    #[test]
    fn test_inc_and_finish_without_bar() {
        let progress = FetchProgress::hidden();
        progress.inc();
        progress.finish();
    }

    #[test]
    fn test_create_progress_bar_length() {
        let pb = create_progress_bar(12);
        assert_eq!(pb.length(), Some(12));
    }
}
