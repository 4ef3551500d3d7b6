//! Progress bar display for installations

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress display for package installation
///
/// Draws to stderr, and stays hidden when stderr is not a terminal.
pub struct ProgressDisplay {
    package_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with the total package count
    pub fn new(total_packages: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let package_pb =
            ProgressBar::with_draw_target(Some(total_packages), ProgressDrawTarget::stderr());
        package_pb.set_style(style);

        Self { package_pb }
    }

    /// A display that never draws
    pub fn hidden() -> Self {
        Self {
            package_pb: ProgressBar::hidden(),
        }
    }

    /// Show the package being installed
    pub fn update_package(&self, feature_pack: &str, package: &str) {
        self.package_pb.set_message(format!("{feature_pack} {package}"));
    }

    /// Increment package progress
    pub fn inc_package(&self) {
        self.package_pb.inc(1);
    }

    pub fn finish(&self) {
        self.package_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.package_pb.abandon();
    }

    pub fn position(&self) -> u64 {
        self.package_pb.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_display_counts() {
        let progress = ProgressDisplay::hidden();
        progress.update_package("org.example:base:1.0", "main");
        progress.inc_package();
        progress.inc_package();
        assert_eq!(progress.position(), 2);
        progress.finish();
    }
}
