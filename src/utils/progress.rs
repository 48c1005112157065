use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar creation for enrichment runs
pub struct ProgressUtils;

impl ProgressUtils {
    /// Create a progress bar over catalog rows
    pub fn create_batch_progress(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("📋 [{elapsed_precise}] [{bar:40.yellow/cyan}] {pos}/{len} ({eta}) {msg}")
                .expect("valid batch template")
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        pb
    }
}

/// Common progress bar messages
pub struct ProgressMessages;

impl ProgressMessages {
    pub fn finished(provider: &str, matched: usize, total: usize) -> String {
        format!("✅ {}: {}/{} matched", provider, matched, total)
    }
}
