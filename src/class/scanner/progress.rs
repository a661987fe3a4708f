use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

/// Progress tracker for reporting each file as it is processed
#[derive(Debug, Default)]
pub struct ProgressTracker {
    /// Draw a progress bar instead of logging one line per file
    show_bar: bool,
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(show_bar: bool) -> Self {
        Self { show_bar }
    }

    /// Run `operation` over every path in order, reporting progress as it goes
    pub fn track_path_progress<F, R>(&self, paths: &[PathBuf], mut operation: F) -> Vec<R>
    where
        F: FnMut(&PathBuf) -> R,
    {
        let progress_bar = if self.show_bar && paths.len() > 10 {
            let pb = ProgressBar::new(paths.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(style);
            Some(pb)
        } else {
            None
        };

        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            match &progress_bar {
                Some(pb) => {
                    if let Some(file_name) = path.file_name() {
                        pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
                    }
                    debug!("Processing: {}", path.display());
                }
                None => info!("Processing: {}", path.display()),
            }

            results.push(operation(path));

            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Processing complete");
        }

        results
    }
}
