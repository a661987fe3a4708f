mod file_collector;
mod parser;
mod progress;
pub mod extractor;

use std::path::{Path, PathBuf};
use anyhow::Result;
use log::{debug, warn};

use crate::class::types::{CandidateToken, ClassScanOptions};

// Re-export from submodules
pub use file_collector::FileCollector;
pub use parser::ClassParser;
pub use progress::ProgressTracker;
pub use extractor::{PatternExtractor, PatternKind, split_static_tokens};

/// Outcome of scanning one file
#[derive(Debug)]
pub struct ScannedFile {
    /// Path to the scanned file
    pub path: PathBuf,

    /// Extracted candidates, or the error that stopped the file from being read
    pub outcome: Result<Vec<CandidateToken>>,
}

/// Class scanner responsible for finding files and extracting candidates from them
#[derive(Debug)]
pub struct ClassScanner {
    /// Configuration options for scanning
    options: ClassScanOptions,

    /// File collector for finding source files
    file_collector: FileCollector,

    /// Class parser for reading source files
    parser: ClassParser,

    /// Progress tracker for displaying progress
    progress_tracker: ProgressTracker,
}

impl ClassScanner {
    /// Create a new class scanner with the given options
    pub fn new(options: ClassScanOptions) -> Self {
        Self {
            file_collector: FileCollector::new(options.extensions.clone(), options.exclude_dirs.clone()),
            parser: ClassParser::new(&options),
            progress_tracker: ProgressTracker::new(options.show_progress),
            options,
        }
    }

    /// The parser used for individual files
    pub fn parser(&self) -> &ClassParser {
        &self.parser
    }

    /// Collect all source files under the input directory
    pub fn collect_files(&self, input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let files = self.file_collector.collect_files(input_dir)?;

        // Limit the number of files if specified
        match self.options.max_files {
            Some(max_files) if files.len() > max_files => {
                warn!("Limiting to {} files out of {}", max_files, files.len());
                Ok(files.into_iter().take(max_files).collect())
            }
            _ => Ok(files),
        }
    }

    /// Parse a single file and return the candidates found in it
    pub fn parse_file(&self, file: impl AsRef<Path>) -> Result<Vec<CandidateToken>> {
        self.parser.parse_file(file)
    }

    /// Scan files one after another, keeping going past files that fail to read
    pub fn scan_files(&self, files: &[PathBuf]) -> Vec<ScannedFile> {
        let results = self.progress_tracker.track_path_progress(files, |file| {
            let outcome = self.parse_file(file);
            if let Err(e) = &outcome {
                warn!("Error processing {}: {:#}", file.display(), e);
            }
            ScannedFile {
                path: file.clone(),
                outcome,
            }
        });

        debug!("Scanned {} files", results.len());
        results
    }
}
