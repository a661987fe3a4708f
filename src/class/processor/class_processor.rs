use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info};

use crate::class::types::{CandidateToken, ClassScanOptions, ClassScanResult, ClassScanStats};
use crate::class::scanner::ClassScanner;
use super::filter::{FilterPolicy, TokenFilter, Verdict};

/// Class processor responsible for filtering and aggregating extracted classes
#[derive(Debug)]
pub struct ClassProcessor {
    /// Scanner for walking and reading source files
    scanner: ClassScanner,

    /// Filter deciding which candidates are classes
    filter: TokenFilter,
}

impl ClassProcessor {
    /// Create a new class processor with the given options and filter policy
    pub fn new(options: ClassScanOptions, policy: FilterPolicy) -> Self {
        Self {
            scanner: ClassScanner::new(options),
            filter: TokenFilter::new(policy),
        }
    }

    /// Create a new class processor with default options
    pub fn with_defaults() -> Self {
        Self::new(ClassScanOptions::default(), FilterPolicy::default())
    }

    /// Extract and filter classes from in-memory content
    pub fn process_content(&self, content: &str) -> BTreeSet<String> {
        let mut stats = ClassScanStats::default();
        let tokens = self.scanner.parser().extractor().extract(content);
        self.accept_tokens(tokens, &mut stats)
    }

    fn accept_tokens(&self, tokens: Vec<CandidateToken>, stats: &mut ClassScanStats) -> BTreeSet<String> {
        let mut accepted = BTreeSet::new();

        for token in tokens {
            stats.total_candidates += 1;
            match self.filter.evaluate(&token.value) {
                Verdict::Accept => {
                    accepted.insert(token.value);
                }
                Verdict::Reject(rule) => stats.record_rejection(rule),
            }
        }

        accepted
    }

    /// Process files and return the aggregated results
    pub fn process_files(&self, files: &[PathBuf]) -> ClassScanResult {
        info!("Processing {} files", files.len());

        let mut result = ClassScanResult::default();

        for scanned in self.scanner.scan_files(files) {
            result.stats.total_files += 1;

            let tokens = match scanned.outcome {
                Ok(tokens) => tokens,
                Err(_) => {
                    result.stats.error_files += 1;
                    result.stats.error_file_paths.push(scanned.path);
                    continue;
                }
            };

            let classes = self.accept_tokens(tokens, &mut result.stats);
            if classes.is_empty() {
                result.stats.empty_files += 1;
                continue;
            }

            debug!("{} classes in {}", classes.len(), scanned.path.display());
            result.stats.files_with_classes += 1;

            for class in &classes {
                *result.frequency.entry(class.clone()).or_insert(0) += 1;
            }
            result.classes.extend(classes.iter().cloned());
            result.file_classes.insert(scanned.path, classes);
        }

        result.stats.unique_classes = result.classes.len();

        info!(
            "Processed {} files, found {} unique classes",
            result.stats.total_files, result.stats.unique_classes
        );

        result
    }

    /// Scan a directory recursively for classes
    pub fn scan_directory(&self, input_dir: impl AsRef<Path>) -> Result<ClassScanResult> {
        let input_dir = input_dir.as_ref();
        info!("Scanning directory: {}", input_dir.display());

        let files = self.scanner.collect_files(input_dir)?;
        info!("Found {} files to process", files.len());

        Ok(self.process_files(&files))
    }
}
