use std::path::{Path, PathBuf};
use anyhow::Result;
use chrono::Utc;
use log::{info, warn};

use crate::class::processor::ClassProcessor;
use crate::class::types::ClassScanResult;
use crate::config::SafelistConfig;
use crate::utils::{file_utils, hash_utils};
use super::storage::SafelistStorage;
use super::types::{SafelistDocument, SafelistReport, SafelistStats};

/// Turns scan results into the safelist file and its report
#[derive(Debug)]
pub struct SafelistOperations {
    /// Storage for the safelist file
    storage: SafelistStorage,
}

impl SafelistOperations {
    /// Create a new operations instance writing to `output_path`
    pub fn new(output_path: impl AsRef<Path>) -> Self {
        Self {
            storage: SafelistStorage::new(output_path),
        }
    }

    /// Build the output document from scan results
    pub fn build_document(result: &ClassScanResult) -> SafelistDocument {
        SafelistDocument {
            safelist: result.classes.iter().cloned().collect(),
        }
    }

    /// Current content of the safelist file; an unreadable file counts as absent
    fn previous_content(&self) -> Option<String> {
        match self.storage.read_raw() {
            Ok(content) => content,
            Err(e) => {
                warn!("Treating existing safelist as stale: {:#}", e);
                None
            }
        }
    }

    /// Write the safelist for the given scan results
    pub fn write(&self, result: &ClassScanResult) -> Result<SafelistStats> {
        let previous = self.previous_content();
        let document = Self::build_document(result);
        let content = self.storage.save(&document)?;

        Ok(SafelistStats {
            total_classes: document.len(),
            digest: hash_utils::hash_string(&content),
            changed: previous.as_deref() != Some(content.as_str()),
        })
    }

    /// Whether the file on disk already matches the given scan results byte for byte
    pub fn is_current(&self, result: &ClassScanResult) -> Result<bool> {
        let rendered = SafelistStorage::render(&Self::build_document(result))?;
        Ok(self.previous_content().as_deref() == Some(rendered.as_str()))
    }

    /// Build a detailed report for the given scan results
    pub fn build_report(&self, result: &ClassScanResult, source_dir: &Path) -> Result<SafelistReport> {
        let rendered = SafelistStorage::render(&Self::build_document(result))?;

        Ok(SafelistReport {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            source_dir: source_dir.display().to_string(),
            output_file: self.storage.path().display().to_string(),
            safelist_digest: hash_utils::hash_string(&rendered),
            stats: result.stats.clone(),
            class_frequency: result.frequency.clone(),
            file_classes: result
                .file_classes
                .iter()
                .map(|(path, classes)| (path.display().to_string(), classes.iter().cloned().collect()))
                .collect(),
        })
    }

    /// Write a report to `path`
    pub fn write_report(path: impl AsRef<Path>, report: &SafelistReport) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(report)?;
        file_utils::write_string_to_file(path, &content)?;
        info!("Saved scan report to {}", path.display());
        Ok(())
    }
}

/// The `n` classes found in the most files, ties broken by name
pub fn top_classes(result: &ClassScanResult, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = result
        .frequency
        .iter()
        .map(|(class, count)| (class.clone(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// What [`generate`] did
#[derive(Debug)]
pub struct GenerateOutcome {
    /// Aggregated scan results
    pub result: ClassScanResult,

    /// Path the safelist was written to
    pub output_file: PathBuf,

    /// Summary of the written file
    pub stats: SafelistStats,

    /// Path of the scan report, when one was written
    pub report_file: Option<PathBuf>,
}

/// What [`check`] found
#[derive(Debug)]
pub struct CheckOutcome {
    /// Aggregated scan results
    pub result: ClassScanResult,

    /// Whether the safelist on disk matches the scan
    pub up_to_date: bool,
}

fn scan(config: &SafelistConfig) -> Result<ClassScanResult> {
    let processor = ClassProcessor::new(config.scan.clone(), config.filter.clone());
    let result = processor.scan_directory(&config.source_dir)?;

    if result.stats.error_files > 0 {
        warn!("{} files could not be read and were skipped", result.stats.error_files);
    }
    Ok(result)
}

/// Scan the configured source tree and write the safelist (and report, if configured)
pub fn generate(config: &SafelistConfig) -> Result<GenerateOutcome> {
    let result = scan(config)?;

    let operations = SafelistOperations::new(&config.output_file);
    let stats = operations.write(&result)?;
    if !stats.changed {
        info!("Safelist unchanged");
    }

    if let Some(report_file) = &config.report_file {
        let report = operations.build_report(&result, &config.source_dir)?;
        SafelistOperations::write_report(report_file, &report)?;
    }

    Ok(GenerateOutcome {
        result,
        output_file: config.output_file.clone(),
        stats,
        report_file: config.report_file.clone(),
    })
}

/// Scan the configured source tree and compare against the safelist on disk without writing
pub fn check(config: &SafelistConfig) -> Result<CheckOutcome> {
    let result = scan(config)?;
    let up_to_date = SafelistOperations::new(&config.output_file).is_current(&result)?;
    Ok(CheckOutcome { result, up_to_date })
}
