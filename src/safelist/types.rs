use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

use crate::class::types::ClassScanStats;

/// The safelist file consumed by the CSS build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafelistDocument {
    /// Sorted, deduplicated class names
    pub safelist: Vec<String>,
}

impl SafelistDocument {
    /// Build a document from classes in any order, sorting and deduplicating them
    pub fn from_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut safelist: Vec<String> = classes.into_iter().map(Into::into).collect();
        safelist.sort();
        safelist.dedup();
        Self { safelist }
    }

    pub fn len(&self) -> usize {
        self.safelist.len()
    }
}

/// Detailed scan report written next to the safelist on request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafelistReport {
    /// When this report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the scanner that produced it
    pub version: String,

    /// Directory that was scanned
    pub source_dir: String,

    /// Safelist file the report belongs to
    pub output_file: String,

    /// SHA-256 of the rendered safelist
    pub safelist_digest: String,

    /// Statistics about the scan
    pub stats: ClassScanStats,

    /// Number of files each class was found in
    pub class_frequency: BTreeMap<String, usize>,

    /// Classes found in each file
    pub file_classes: BTreeMap<String, Vec<String>>,
}

/// What a safelist generation run produced
#[derive(Debug, Clone)]
pub struct SafelistStats {
    /// Number of classes written
    pub total_classes: usize,

    /// SHA-256 of the written file content
    pub digest: String,

    /// Whether the file content differs from what was there before
    pub changed: bool,
}
