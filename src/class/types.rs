use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use serde::{Serialize, Deserialize};

/// A raw class-name candidate pulled out of a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateToken {
    /// The token text as it appeared in the source
    pub value: String,

    /// Name of the extraction pattern that produced this token
    pub pattern: &'static str,

    /// Path to the file where this token was found
    pub file_path: Option<PathBuf>,
}

/// Statistics about the class scanning process
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClassScanStats {
    /// Total number of files processed
    pub total_files: usize,

    /// Number of unique classes accepted
    pub unique_classes: usize,

    /// Number of candidate tokens seen before filtering
    pub total_candidates: usize,

    /// Number of candidate tokens rejected by the filter
    pub rejected_candidates: usize,

    /// Rejection counts keyed by rule name
    pub rejections_by_rule: BTreeMap<String, usize>,

    /// Number of files that produced no accepted classes
    pub empty_files: usize,

    /// Number of files containing classes
    pub files_with_classes: usize,

    /// Number of files that could not be read
    pub error_files: usize,

    /// Paths to files that could not be read
    pub error_file_paths: Vec<PathBuf>,
}

/// Configuration options for class scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassScanOptions {
    /// File extensions to scan, without the leading dot
    pub extensions: Vec<String>,

    /// Directory names that are never descended into
    pub exclude_dirs: Vec<String>,

    /// Whether every single-line string literal is treated as a class source
    pub string_literals: bool,

    /// Maximum number of files to process
    pub max_files: Option<usize>,

    /// Show a progress bar instead of per-file log lines
    pub show_progress: bool,
}

impl Default for ClassScanOptions {
    fn default() -> Self {
        Self {
            extensions: ["js", "jsx", "ts", "tsx", "astro", "html", "vue", "svelte"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            exclude_dirs: ["node_modules", "dist", "build", ".git"]
                .iter()
                .map(|dir| dir.to_string())
                .collect(),
            string_literals: true,
            max_files: None,
            show_progress: false,
        }
    }
}

/// Result of a class scanning operation
#[derive(Debug, Clone, Default)]
pub struct ClassScanResult {
    /// Every accepted class, sorted and deduplicated
    pub classes: BTreeSet<String>,

    /// Number of files each class was found in
    pub frequency: BTreeMap<String, usize>,

    /// Accepted classes per scanned file
    pub file_classes: BTreeMap<PathBuf, BTreeSet<String>>,

    /// Statistics about the scanning process
    pub stats: ClassScanStats,
}
