pub mod class;
pub mod config;
pub mod safelist;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main types and functions for easier access
pub use class::types::{CandidateToken, ClassScanOptions, ClassScanResult, ClassScanStats};
pub use class::scanner::{ClassScanner, PatternExtractor};
pub use class::processor::{ClassProcessor, FilterPolicy, TokenFilter, Verdict};

pub use config::SafelistConfig;
pub use safelist::{SafelistDocument, SafelistOperations, SafelistStorage, check, generate, top_classes};

// Re-export utility functions
pub use utils::file_utils;
