use std::path::Path;

use anyhow::Result;
use log::{debug, trace};

use crate::class::types::{CandidateToken, ClassScanOptions};
use crate::utils::file_utils;
use super::extractor::PatternExtractor;

/// Class parser for reading a source file and extracting candidates from it
#[derive(Debug, Clone)]
pub struct ClassParser {
    extractor: PatternExtractor,
}

impl ClassParser {
    /// Create a new class parser with the given options
    pub fn new(options: &ClassScanOptions) -> Self {
        Self {
            extractor: PatternExtractor::new(options.string_literals),
        }
    }

    /// The extractor this parser applies to file content
    pub fn extractor(&self) -> &PatternExtractor {
        &self.extractor
    }

    /// Parse a single file and return the candidate tokens found in it
    pub fn parse_file(&self, file: impl AsRef<Path>) -> Result<Vec<CandidateToken>> {
        let file = file.as_ref();

        let content = file_utils::read_file_to_string(file)?;

        if content.trim().is_empty() {
            debug!("Empty file found: {}", file.display());
            return Ok(Vec::new());
        }

        trace!("File size: {} bytes, starting extraction", content.len());

        let mut tokens = self.extractor.extract(&content);
        for token in &mut tokens {
            token.file_path = Some(file.to_path_buf());
        }

        debug!("Found {} candidates in {}", tokens.len(), file.display());
        Ok(tokens)
    }
}
