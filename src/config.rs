use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::debug;
use serde::{Serialize, Deserialize};

use crate::class::processor::filter::FilterPolicy;
use crate::class::types::ClassScanOptions;
use crate::utils::file_utils;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "safelist.toml";

/// Everything a safelist run needs
///
/// Loaded from a TOML file such as:
///
/// ```toml
/// source_dir = "src"
/// output_file = "config/tailwindWhitelist.json"
/// top = 10
///
/// [scan]
/// extensions = ["tsx", "astro"]
/// exclude_dirs = ["node_modules", "dist"]
/// string_literals = true
///
/// [filter]
/// min_length = 2
/// allow_uppercase = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafelistConfig {
    /// Root of the source tree to scan
    pub source_dir: PathBuf,

    /// Safelist JSON file to write
    pub output_file: PathBuf,

    /// Optional detailed scan report
    pub report_file: Option<PathBuf>,

    /// How many of the most used classes to print in the summary
    pub top: usize,

    /// File discovery and extraction settings
    pub scan: ClassScanOptions,

    /// Token filter settings
    pub filter: FilterPolicy,
}

impl Default for SafelistConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            output_file: PathBuf::from("config").join("tailwindWhitelist.json"),
            report_file: None,
            top: 10,
            scan: ClassScanOptions::default(),
            filter: FilterPolicy::default(),
        }
    }
}

impl SafelistConfig {
    /// Parse a config from TOML text; paths are left as written
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse safelist config")
    }

    /// Load a config file; relative paths in it resolve against the file's directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());

        let content = file_utils::read_file_to_string(path)?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Load `explicit` if given, else `safelist.toml` in the working directory if present,
    /// else the defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Prefix every relative path with `base`
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        resolve(&mut self.source_dir);
        resolve(&mut self.output_file);
        if let Some(report_file) = self.report_file.as_mut() {
            resolve(report_file);
        }
    }
}
