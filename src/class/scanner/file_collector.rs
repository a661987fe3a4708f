use std::path::{Path, PathBuf};
use anyhow::{Result, bail};
use log::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::utils::file_utils;

/// File collector for finding markup and script files
#[derive(Debug, Default)]
pub struct FileCollector {
    /// Valid file extensions to collect
    valid_extensions: Vec<String>,

    /// Directory names to prune from the walk
    excluded_dirs: Vec<String>,
}

impl FileCollector {
    /// Create a new file collector with the given extensions and excluded directories
    pub fn new(extensions: Vec<String>, excluded_dirs: Vec<String>) -> Self {
        Self {
            valid_extensions: extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            excluded_dirs,
        }
    }

    /// Collect all files with valid extensions from the input directory
    pub fn collect_files(&self, input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let input_dir = input_dir.as_ref();
        if !input_dir.is_dir() {
            bail!("Source directory does not exist: {}", input_dir.display());
        }
        debug!("Collecting files from directory: {}", input_dir.display());

        let mut files = Vec::new();

        let walker = WalkDir::new(input_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.has_valid_extension(entry.path()) {
                trace!("Found file: {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        debug!("Collected {} files for processing", files.len());
        Ok(files)
    }

    /// Whether a walk entry is a directory that must not be descended
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        let excluded = self.excluded_dirs.iter().any(|dir| *dir == name);
        if excluded {
            trace!("Pruning directory: {}", entry.path().display());
        }
        excluded
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        file_utils::has_any_extension(path, &self.valid_extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn collector() -> FileCollector {
        FileCollector::new(
            vec!["tsx".to_string(), ".html".to_string()],
            vec!["node_modules".to_string(), "dist".to_string()],
        )
    }

    #[test]
    fn collects_matching_extensions_only() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("App.tsx"), "")?;
        fs::write(dir.path().join("index.HTML"), "")?;
        fs::write(dir.path().join("notes.md"), "")?;

        let files = collector().collect_files(dir.path())?;
        let names: Vec<_> = files
            .iter()
            .filter_map(|f| f.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["App.tsx", "index.HTML"]);
        Ok(())
    }

    #[test]
    fn prunes_excluded_directories() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("node_modules/pkg"))?;
        fs::create_dir_all(dir.path().join("components/dist"))?;
        fs::write(dir.path().join("node_modules/pkg/index.tsx"), "")?;
        fs::write(dir.path().join("components/dist/out.tsx"), "")?;
        fs::write(dir.path().join("components/Card.tsx"), "")?;

        let files = collector().collect_files(dir.path())?;

        assert_eq!(files, vec![dir.path().join("components/Card.tsx")]);
        Ok(())
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let result = collector().collect_files(dir.path().join("nope"));
        assert!(result.is_err());
    }
}
