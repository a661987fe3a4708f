use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{info, debug};

use crate::utils::file_utils;
use super::types::SafelistDocument;

/// Reads and writes the safelist file
#[derive(Debug, Clone)]
pub struct SafelistStorage {
    /// Path to the safelist file
    path: PathBuf,
}

impl SafelistStorage {
    /// Create a new storage for the given output path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Render a document the way it is written to disk
    pub fn render(document: &SafelistDocument) -> Result<String> {
        serde_json::to_string_pretty(document).context("Failed to serialize safelist")
    }

    /// Read the current file content, if the file exists
    pub fn read_raw(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        file_utils::read_file_to_string(&self.path).map(Some)
    }

    /// Load the safelist from disk
    pub fn load(&self) -> Result<Option<SafelistDocument>> {
        debug!("Loading safelist from {}", self.path.display());

        let Some(content) = self.read_raw()? else {
            debug!("Safelist file does not exist");
            return Ok(None);
        };

        let document = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse safelist file {}", self.path.display()))?;
        Ok(Some(document))
    }

    /// Save the safelist to disk, replacing any previous content
    pub fn save(&self, document: &SafelistDocument) -> Result<String> {
        let content = Self::render(document)?;
        file_utils::write_string_to_file(&self.path, &content)?;

        info!("Saved safelist with {} classes to {}", document.len(), self.path.display());
        Ok(content)
    }

    /// Get the path to the safelist file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn render_uses_two_space_indent() -> Result<()> {
        let doc = SafelistDocument::from_classes(["p-4", "flex"]);
        assert_eq!(
            SafelistStorage::render(&doc)?,
            "{\n  \"safelist\": [\n    \"flex\",\n    \"p-4\"\n  ]\n}"
        );
        Ok(())
    }

    #[test]
    fn empty_safelist_renders_empty_array() -> Result<()> {
        let rendered = SafelistStorage::render(&SafelistDocument::default())?;
        assert_eq!(rendered, "{\n  \"safelist\": []\n}");
        Ok(())
    }

    #[test]
    fn save_then_load() -> Result<()> {
        let dir = tempdir()?;
        let storage = SafelistStorage::new(dir.path().join("config/tailwindWhitelist.json"));
        assert!(storage.load()?.is_none());

        let doc = SafelistDocument::from_classes(["grid", "gap-2", "grid"]);
        storage.save(&doc)?;

        assert!(storage.path().exists());
        assert_eq!(storage.load()?, Some(doc));
        Ok(())
    }

    #[test]
    fn save_overwrites_previous_content() -> Result<()> {
        let dir = tempdir()?;
        let storage = SafelistStorage::new(dir.path().join("out.json"));
        storage.save(&SafelistDocument::from_classes(["old-class", "another"]))?;
        storage.save(&SafelistDocument::from_classes(["new-class"]))?;

        let loaded = storage.load()?.unwrap();
        assert_eq!(loaded.safelist, vec!["new-class"]);
        Ok(())
    }
}
