//! Temporary reference directories.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A reference directory named `reference` inside a temporary directory.
///
/// The fixed name matters for templates placed directly under the root: their
/// part name falls back to the reference directory's own name.
pub struct ReferenceTree {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl ReferenceTree {
    /// Create an empty reference directory.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("reference");
        fs::create_dir_all(&root)?;

        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Path of the reference directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `relative` (slash-separated), creating parent
    /// directories. Returns the full path.
    pub fn add(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = relative.split('/').fold(self.root.clone(), |acc, part| acc.join(part));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
