//! The single-line side file that remembers the last book used.

use std::path::PathBuf;

use anyhow::{Context, Result};
use texty_core::storage;

#[derive(Debug, Clone)]
pub struct DefaultFileStore {
    path: PathBuf,
}

impl DefaultFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored book name, or `None` if nothing has been stored yet.
    pub fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        Ok(content
            .lines()
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string))
    }

    pub fn write(&self, name: &str) -> Result<()> {
        storage::write_atomic(&self.path, format!("{}\n", name.trim()).as_bytes())
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), name, "stored default book");
        Ok(())
    }
}
