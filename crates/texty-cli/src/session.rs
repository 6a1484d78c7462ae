//! Per-invocation state shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use texty_core::{ProblemSetManager, StorageEncoding};

use crate::config::{load_config_from, TextyConfig};
use crate::default_file::DefaultFileStore;

/// Everything a command needs to know about this run, resolved once in `main`.
#[derive(Debug)]
pub struct Session {
    pub config: TextyConfig,
    pub encoding: StorageEncoding,
    file: Option<String>,
}

impl Session {
    pub fn build(
        file: Option<String>,
        encoding: Option<StorageEncoding>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let config = load_config_from(config_path)?;
        config.sampling.validate().context("invalid [sampling] config")?;
        let encoding = encoding.unwrap_or(config.default_encoding);
        Ok(Self {
            config,
            encoding,
            file,
        })
    }

    pub fn default_store(&self) -> DefaultFileStore {
        DefaultFileStore::new(self.config.default_file_store.clone())
    }

    /// The book name without extension: `--file` if given, else the stored default.
    pub fn source_name(&self) -> Result<String> {
        if let Some(file) = &self.file {
            return Ok(strip_extension(file));
        }
        self.default_store().read()?.context(
            "no book given: pass --file or set one with `texty default <NAME>`",
        )
    }

    /// Path of the book in the session encoding.
    pub fn source_path(&self) -> Result<PathBuf> {
        Ok(self.encoding.path_for(&self.source_name()?))
    }

    /// Load the book in the session encoding.
    pub fn open_manager(&self) -> Result<ProblemSetManager> {
        let name = self.source_name()?;
        let psm = ProblemSetManager::load(name.as_str(), self.encoding)
            .with_context(|| format!("failed to open {}", self.encoding.path_for(&name).display()))?;
        Ok(psm.with_sampling(self.config.sampling))
    }
}

/// `algebra.txt` -> `algebra`, `notes/algebra` -> `notes/algebra`.
pub fn strip_extension(file: &str) -> String {
    let path = Path::new(file);
    match path.extension() {
        Some(_) => path.with_extension("").to_string_lossy().into_owned(),
        None => file.to_string(),
    }
}

/// `<source_name>_<YYYY-MM-DD>.<ext>` for today's date.
pub fn timestamped_path(source_name: &str, encoding: StorageEncoding) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    encoding.path_for(&format!("{source_name}_{date}"))
}
