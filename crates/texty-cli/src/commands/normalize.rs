//! The `texty normalize` command.

use std::path::Path;

use anyhow::{Context, Result};
use texty_core::storage;

pub fn execute(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if content.is_empty() {
        println!("{} is empty, nothing to do.", path.display());
        return Ok(());
    }

    storage::write_atomic(path, normalize(&content).as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Normalized {}", path.display());
    Ok(())
}

/// Collapse every run of whitespace within a line into a single tab.
fn normalize(content: &str) -> String {
    content
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join("\t") + "\n")
        .collect()
}
