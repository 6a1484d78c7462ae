//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use texty_core::{SamplingConfig, StorageEncoding};

/// Top-level texty configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextyConfig {
    /// Encoding used when `--encoding` is not given.
    #[serde(default)]
    pub default_encoding: StorageEncoding,
    /// Side file remembering the default book.
    #[serde(default = "default_file_store")]
    pub default_file_store: PathBuf,
    /// Weighted pick tuning.
    #[serde(default)]
    pub sampling: SamplingConfig,
}

fn default_file_store() -> PathBuf {
    PathBuf::from(".reviewerDefault")
}

impl Default for TextyConfig {
    fn default() -> Self {
        Self {
            default_encoding: StorageEncoding::default(),
            default_file_store: default_file_store(),
            sampling: SamplingConfig::default(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `texty.toml` in the current directory
/// 2. `~/.config/texty/config.toml`
///
/// `TEXTY_ENCODING` overrides `default_encoding`.
pub fn load_config_from(path: Option<&Path>) -> Result<TextyConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("texty.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<TextyConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => TextyConfig::default(),
    };

    if let Ok(encoding) = std::env::var("TEXTY_ENCODING") {
        config.default_encoding = encoding
            .parse()
            .map_err(|e: String| anyhow::anyhow!("TEXTY_ENCODING: {e}"))?;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("texty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TextyConfig::default();
        assert_eq!(config.default_encoding, StorageEncoding::Blob);
        assert_eq!(config.default_file_store, PathBuf::from(".reviewerDefault"));
        assert_eq!(config.sampling, SamplingConfig::default());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
default_encoding = "text"

[sampling]
spread_factor = 0.5
"#;
        let config: TextyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_encoding, StorageEncoding::Text);
        assert!((config.sampling.spread_factor - 0.5).abs() < f64::EPSILON);
        assert!((config.sampling.mean_factor - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.sampling.max_retries, 100);
        assert_eq!(config.default_file_store, PathBuf::from(".reviewerDefault"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("texty.toml");
        std::fs::write(&path, "default_file_store = \"last-book\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_file_store, PathBuf::from("last-book"));
    }
}
