//! The `texty init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("texty.toml").exists() {
        println!("texty.toml already exists, skipping.");
    } else {
        std::fs::write("texty.toml", SAMPLE_CONFIG)?;
        println!("Created texty.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: texty default <book>");
    println!("  2. Run: texty new");
    println!("  3. Run: texty add 1.1:20:5 1.2:15:12");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# texty configuration

# Encoding used when --encoding is not given: "blob" keeps answer history,
# "text" is a plain tab-separated table.
default_encoding = "blob"

# File remembering the default book.
default_file_store = ".reviewerDefault"

[sampling]
# Where the weighted draw peaks (1.0 = first problem set, 0.0 = last) and how
# widely it spreads, as fractions of the last index.
mean_factor = 0.8
spread_factor = 0.3
# Redraws before falling back to the last problem set.
max_retries = 100
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextyConfig;

    #[test]
    fn sample_config_parses() {
        let config: TextyConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.sampling, texty_core::SamplingConfig::default());
    }
}
