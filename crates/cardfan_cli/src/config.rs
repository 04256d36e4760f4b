//! `cardfan.toml` handling
//!
//! The file holds a [`SelectorConfig`] at the top level. Every key is optional.

use anyhow::{Context, Result};
use cardfan_selector::SelectorConfig;
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory when `--config` is absent
pub const CONFIG_FILE: &str = "cardfan.toml";

/// Load and validate the selector config
///
/// An explicit path must exist. Without one, `./cardfan.toml` is used if
/// present and the defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<SelectorConfig> {
    let config = match path {
        Some(path) => load_file(path)?,
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                load_file(default_path)?
            } else {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                SelectorConfig::default()
            }
        }
    };

    config.validate().context("Invalid selector configuration")?;
    Ok(config)
}

fn load_file(path: &Path) -> Result<SelectorConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Parse config text without validating it
pub fn parse(content: &str) -> Result<SelectorConfig> {
    Ok(toml::from_str(content)?)
}

/// Render a config as TOML
pub fn to_toml(config: &SelectorConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial() {
        let config = parse("drag_threshold = 4.0\n").unwrap();
        assert_eq!(config.drag_threshold, 4.0);
        assert_eq!(config.card_offset, 40.0);
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(parse("card_offset = \"wide\"\n").is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let config = SelectorConfig::default().card_offset(32.0);
        let text = to_toml(&config).unwrap();
        assert_eq!(parse(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("definitely/not/here/cardfan.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
