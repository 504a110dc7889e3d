use anyhow::{Context, Result};

use super::Config;
use super::normalize::normalize;

/// Parse a YAML string into a Config
pub fn parse_yaml_str(content: &str) -> Result<Config> {
    let raw: serde_yaml::Value =
        serde_yaml::from_str(content).context("Failed to parse YAML content")?;

    Config::from_value(normalize(&raw))
}
