use anyhow::{Context, Result};

use super::{Config, Value};

/// Parse a JSON string into a Config
pub fn parse_json_str(content: &str) -> Result<Config> {
    let raw: serde_json::Value =
        serde_json::from_str(content).context("Failed to parse JSON content")?;

    Config::from_value(Value::from(raw))
}
