use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub mod action;
pub mod json;
pub mod normalize;
pub mod value;
pub mod yaml;

pub use action::Action;
pub use value::Value;

/// A single-key map such as `{delay: 100}` or `{request: {target: a, id: b}}`.
pub type ActionEntry = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: BTreeMap<String, Service>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requests: BTreeMap<String, Request>,
    /// URL -> method -> endpoint
    #[serde(default, deserialize_with = "null_as_default")]
    pub endpoints: BTreeMap<String, BTreeMap<String, Endpoint>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub startup_actions: Vec<ActionEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub expected_response: Option<Response>,
}

/// What a named request expects back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    /// field -> expected type
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub params: Option<Params>,
    #[serde(default)]
    pub recieves: Option<Recieves>,
    #[serde(default)]
    pub responses: Option<Vec<WeightedResponse>>,
    /// Status code returned unconditionally; 0 means unset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<ActionEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Params {
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: BTreeMap<String, ParamEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: BTreeMap<String, ParamEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamEntry {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub param_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recieves {
    /// field -> type
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<ActionEntry>,
}

/// A key written with no value (`services:`) reads as the empty default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Build the entity model from a normalized document tree.
    pub fn from_value(value: Value) -> Result<Config> {
        let config: Config = serde_yaml::from_value(serde_yaml::Value::from(&value))
            .context("Document does not match the config schema")?;
        Ok(config)
    }
}

/// Serialization format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON, everything else is treated as YAML.
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

impl std::str::FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => anyhow::bail!("Unknown config format '{}', expected yaml or json", other),
        }
    }
}

/// Read, decode and model a config file.
pub fn load_file(path: &Path, format: Option<Format>) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    match format.unwrap_or_else(|| Format::from_path(path)) {
        Format::Yaml => yaml::parse_yaml_str(&content),
        Format::Json => json::parse_json_str(&content),
    }
    .with_context(|| format!("Failed to load config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/config.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("config.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("config.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("config")), Format::Yaml);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("YAML".parse::<Format>().unwrap(), Format::Yaml);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!("toml".parse::<Format>().is_err());
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "version: 1.0\nendpoints:\n  /x:\n    get:\n      response: 200\n"
        )
        .unwrap();

        let config = load_file(file.path(), None).unwrap();
        assert_eq!(config.version, 1.0);
        assert_eq!(config.endpoints["/x"]["get"].response, 200);
    }

    #[test]
    fn test_load_with_format_override() {
        let mut file = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
        write!(file, r#"{{"version": 1, "endpoints": {{}}}}"#).unwrap();

        let config = load_file(file.path(), Some(Format::Json)).unwrap();
        assert_eq!(config.version, 1.0);
        assert!(config.endpoints.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file(Path::new("/definitely/not/here.yaml"), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_empty_keys_read_as_empty_collections() {
        let config = yaml::parse_yaml_str(
            "version: 1.0\nservices:\nrequests:\nstartupActions:\nendpoints:\n  /x:\n    get:\n      response: 200\n      actions:\n",
        )
        .unwrap();
        assert!(config.services.is_empty());
        assert!(config.requests.is_empty());
        assert!(config.startup_actions.is_empty());
        assert!(config.endpoints["/x"]["get"].actions.is_empty());
    }

    #[test]
    fn test_nan_version_survives_modeling() {
        let config = yaml::parse_yaml_str("version: .nan\n").unwrap();
        assert!(config.version.is_nan());
    }

    #[test]
    fn test_schema_mismatch_is_reported() {
        let value = Value::Mapping(
            [("services".to_string(), Value::from("not a map"))]
                .into_iter()
                .collect(),
        );
        let err = Config::from_value(value).unwrap_err();
        assert!(err.to_string().contains("config schema"));
    }
}
