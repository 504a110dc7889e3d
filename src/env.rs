//! Environment lookups consulted while resolving service hostnames.

use regex::Regex;
use std::collections::HashMap;
use std::io;
use std::sync::LazyLock;

use crate::validator::error::ValidationError;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Variable that falls back to the machine hostname when unset.
const HOSTNAME_VAR: &str = "HOSTNAME";

/// The external lookups a validation run depends on.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
    fn hostname(&self) -> io::Result<String>;
}

/// Reads the process environment and the OS hostname.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn hostname(&self) -> io::Result<String> {
        hostname::get()?
            .into_string()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "hostname is not valid UTF-8"))
    }
}

/// In-memory environment with a fixed hostname result.
#[derive(Debug, Default, Clone)]
pub struct FixedEnvironment {
    vars: HashMap<String, String>,
    hostname: Option<String>,
}

impl FixedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = Some(hostname.to_string());
        self
    }
}

impl Environment for FixedEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn hostname(&self) -> io::Result<String> {
        self.hostname
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no hostname configured"))
    }
}

/// Substitute every `${NAME}` placeholder in `field`.
///
/// A missing or empty variable is an error, except `HOSTNAME`, which falls
/// back to the machine hostname.
pub fn resolve_field(field: &str, env: &dyn Environment) -> Result<String, ValidationError> {
    let mut resolved = String::with_capacity(field.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(field) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        resolved.push_str(&field[last..whole.start()]);
        resolved.push_str(&lookup(name.as_str(), field, env)?);
        last = whole.end();
    }
    resolved.push_str(&field[last..]);

    Ok(resolved)
}

fn lookup(name: &str, field: &str, env: &dyn Environment) -> Result<String, ValidationError> {
    match env.var(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ if name == HOSTNAME_VAR => {
            env.hostname()
                .map_err(|source| ValidationError::HostnameLookup {
                    field: field.to_string(),
                    source,
                })
        }
        _ => Err(ValidationError::MissingEnvVar {
            name: name.to_string(),
            field: field.to_string(),
        }),
    }
}
