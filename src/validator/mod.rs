pub mod error;
pub mod v1;

use crate::env::{Environment, SystemEnvironment};
use crate::parser::Config;
pub use error::ValidationError;

/// Validate a config against the system environment.
pub fn validate_config(config: &mut Config) -> Result<(), ValidationError> {
    validate_config_with(config, &SystemEnvironment)
}

/// Validate a config, resolving hostname placeholders through `env`.
///
/// Service hostnames are replaced by their resolved value and requests
/// without a protocol get the default one, so a config must not be
/// validated from two places at once.
pub fn validate_config_with(config: &mut Config, env: &dyn Environment) -> Result<(), ValidationError> {
    match config.version {
        v if v == 1.0 => v1::validate(config, env),
        other => Err(ValidationError::UnsupportedVersion(other)),
    }
}
