//! Validation engine for simulated HTTP service configurations.
//!
//! A document is decoded (YAML or JSON), normalized into a string-keyed
//! [`parser::Value`] tree, modeled as a [`parser::Config`], and then checked
//! by the validator for its declared schema version.

pub mod client;
pub mod env;
pub mod logger;
pub mod parser;
pub mod registry;
pub mod validator;

pub use parser::Config;
pub use validator::{validate_config, validate_config_with, ValidationError};
