//! Rules for version 1 documents.
//!
//! Checks run in a fixed order (services, startup actions, requests,
//! endpoints) and stop at the first violation.

use std::collections::{BTreeMap, HashSet};

use crate::env::{resolve_field, Environment};
use crate::parser::{ActionEntry, Action, Config, Endpoint, ParamEntry, Request, Value};
use crate::registry::{is_supported_method, is_supported_protocol, is_supported_type, DEFAULT_PROTOCOL};

use super::error::ValidationError;

/// Total every weighted response set has to add up to.
const TOTAL_WEIGHT: i64 = 100;

const MAX_PORT: i64 = 65535;

/// Validate a config against the version 1 schema.
pub fn validate(config: &mut Config, env: &dyn Environment) -> Result<(), ValidationError> {
    let service_names = validate_services(config, env)?;

    if !config.startup_actions.is_empty() {
        validate_actions(&config.startup_actions, &service_names, &config.requests)
            .map_err(|err| ValidationError::StartupActions(Box::new(err)))?;
    }

    for (name, request) in config.requests.iter_mut() {
        validate_request(name, request)?;
    }

    if config.endpoints.is_empty() {
        return Err(ValidationError::NoEndpoints);
    }
    for (url, methods) in &config.endpoints {
        for (method, endpoint) in methods {
            validate_endpoint(url, method, endpoint, &service_names, &config.requests)?;
        }
    }

    Ok(())
}

/// Resolve hostnames in place and collect the names later actions may target.
fn validate_services(
    config: &mut Config,
    env: &dyn Environment,
) -> Result<HashSet<String>, ValidationError> {
    let mut names = HashSet::with_capacity(config.services.len());

    for (name, service) in config.services.iter_mut() {
        if !service.hostname.is_empty() {
            service.hostname = resolve_field(&service.hostname, env)?;
        }

        if service.hostname.is_empty() || !(1..=MAX_PORT).contains(&service.port) {
            return Err(ValidationError::InvalidService(name.clone()));
        }
        names.insert(name.clone());
    }

    Ok(names)
}

/// Validate an `actions` list: every entry kind must be supported and every
/// reference must name a declared service or request.
pub fn validate_actions(
    actions: &[ActionEntry],
    service_names: &HashSet<String>,
    requests: &BTreeMap<String, Request>,
) -> Result<(), ValidationError> {
    for entry in actions {
        for (kind, payload) in entry {
            Action::from_entry(
                kind,
                payload,
                |target| service_names.contains(target),
                |id| requests.contains_key(id),
            )?;
        }
    }
    Ok(())
}

fn validate_parameters(params: &BTreeMap<String, ParamEntry>) -> Result<(), ValidationError> {
    for (field, entry) in params {
        if !is_supported_type(&entry.param_type) {
            return Err(ValidationError::UnsupportedParamType {
                field: field.clone(),
                field_type: entry.param_type.clone(),
            });
        }
    }
    Ok(())
}

/// Validate one named request, filling in the default protocol.
pub fn validate_request(name: &str, request: &mut Request) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyRequestName);
    }

    if request.url.is_empty() {
        return Err(ValidationError::EmptyRequestUrl(name.to_string()));
    }

    if !is_supported_method(&request.method) {
        return Err(ValidationError::UnsupportedMethod {
            request: name.to_string(),
            method: request.method.clone(),
        });
    }

    match request.protocol.as_deref() {
        None | Some("") => request.protocol = Some(DEFAULT_PROTOCOL.to_string()),
        Some(protocol) if !is_supported_protocol(protocol) => {
            return Err(ValidationError::UnsupportedProtocol {
                request: name.to_string(),
                protocol: protocol.to_string(),
            });
        }
        Some(_) => {}
    }

    if let Some(expected) = &request.expected_response {
        if expected.status_code == 0 {
            return Err(ValidationError::InvalidStatusCode(name.to_string()));
        }

        // Only types written as plain strings are checked.
        for (field, field_type) in &expected.body {
            if let Value::String(field_type) = field_type {
                if !is_supported_type(field_type) {
                    return Err(ValidationError::InvalidExpectedType {
                        request: name.to_string(),
                        field: field.clone(),
                        field_type: field_type.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Validate the endpoint served at `url` for `method`.
pub fn validate_endpoint(
    url: &str,
    method: &str,
    endpoint: &Endpoint,
    service_names: &HashSet<String>,
    requests: &BTreeMap<String, Request>,
) -> Result<(), ValidationError> {
    if let Some(params) = &endpoint.params {
        if !params.path.is_empty() {
            validate_parameters(&params.path).map_err(|err| ValidationError::PathParam {
                url: url.to_string(),
                method: method.to_string(),
                source: Box::new(err),
            })?;
        }
        if !params.query.is_empty() {
            validate_parameters(&params.query).map_err(|err| ValidationError::QueryParam {
                url: url.to_string(),
                method: method.to_string(),
                source: Box::new(err),
            })?;
        }
    }

    if let Some(recieves) = &endpoint.recieves {
        for (field, field_type) in &recieves.body {
            if !is_supported_type(field_type) {
                return Err(ValidationError::UnsupportedBodyType {
                    url: url.to_string(),
                    method: method.to_string(),
                    field: field.clone(),
                    field_type: field_type.clone(),
                });
            }
        }
    }

    match (&endpoint.responses, endpoint.response) {
        (None, 0) => {
            return Err(ValidationError::ResponseNotSet {
                url: url.to_string(),
                method: method.to_string(),
            });
        }
        (Some(_), code) if code != 0 => {
            return Err(ValidationError::AmbiguousResponse {
                url: url.to_string(),
                method: method.to_string(),
            });
        }
        _ => {}
    }

    if let Some(responses) = &endpoint.responses {
        let mut total = 0i64;
        for response in responses {
            total = total.checked_add(response.weight).ok_or_else(|| {
                ValidationError::ResponseWeightOverflow {
                    url: url.to_string(),
                    method: method.to_string(),
                }
            })?;

            if !response.actions.is_empty() {
                validate_actions(&response.actions, service_names, requests).map_err(|err| {
                    ValidationError::ResponseAction {
                        url: url.to_string(),
                        method: method.to_string(),
                        source: Box::new(err),
                    }
                })?;
            }
        }
        if total != TOTAL_WEIGHT {
            return Err(ValidationError::ResponseWeighting {
                url: url.to_string(),
                method: method.to_string(),
                total,
            });
        }
    }

    if !endpoint.actions.is_empty() {
        validate_actions(&endpoint.actions, service_names, requests).map_err(|err| {
            ValidationError::EndpointAction {
                url: url.to_string(),
                method: method.to_string(),
                source: Box::new(err),
            }
        })?;
    }

    Ok(())
}
