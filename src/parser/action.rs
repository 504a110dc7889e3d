use serde::Serialize;

use super::{ActionEntry, Value};
use crate::registry::ActionKind;
use crate::validator::error::ValidationError;

/// A side effect attached to startup, an endpoint, or a weighted response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Pause for the given duration.
    Delay(i64),
    /// Send the named request to the named service.
    Request { target: String, id: String },
}

impl Action {
    /// Build a typed action from one `kind: payload` pair of an action entry.
    ///
    /// `is_service` and `is_request` decide whether a `request` action's
    /// `target` and `id` name declared entities; a reference that is not a
    /// string is never declared.
    pub fn from_entry(
        kind: &str,
        payload: &Value,
        is_service: impl Fn(&str) -> bool,
        is_request: impl Fn(&str) -> bool,
    ) -> Result<Action, ValidationError> {
        let Some(action_kind) = ActionKind::parse(kind) else {
            return Err(ValidationError::ActionNotSupported(kind.to_string()));
        };

        match action_kind {
            ActionKind::Delay => match payload.as_i64() {
                Some(duration) => Ok(Action::Delay(duration)),
                None => Err(ValidationError::InvalidDelay(payload.to_string())),
            },
            ActionKind::Request => {
                let fields = payload
                    .as_mapping()
                    .ok_or(ValidationError::InvalidRequestAction)?;

                let target = fields
                    .get("target")
                    .ok_or(ValidationError::MissingActionTarget)?;
                let target = match target.as_str() {
                    Some(name) if is_service(name) => name,
                    _ => return Err(ValidationError::UndefinedActionService(target.to_string())),
                };

                let id = fields
                    .get("id")
                    .ok_or(ValidationError::MissingActionRequestId)?;
                let id = match id.as_str() {
                    Some(name) if is_request(name) => name,
                    _ => return Err(ValidationError::UndefinedActionRequest(id.to_string())),
                };

                Ok(Action::Request {
                    target: target.to_string(),
                    id: id.to_string(),
                })
            }
        }
    }

    /// Typed actions of an entry list that has already passed validation.
    pub fn from_entries(entries: &[ActionEntry]) -> Result<Vec<Action>, ValidationError> {
        entries
            .iter()
            .flat_map(|entry| entry.iter())
            .map(|(kind, payload)| Action::from_entry(kind, payload, |_| true, |_| true))
            .collect()
    }
}
