//! Canonicalizes decoder output into a string-keyed [`Value`] tree.
//!
//! YAML allows any node as a mapping key. Only string keys can be valid
//! configuration, so entries keyed by anything else are dropped here instead
//! of failing; a dropped field surfaces later as a missing-field error.

use std::collections::BTreeMap;

use super::value::Value;

/// Normalize a generic YAML tree.
pub fn normalize(raw: &serde_yaml::Value) -> Value {
    match raw {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(items) => Value::Sequence(items.iter().map(normalize).collect()),
        serde_yaml::Value::Mapping(mapping) => {
            let mut out = BTreeMap::new();
            for (key, value) in mapping {
                if let serde_yaml::Value::String(key) = key {
                    out.insert(key.clone(), normalize(value));
                }
            }
            Value::Mapping(out)
        }
        serde_yaml::Value::Tagged(tagged) => normalize(&tagged.value),
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Mapping(
                object.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<&Value> for serde_yaml::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(*b),
            Value::Integer(i) => serde_yaml::Value::Number((*i).into()),
            Value::Float(x) => serde_yaml::Value::Number((*x).into()),
            Value::String(s) => serde_yaml::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_yaml::Value::Sequence(items.iter().map(serde_yaml::Value::from).collect())
            }
            Value::Mapping(mapping) => {
                let mut out = serde_yaml::Mapping::new();
                for (k, v) in mapping {
                    out.insert(serde_yaml::Value::String(k.clone()), v.into());
                }
                serde_yaml::Value::Mapping(out)
            }
        }
    }
}
