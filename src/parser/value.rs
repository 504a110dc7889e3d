use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A decoded document node. Mapping keys are always strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "array",
            Value::Mapping(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            other => match serde_json::to_string(other) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => write!(f, "<{}>", other.type_name()),
            },
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_distinguishes_integer_and_float() {
        let v: Value = serde_json::from_str(r#"{"a": 5, "b": 5.5, "c": null, "d": [true]}"#).unwrap();
        let m = v.as_mapping().unwrap();
        assert_eq!(m["a"], Value::Integer(5));
        assert_eq!(m["b"], Value::Float(5.5));
        assert!(m["c"].is_null());
        assert_eq!(m["d"], Value::Sequence(vec![Value::Bool(true)]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Integer(3).to_string(), "3");
        assert_eq!(Value::Sequence(vec![Value::Integer(1)]).to_string(), "[1]");
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Float(1.0).type_name(), "float");
        assert_eq!(Value::Mapping(BTreeMap::new()).type_name(), "object");
        assert_eq!(Value::default().type_name(), "null");
    }
}
