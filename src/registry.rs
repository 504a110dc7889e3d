//! Lookup tables for the closed sets a V1 document may reference.

/// Scalar and container types a parameter or body field may declare.
pub const SUPPORTED_TYPES: [&str; 6] = ["string", "integer", "float", "boolean", "array", "object"];

/// Action kinds that can be attached to startup or to an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Delay,
    Request,
}

impl ActionKind {
    /// Look up an action kind by the key it is written under.
    pub fn parse(name: &str) -> Option<ActionKind> {
        match name {
            "delay" => Some(ActionKind::Delay),
            "request" => Some(ActionKind::Request),
            _ => None,
        }
    }
}

/// HTTP methods a named request may use.
pub const SUPPORTED_METHODS: [&str; 4] = ["get", "post", "put", "delete"];

/// Protocols a named request may use.
pub const SUPPORTED_PROTOCOLS: [&str; 2] = ["http", "https"];

/// Protocol assigned to a request that does not declare one.
pub const DEFAULT_PROTOCOL: &str = "http";

/// Whether `name` is a type a parameter or body field may declare.
pub fn is_supported_type(name: &str) -> bool {
    SUPPORTED_TYPES.contains(&name)
}

/// Whether `name` is a known action kind.
pub fn is_supported_action(name: &str) -> bool {
    ActionKind::parse(name).is_some()
}

/// Whether `name` is an HTTP method a named request may use.
pub fn is_supported_method(name: &str) -> bool {
    SUPPORTED_METHODS.contains(&name)
}

/// Whether `name` is a protocol a named request may use.
pub fn is_supported_protocol(name: &str) -> bool {
    SUPPORTED_PROTOCOLS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_types() {
        for name in ["string", "integer", "float", "boolean", "array", "object"] {
            assert!(is_supported_type(name), "{} should be supported", name);
        }
        assert!(!is_supported_type("int"));
        assert!(!is_supported_type("String"));
        assert!(!is_supported_type(""));
    }

    #[test]
    fn test_supported_actions() {
        assert!(is_supported_action("delay"));
        assert!(is_supported_action("request"));
        assert!(!is_supported_action("sleep"));
        assert_eq!(ActionKind::parse("delay"), Some(ActionKind::Delay));
        assert_eq!(ActionKind::parse("request"), Some(ActionKind::Request));
        assert_eq!(ActionKind::parse("Delay"), None);
    }

    #[test]
    fn test_supported_methods_are_lowercase_only() {
        assert!(is_supported_method("get"));
        assert!(is_supported_method("delete"));
        assert!(!is_supported_method("GET"));
        assert!(!is_supported_method("patch"));
    }

    #[test]
    fn test_supported_protocols() {
        assert!(is_supported_protocol("http"));
        assert!(is_supported_protocol("https"));
        assert!(!is_supported_protocol("ftp"));
        assert!(is_supported_protocol(DEFAULT_PROTOCOL));
    }
}
