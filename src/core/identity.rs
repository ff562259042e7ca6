//! Entity identity extraction
//!
//! Every node the resolver walks is identified by a `(type name, identity)`
//! pair. The identity is a small closed variant rather than an arbitrary
//! value: a non-negative integer, a string, or a synthetic key/value pair for
//! map-shaped data that carries no identity field of its own.

use serde_json::Value;
use std::fmt;

/// Identity of a single entity instance
///
/// Extracted from entity data via [`Identity::of`]. Integer identities are
/// the common case and the only kind the id codec obfuscates; string
/// identities (slugs, external ids) pass through rendering unchanged; pair
/// identities exist for deduplication of id-less map data only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// A non-negative integer id
    Int(u64),

    /// A string id (slug, external identifier)
    Str(String),

    /// Synthetic identity for map data with no `id` field: the first
    /// key/value pair, with the value canonicalized to its JSON text
    Pair(String, String),
}

impl Identity {
    /// Extract the identity of a piece of entity data.
    ///
    /// Accepted shapes, in order:
    /// - an object with an `"id"` key holding a non-negative integer or a
    ///   string (an `id` key holding anything else means no identity)
    /// - a non-empty object without an `"id"` key: its first key/value pair
    ///   becomes a synthetic [`Identity::Pair`]
    /// - a bare non-negative integer or a bare string is its own identity
    ///
    /// Everything else (null, booleans, floats, negative numbers, arrays,
    /// empty objects) has no identity.
    pub fn of(data: &Value) -> Option<Identity> {
        match data {
            Value::Number(n) => n.as_u64().map(Identity::Int),
            Value::String(s) => Some(Identity::Str(s.clone())),
            Value::Object(map) => {
                if let Some(id) = map.get("id") {
                    return match id {
                        Value::Number(n) => n.as_u64().map(Identity::Int),
                        Value::String(s) => Some(Identity::Str(s.clone())),
                        _ => None,
                    };
                }
                map.iter().next().map(|(key, value)| {
                    let text = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    Identity::Pair(key.clone(), text)
                })
            }
            _ => None,
        }
    }

    /// The raw integer behind this identity, when there is one
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Identity::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Int(n) => write!(f, "{}", n),
            Identity::Str(s) => write!(f, "{}", s),
            Identity::Pair(key, value) => write!(f, "{}={}", key, value),
        }
    }
}

impl From<u64> for Identity {
    fn from(id: u64) -> Self {
        Identity::Int(id)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Identity::Str(id.to_string())
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Identity::Str(id)
    }
}
