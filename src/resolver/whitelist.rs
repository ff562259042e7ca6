//! Type whitelist for link resolution
//!
//! The whitelist is the caller's filter over which linked types appear in
//! the output. Three states are meaningful and must stay distinct: the
//! parameter was absent (include every reachable type), present but empty
//! (include nothing), or present with values (include only those types).

use crate::core::error::{LinkwalkResult, RegistryError};
use crate::core::registry::TypeRegistry;
use indexmap::IndexSet;

/// Caller-supplied filter over linked types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Whitelist {
    /// No filter was supplied: every reachable type is included, but
    /// deferred links are never evaluated
    #[default]
    All,

    /// Only the listed types are included; an empty list includes nothing
    Only(Vec<String>),
}

impl Whitelist {
    /// A whitelist of specific type names
    pub fn only<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Whitelist::Only(types.into_iter().map(Into::into).collect())
    }

    /// A whitelist that includes nothing
    pub fn none() -> Self {
        Whitelist::Only(Vec::new())
    }

    /// Whether records of this type pass the filter
    pub fn allows(&self, type_name: &str) -> bool {
        match self {
            Whitelist::All => true,
            Whitelist::Only(types) => types.iter().any(|t| t == type_name),
        }
    }

    /// Whether the filter excludes every type
    pub fn excludes_everything(&self) -> bool {
        matches!(self, Whitelist::Only(types) if types.is_empty())
    }

    /// Parse an include-list request parameter.
    ///
    /// `None` (parameter absent) means include everything. A present value
    /// is split on commas; tokens are trimmed, empty segments dropped, and
    /// duplicates removed while preserving first-occurrence order. A token
    /// that names no registered type fails with
    /// [`RegistryError::UnknownType`]. A present-but-empty parameter yields
    /// a whitelist that includes nothing.
    pub fn from_include_param(
        param: Option<&str>,
        registry: &TypeRegistry,
    ) -> LinkwalkResult<Self> {
        let Some(raw) = param else {
            return Ok(Whitelist::All);
        };

        let mut tokens: IndexSet<String> = IndexSet::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if !registry.contains(token) {
                return Err(RegistryError::UnknownType {
                    type_name: token.to_string(),
                }
                .into());
            }
            tokens.insert(token.to_string());
        }

        Ok(Whitelist::Only(tokens.into_iter().collect()))
    }
}
