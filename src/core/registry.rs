//! Type registry mapping type names to their registered descriptors
//!
//! The registry is populated once at process start and read-only afterwards,
//! so it is shared behind `Arc` without locking.

use crate::core::descriptor::TypeDescriptor;
use crate::core::error::{LinkwalkResult, RegistryError};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of all entity types known to the resolver
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type descriptor.
    ///
    /// Fails with [`RegistryError::DuplicateType`] when the name is already
    /// taken and [`RegistryError::InvalidTypeName`] when it is blank.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> LinkwalkResult<()> {
        let type_name = descriptor.type_name().to_string();
        if type_name.trim().is_empty() {
            return Err(RegistryError::InvalidTypeName { type_name }.into());
        }
        if self.types.contains_key(&type_name) {
            return Err(RegistryError::DuplicateType { type_name }.into());
        }
        self.types.insert(type_name, Arc::new(descriptor));
        Ok(())
    }

    /// Look up a descriptor by type name
    pub fn lookup(&self, type_name: &str) -> LinkwalkResult<Arc<TypeDescriptor>> {
        self.types.get(type_name).cloned().ok_or_else(|| {
            RegistryError::UnknownType {
                type_name: type_name.to_string(),
            }
            .into()
        })
    }

    /// Whether a type name is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// All registered type names
    pub fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LinkwalkError;
    use crate::core::identity::Identity;
    use serde_json::Value;

    fn descriptor(name: &str) -> TypeDescriptor {
        TypeDescriptor::new(name, |_: &Identity| None, |d: &Value| d.clone())
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = TypeRegistry::new();
        assert!(registry.type_names().is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register(descriptor("user")).unwrap();

        let found = registry.lookup("user").unwrap();
        assert_eq!(found.type_name(), "user");
        assert!(registry.contains("user"));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = TypeRegistry::new();
        registry.register(descriptor("user")).unwrap();

        let err = registry.register(descriptor("user")).unwrap_err();
        assert!(matches!(
            err,
            LinkwalkError::Registry(RegistryError::DuplicateType { .. })
        ));
    }

    #[test]
    fn test_register_blank_name_fails() {
        let mut registry = TypeRegistry::new();
        let err = registry.register(descriptor("  ")).unwrap_err();
        assert!(matches!(
            err,
            LinkwalkError::Registry(RegistryError::InvalidTypeName { .. })
        ));
    }

    #[test]
    fn test_lookup_unknown_fails() {
        let registry = TypeRegistry::new();
        let err = registry.lookup("ghost").unwrap_err();
        assert!(matches!(
            err,
            LinkwalkError::Registry(RegistryError::UnknownType { .. })
        ));
        assert_eq!(err.error_code(), "UNKNOWN_TYPE");
    }

    #[test]
    fn test_register_multiple_types() {
        let mut registry = TypeRegistry::new();
        registry.register(descriptor("user")).unwrap();
        registry.register(descriptor("post")).unwrap();
        registry.register(descriptor("comment")).unwrap();
        assert_eq!(registry.type_names().len(), 3);
    }
}
