//! Configuration loading and management

use crate::codec::CodecConfig;
use crate::core::error::{LinkwalkResult, RegistryError};
use crate::core::registry::TypeRegistry;
use serde::{Deserialize, Serialize};

/// Complete configuration for the resolver
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinkwalkConfig {
    /// Codec settings (salt and minimum token length)
    #[serde(default)]
    pub codec: CodecConfig,

    /// Type names the application expects to be registered.
    ///
    /// Optional; when present, [`validate_registry`](Self::validate_registry)
    /// checks them against a built registry.
    #[serde(default)]
    pub types: Vec<String>,
}

impl LinkwalkConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> LinkwalkResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> LinkwalkResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Check that every expected type name is registered.
    ///
    /// An empty `types` list accepts any registry (permissive mode).
    pub fn validate_registry(&self, registry: &TypeRegistry) -> LinkwalkResult<()> {
        for type_name in &self.types {
            if !registry.contains(type_name) {
                return Err(RegistryError::UnknownType {
                    type_name: type_name.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self {
            codec: CodecConfig {
                salt: "linkwalk-dev".to_string(),
                min_length: 8,
            },
            types: vec![
                "user".to_string(),
                "post".to_string(),
                "comment".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::TypeDescriptor;
    use crate::core::error::LinkwalkError;
    use crate::core::identity::Identity;
    use serde_json::Value;

    #[test]
    fn test_default_config() {
        let config = LinkwalkConfig::default_config();
        assert_eq!(config.codec.min_length, 8);
        assert_eq!(config.types.len(), 3);
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
            codec:
                salt: production-salt
                min_length: 12
            types:
                - user
                - post
        "#;

        let config = LinkwalkConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.codec.salt, "production-salt");
        assert_eq!(config.codec.min_length, 12);
        assert_eq!(config.types, vec!["user", "post"]);
    }

    #[test]
    fn test_from_yaml_str_defaults() {
        let config = LinkwalkConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.codec.salt, "");
        assert_eq!(config.codec.min_length, 0);
        assert!(config.types.is_empty());
    }

    #[test]
    fn test_from_yaml_str_invalid() {
        assert!(LinkwalkConfig::from_yaml_str(": : :").is_err());
    }

    #[test]
    fn test_validate_registry() {
        let mut registry = TypeRegistry::new();
        registry
            .register(TypeDescriptor::new(
                "user",
                |_: &Identity| None,
                |d: &Value| d.clone(),
            ))
            .unwrap();

        let ok = LinkwalkConfig {
            codec: CodecConfig::default(),
            types: vec!["user".to_string()],
        };
        assert!(ok.validate_registry(&registry).is_ok());

        let missing = LinkwalkConfig {
            codec: CodecConfig::default(),
            types: vec!["user".to_string(), "invoice".to_string()],
        };
        let err = missing.validate_registry(&registry).unwrap_err();
        assert!(matches!(
            err,
            LinkwalkError::Registry(RegistryError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_empty_types_accepts_any_registry() {
        let registry = TypeRegistry::new();
        let config = LinkwalkConfig::default();
        assert!(config.validate_registry(&registry).is_ok());
    }
}
