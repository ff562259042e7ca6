//! Typed error handling for the linkwalk crate
//!
//! This module provides a typed error hierarchy that enables clients to
//! handle errors specifically rather than dealing with a single opaque
//! error type.
//!
//! # Error Categories
//!
//! - [`RegistryError`]: Errors related to type registration and lookup
//! - [`CodecError`]: Errors related to id encoding and decoding
//! - [`ConfigError`]: Errors related to configuration parsing
//!
//! # Example
//!
//! ```rust,ignore
//! use linkwalk::prelude::*;
//!
//! match codec.decode("user", &token) {
//!     Ok(id) => println!("raw id: {}", id),
//!     Err(LinkwalkError::Codec(CodecError::TypeMismatch { type_name, .. })) => {
//!         println!("token does not belong to '{}'", type_name);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use std::fmt;

/// The main error type for the linkwalk crate
///
/// Each variant contains a more specific error type for that category.
#[derive(Debug)]
pub enum LinkwalkError {
    /// Type registration and lookup errors
    Registry(RegistryError),

    /// Id codec errors
    Codec(CodecError),

    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for LinkwalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkwalkError::Registry(e) => write!(f, "{}", e),
            LinkwalkError::Codec(e) => write!(f, "{}", e),
            LinkwalkError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LinkwalkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkwalkError::Registry(e) => Some(e),
            LinkwalkError::Codec(e) => Some(e),
            LinkwalkError::Config(e) => Some(e),
        }
    }
}

impl LinkwalkError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LinkwalkError::Registry(e) => e.error_code(),
            LinkwalkError::Codec(e) => e.error_code(),
            LinkwalkError::Config(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors related to type registration and lookup
#[derive(Debug)]
pub enum RegistryError {
    /// A descriptor with this type name is already registered
    DuplicateType { type_name: String },

    /// No descriptor registered under this type name
    UnknownType { type_name: String },

    /// Type name is empty or blank
    InvalidTypeName { type_name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateType { type_name } => {
                write!(f, "Type '{}' is already registered", type_name)
            }
            RegistryError::UnknownType { type_name } => {
                write!(f, "Unknown entity type: {}", type_name)
            }
            RegistryError::InvalidTypeName { type_name } => {
                write!(f, "Invalid type name: '{}'", type_name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

impl RegistryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::DuplicateType { .. } => "DUPLICATE_TYPE",
            RegistryError::UnknownType { .. } => "UNKNOWN_TYPE",
            RegistryError::InvalidTypeName { .. } => "INVALID_TYPE_NAME",
        }
    }
}

impl From<RegistryError> for LinkwalkError {
    fn from(err: RegistryError) -> Self {
        LinkwalkError::Registry(err)
    }
}

// =============================================================================
// Codec Errors
// =============================================================================

/// Errors related to id encoding and decoding
#[derive(Debug)]
pub enum CodecError {
    /// The string does not decode at all
    Malformed { value: String },

    /// The string decodes, but its type fingerprint disagrees with the
    /// expected type
    TypeMismatch { type_name: String, value: String },

    /// The codec could not be built from the given configuration
    InvalidConfig { message: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Malformed { value } => {
                write!(f, "Malformed id token: '{}'", value)
            }
            CodecError::TypeMismatch { type_name, value } => {
                write!(
                    f,
                    "Id token '{}' does not belong to type '{}'",
                    value, type_name
                )
            }
            CodecError::InvalidConfig { message } => {
                write!(f, "Invalid codec configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for CodecError {}

impl CodecError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CodecError::Malformed { .. } => "MALFORMED_ID",
            CodecError::TypeMismatch { .. } => "ID_TYPE_MISMATCH",
            CodecError::InvalidConfig { .. } => "INVALID_CODEC_CONFIG",
        }
    }
}

impl From<CodecError> for LinkwalkError {
    fn from(err: CodecError) -> Self {
        LinkwalkError::Codec(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse a configuration document
    ParseError { message: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { message } => {
                write!(f, "Failed to parse config: {}", message)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }
}

impl From<ConfigError> for LinkwalkError {
    fn from(err: ConfigError) -> Self {
        LinkwalkError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for LinkwalkError {
    fn from(err: serde_yaml::Error) -> Self {
        LinkwalkError::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for LinkwalkError {
    fn from(err: std::io::Error) -> Self {
        LinkwalkError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for linkwalk operations
pub type LinkwalkResult<T> = Result<T, LinkwalkError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::UnknownType {
            type_name: "user".to_string(),
        };
        assert!(err.to_string().contains("user"));
        assert!(err.to_string().contains("Unknown"));
    }

    #[test]
    fn test_duplicate_type_error_code() {
        let err = RegistryError::DuplicateType {
            type_name: "post".to_string(),
        };
        assert_eq!(err.error_code(), "DUPLICATE_TYPE");
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::TypeMismatch {
            type_name: "post".to_string(),
            value: "aBc123".to_string(),
        };
        assert!(err.to_string().contains("post"));
        assert!(err.to_string().contains("aBc123"));
    }

    #[test]
    fn test_linkwalk_error_conversion() {
        let codec_err = CodecError::Malformed {
            value: "!!!".to_string(),
        };
        let err: LinkwalkError = codec_err.into();
        assert_eq!(err.error_code(), "MALFORMED_ID");
        assert!(matches!(err, LinkwalkError::Codec(_)));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err: LinkwalkError = RegistryError::InvalidTypeName {
            type_name: "".to_string(),
        }
        .into();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(": : :").unwrap_err();
        let err: LinkwalkError = yaml_err.into();
        assert!(matches!(
            err,
            LinkwalkError::Config(ConfigError::ParseError { .. })
        ));
    }
}
