//! Core module containing fundamental types for the resolver

pub mod descriptor;
pub mod error;
pub mod identity;
pub mod registry;

pub use descriptor::{DeferredLink, LinkMap, LinkTarget, LinkValue, TypeDescriptor};
pub use error::{CodecError, ConfigError, LinkwalkError, LinkwalkResult, RegistryError};
pub use identity::Identity;
pub use registry::TypeRegistry;
