//! # Linkwalk
//!
//! An entity link-resolution engine for Rust: declare, per entity type, how
//! to fetch, render, and link, then resolve everything reachable from a root
//! entity in one call.
//!
//! ## Features
//!
//! - **Transitive Resolution**: Walks declared relationships depth-first and
//!   renders every reachable entity exactly once
//! - **Cycle Safe**: A per-call visited set guarantees termination on cyclic
//!   link graphs
//! - **Type Whitelist**: Callers restrict which linked types appear; absent
//!   means everything, empty means nothing
//! - **Lazy Links**: Deferred relationship computations run only when their
//!   type is explicitly whitelisted
//! - **Opaque Ids**: Reversible, type-bound id obfuscation — a token minted
//!   for one type fails to decode as another
//! - **Storage Agnostic**: Entities are plain JSON values behind
//!   user-supplied callbacks; bring your own data layer
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linkwalk::prelude::*;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(TypeDescriptor::new(
//!     "user",
//!     |id| users.get(id).cloned(),
//!     |user| json!({"name": user["name"]}),
//! ))?;
//! registry.register(
//!     TypeDescriptor::new(
//!         "post",
//!         |id| posts.get(id).cloned(),
//!         |post| json!({"title": post["title"]}),
//!     )
//!     .with_link_spec(|post| {
//!         LinkMap::new()
//!             .link("user", post["user_id"].as_u64())
//!             .link("comment", LinkTarget::deferred(move || {
//!                 comments_of(post_id).into()
//!             }))
//!     }),
//! )?;
//!
//! let codec = IdCodec::new(CodecConfig {
//!     salt: "production-salt".into(),
//!     min_length: 8,
//! })?;
//! let resolver = LinkResolver::new(Arc::new(registry), Arc::new(codec));
//!
//! // Everything reachable from post 1001, eager links only
//! let records = resolver.resolve_by_id("post", 1001, &Whitelist::All)?;
//!
//! // Restrict to comments; their deferred computation runs now
//! let whitelist = Whitelist::from_include_param(Some("comment"), &registry)?;
//! let records = resolver.resolve_by_id("post", 1001, &whitelist)?;
//! ```

pub mod codec;
pub mod config;
pub mod core;
pub mod render;
pub mod resolver;

/// Re-exports of commonly used types
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        descriptor::{DeferredLink, LinkMap, LinkTarget, LinkValue, TypeDescriptor},
        error::{CodecError, ConfigError, LinkwalkError, LinkwalkResult, RegistryError},
        identity::Identity,
        registry::TypeRegistry,
    };

    // === Codec ===
    pub use crate::codec::{CodecConfig, IdCodec};

    // === Resolver ===
    pub use crate::resolver::{
        normalize::normalize, visited::VisitedSet, whitelist::Whitelist, LinkResolver, RootIds,
    };

    // === Render ===
    pub use crate::render::{LinkRecord, Renderer};

    // === Config ===
    pub use crate::config::LinkwalkConfig;

    // === External dependencies ===
    pub use serde_json::{json, Value};
}
