//! Link resolution: the graph traversal over declared relationships
//!
//! Given a root entity (by id or by already-fetched data), the resolver
//! walks every relationship declared through the registered link specs,
//! fetches and renders each reachable entity exactly once, and returns the
//! flattened, deduplicated list of [`LinkRecord`]s. The walk is depth-first
//! over the implicit graph whose nodes are `(type, identity)` pairs; the
//! per-call [`VisitedSet`] marks expanded nodes and guarantees termination
//! on cyclic graphs.
//!
//! Deferred link computations are never evaluated unless the caller's
//! whitelist names their type explicitly; eager links are always followed
//! unless the whitelist excludes them.

pub mod normalize;
pub mod visited;
pub mod whitelist;

pub use normalize::normalize;
pub use visited::VisitedSet;
pub use whitelist::Whitelist;

use crate::codec::IdCodec;
use crate::core::descriptor::{LinkMap, LinkTarget, LinkValue, TypeDescriptor};
use crate::core::error::LinkwalkResult;
use crate::core::identity::Identity;
use crate::core::registry::TypeRegistry;
use crate::render::{LinkRecord, Renderer};
use serde_json::Value;
use std::sync::Arc;

/// Root ids accepted by [`LinkResolver::resolve_by_id`]
///
/// Mirrors the shapes a caller can hand in: nothing, one id, or a list of
/// ids. `From` conversions cover the common cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootIds {
    /// No root: resolution yields nothing
    None,

    /// A single root id
    One(Identity),

    /// Several roots, resolved independently from the same starting point
    Many(Vec<Identity>),
}

impl From<u64> for RootIds {
    fn from(id: u64) -> Self {
        RootIds::One(Identity::Int(id))
    }
}

impl From<&str> for RootIds {
    fn from(id: &str) -> Self {
        RootIds::One(Identity::Str(id.to_string()))
    }
}

impl From<Identity> for RootIds {
    fn from(id: Identity) -> Self {
        RootIds::One(id)
    }
}

impl From<Vec<u64>> for RootIds {
    fn from(ids: Vec<u64>) -> Self {
        RootIds::Many(ids.into_iter().map(Identity::Int).collect())
    }
}

impl From<Vec<Identity>> for RootIds {
    fn from(ids: Vec<Identity>) -> Self {
        RootIds::Many(ids)
    }
}

impl<T: Into<RootIds>> From<Option<T>> for RootIds {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => RootIds::None,
        }
    }
}

/// The link-resolution engine
///
/// Holds the shared registry and codec; each top-level call constructs its
/// own visited set, so independent calls may run on parallel threads.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    registry: Arc<TypeRegistry>,
    renderer: Renderer,
}

impl LinkResolver {
    /// Create a resolver over a registry and codec
    pub fn new(registry: Arc<TypeRegistry>, codec: Arc<IdCodec>) -> Self {
        Self {
            registry,
            renderer: Renderer::new(codec),
        }
    }

    /// Resolve the entities linked from one or more roots given by id.
    ///
    /// The root entity itself is not part of the output; only the entities
    /// reachable through its declared links are. A root that cannot be
    /// fetched contributes nothing.
    pub fn resolve_by_id(
        &self,
        type_name: &str,
        ids: impl Into<RootIds>,
        whitelist: &Whitelist,
    ) -> LinkwalkResult<Vec<LinkRecord>> {
        let descriptor = self.registry.lookup(type_name)?;
        let mut visited = VisitedSet::new();
        let records = self.resolve_ids(&descriptor, ids.into(), &mut visited, whitelist)?;
        Ok(normalize(records, whitelist))
    }

    /// Resolve the entities linked from root data already in hand.
    ///
    /// `Null` and non-object values resolve to nothing; an array resolves
    /// each element independently.
    pub fn resolve_by_data(
        &self,
        type_name: &str,
        data: &Value,
        whitelist: &Whitelist,
    ) -> LinkwalkResult<Vec<LinkRecord>> {
        let descriptor = self.registry.lookup(type_name)?;
        let mut visited = VisitedSet::new();
        let records = self.resolve_data(&descriptor, data, &mut visited, whitelist)?;
        Ok(normalize(records, whitelist))
    }

    fn resolve_ids(
        &self,
        descriptor: &TypeDescriptor,
        ids: RootIds,
        visited: &mut VisitedSet,
        whitelist: &Whitelist,
    ) -> LinkwalkResult<Vec<LinkRecord>> {
        match ids {
            RootIds::None => Ok(Vec::new()),
            RootIds::One(id) => self.resolve_id(descriptor, &id, visited, whitelist),
            RootIds::Many(ids) => {
                let mut records = Vec::new();
                for id in ids {
                    // Siblings start from the snapshot passed in, not from
                    // each other's discoveries; cross-sibling duplicates are
                    // removed by normalization.
                    let mut branch = visited.clone();
                    records.extend(self.resolve_id(descriptor, &id, &mut branch, whitelist)?);
                }
                Ok(normalize(records, whitelist))
            }
        }
    }

    fn resolve_id(
        &self,
        descriptor: &TypeDescriptor,
        id: &Identity,
        visited: &mut VisitedSet,
        whitelist: &Whitelist,
    ) -> LinkwalkResult<Vec<LinkRecord>> {
        if visited.contains(descriptor.type_name(), id) {
            tracing::trace!(
                entity_type = %descriptor.type_name(),
                id = %id,
                "root already expanded, skipping"
            );
            return Ok(Vec::new());
        }

        match descriptor.fetch(id) {
            None => {
                tracing::debug!(
                    entity_type = %descriptor.type_name(),
                    id = %id,
                    "root entity not found"
                );
                Ok(Vec::new())
            }
            Some(data) => {
                let records = self.resolve_data(descriptor, &data, visited, whitelist)?;
                Ok(normalize(records, whitelist))
            }
        }
    }

    fn resolve_data(
        &self,
        descriptor: &TypeDescriptor,
        data: &Value,
        visited: &mut VisitedSet,
        whitelist: &Whitelist,
    ) -> LinkwalkResult<Vec<LinkRecord>> {
        match data {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => {
                let mut records = Vec::new();
                for item in items {
                    let mut branch = visited.clone();
                    records.extend(self.resolve_data(descriptor, item, &mut branch, whitelist)?);
                }
                Ok(normalize(records, whitelist))
            }
            Value::Object(_) => self.resolve_record(descriptor, data, visited, whitelist),
            other => {
                tracing::trace!(
                    entity_type = %descriptor.type_name(),
                    kind = %json_kind(other),
                    "non-record root, nothing to resolve"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Expand one record: mark it visited, then follow its declared links.
    fn resolve_record(
        &self,
        descriptor: &TypeDescriptor,
        data: &Value,
        visited: &mut VisitedSet,
        whitelist: &Whitelist,
    ) -> LinkwalkResult<Vec<LinkRecord>> {
        let Some(identity) = Identity::of(data) else {
            tracing::debug!(
                entity_type = %descriptor.type_name(),
                "record has no extractable identity, skipping"
            );
            return Ok(Vec::new());
        };

        if !visited.insert(descriptor.type_name(), &identity) {
            tracing::trace!(
                entity_type = %descriptor.type_name(),
                id = %identity,
                "record already expanded, skipping"
            );
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for (linked_name, target) in filter_links(descriptor.links_for(data), whitelist) {
            let linked = self.registry.lookup(&linked_name)?;
            for value in target.into_values() {
                // The same mutated visited set flows forward, so later
                // siblings see earlier ones as visited.
                records.extend(self.resolve_link_value(&linked, value, visited, whitelist)?);
            }
        }
        Ok(normalize(records, whitelist))
    }

    /// Resolve one id-or-entity link unit into its record plus everything
    /// reachable from it.
    fn resolve_link_value(
        &self,
        linked: &TypeDescriptor,
        value: LinkValue,
        visited: &mut VisitedSet,
        whitelist: &Whitelist,
    ) -> LinkwalkResult<Vec<LinkRecord>> {
        match value {
            LinkValue::Id(id) => {
                if visited.contains(linked.type_name(), &id) {
                    tracing::trace!(
                        entity_type = %linked.type_name(),
                        id = %id,
                        "linked entity already rendered, dropping reference"
                    );
                    return Ok(Vec::new());
                }
                match linked.fetch(&id) {
                    None => {
                        tracing::debug!(
                            entity_type = %linked.type_name(),
                            id = %id,
                            "linked entity not found"
                        );
                        Ok(Vec::new())
                    }
                    Some(entity) => self.render_and_expand(linked, &entity, visited, whitelist),
                }
            }
            LinkValue::Entity(entity) => {
                let Some(id) = Identity::of(&entity) else {
                    tracing::debug!(
                        entity_type = %linked.type_name(),
                        "linked entity has no extractable identity, skipping"
                    );
                    return Ok(Vec::new());
                };
                if visited.contains(linked.type_name(), &id) {
                    return Ok(Vec::new());
                }
                // Entity data is already in hand; no redundant fetch.
                self.render_and_expand(linked, &entity, visited, whitelist)
            }
        }
    }

    fn render_and_expand(
        &self,
        linked: &TypeDescriptor,
        entity: &Value,
        visited: &mut VisitedSet,
        whitelist: &Whitelist,
    ) -> LinkwalkResult<Vec<LinkRecord>> {
        let mut records = Vec::new();
        if let Some(record) = self.renderer.render_record(linked, entity) {
            records.push(record);
        }
        records.extend(self.resolve_record(linked, entity, visited, whitelist)?);
        Ok(records)
    }
}

/// Apply the whitelist policy to a link map.
///
/// | whitelist | behavior |
/// |---|---|
/// | `All` | keep eager targets only; deferred computations are dropped unevaluated |
/// | `Only([])` | drop everything, evaluate nothing |
/// | `Only(types)` | keep entries whose type is listed; evaluate kept deferred targets now |
fn filter_links(links: LinkMap, whitelist: &Whitelist) -> Vec<(String, LinkTarget)> {
    match whitelist {
        Whitelist::All => links
            .into_entries()
            .filter(|(linked_name, target)| {
                if target.is_deferred() {
                    tracing::debug!(
                        entity_type = %linked_name,
                        "deferred link dropped: type not explicitly whitelisted"
                    );
                    false
                } else {
                    true
                }
            })
            .collect(),
        Whitelist::Only(types) if types.is_empty() => Vec::new(),
        Whitelist::Only(_) => links
            .into_entries()
            .filter(|(linked_name, _)| whitelist.allows(linked_name))
            .filter_map(|(linked_name, target)| {
                target.force().map(|concrete| (linked_name, concrete))
            })
            .collect(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
