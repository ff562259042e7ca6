//! Type descriptors: the registered fetch/render/link behavior of one
//! entity type
//!
//! A [`TypeDescriptor`] bundles the three user-supplied callbacks the
//! resolver needs — fetch-by-id, render, and the link specification. Entities
//! are plain `serde_json::Value` objects so the framework stays completely
//! decoupled from concrete domain types.

use crate::core::identity::Identity;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Fetch callback: load an entity by id, `None` when absent
pub type FetchFn = Arc<dyn Fn(&Identity) -> Option<Value> + Send + Sync>;

/// Render callback: project an entity into its output fields
pub type RenderFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Link-spec callback: declare the outgoing links of an entity
pub type LinkSpecFn = Arc<dyn Fn(&Value) -> LinkMap + Send + Sync>;

/// Registered behavior for one entity type
///
/// Immutable after registration; shared behind `Arc` by the registry.
#[derive(Clone)]
pub struct TypeDescriptor {
    type_name: String,
    fetch_by_id: FetchFn,
    render: RenderFn,
    link_spec: Option<LinkSpecFn>,
}

impl TypeDescriptor {
    /// Create a descriptor with fetch and render callbacks and no outgoing
    /// links
    pub fn new<F, R>(type_name: impl Into<String>, fetch_by_id: F, render: R) -> Self
    where
        F: Fn(&Identity) -> Option<Value> + Send + Sync + 'static,
        R: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            fetch_by_id: Arc::new(fetch_by_id),
            render: Arc::new(render),
            link_spec: None,
        }
    }

    /// Attach a link specification declaring this type's outgoing links
    pub fn with_link_spec<L>(mut self, link_spec: L) -> Self
    where
        L: Fn(&Value) -> LinkMap + Send + Sync + 'static,
    {
        self.link_spec = Some(Arc::new(link_spec));
        self
    }

    /// The registered type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Fetch an entity by id
    pub fn fetch(&self, id: &Identity) -> Option<Value> {
        (self.fetch_by_id)(id)
    }

    /// Render an entity's output fields
    pub fn render(&self, data: &Value) -> Value {
        (self.render)(data)
    }

    /// The outgoing links of an entity (empty when no link spec is attached)
    pub fn links_for(&self, data: &Value) -> LinkMap {
        match &self.link_spec {
            Some(spec) => spec(data),
            None => LinkMap::new(),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("has_link_spec", &self.link_spec.is_some())
            .finish()
    }
}

// =============================================================================
// Link targets
// =============================================================================

/// A deferred link computation
///
/// Wraps a zero-argument closure that is only invoked when the linked type is
/// explicitly whitelisted. The closure is consumed on evaluation, so it runs
/// at most once per link map.
pub struct DeferredLink(Box<dyn FnOnce() -> LinkTarget + Send>);

impl DeferredLink {
    /// Evaluate the deferred computation
    pub fn call(self) -> LinkTarget {
        (self.0)()
    }
}

impl fmt::Debug for DeferredLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredLink(<thunk>)")
    }
}

/// The value side of one link-map entry
///
/// A link may point at one id, many ids, one already-fetched entity, many
/// entities, or a deferred computation producing any of those.
#[derive(Debug)]
pub enum LinkTarget {
    /// A single linked id
    Id(Identity),

    /// A list of linked ids
    Ids(Vec<Identity>),

    /// A single already-fetched linked entity
    Entity(Value),

    /// A list of already-fetched linked entities
    Entities(Vec<Value>),

    /// A computation producing one of the above, run only when its type is
    /// explicitly whitelisted
    Deferred(DeferredLink),
}

/// One id-or-entity unit of a link target
#[derive(Debug)]
pub enum LinkValue {
    /// A linked id that still needs fetching
    Id(Identity),

    /// A linked entity already in hand
    Entity(Value),
}

impl LinkTarget {
    /// Wrap a deferred computation
    pub fn deferred<F>(thunk: F) -> Self
    where
        F: FnOnce() -> LinkTarget + Send + 'static,
    {
        LinkTarget::Deferred(DeferredLink(Box::new(thunk)))
    }

    /// Whether this target is a deferred computation
    pub fn is_deferred(&self) -> bool {
        matches!(self, LinkTarget::Deferred(_))
    }

    /// Evaluate a deferred target; concrete targets pass through.
    ///
    /// A thunk is expected to produce a concrete target. One that yields
    /// another deferred value is dropped (`None`).
    pub fn force(self) -> Option<LinkTarget> {
        match self {
            LinkTarget::Deferred(thunk) => match thunk.call() {
                LinkTarget::Deferred(_) => None,
                concrete => Some(concrete),
            },
            concrete => Some(concrete),
        }
    }

    /// Flatten this target into its id-or-entity units.
    ///
    /// A deferred target yields nothing; it must be [`force`](Self::force)d
    /// first.
    pub fn into_values(self) -> Vec<LinkValue> {
        match self {
            LinkTarget::Id(id) => vec![LinkValue::Id(id)],
            LinkTarget::Ids(ids) => ids.into_iter().map(LinkValue::Id).collect(),
            LinkTarget::Entity(data) => vec![LinkValue::Entity(data)],
            LinkTarget::Entities(list) => list.into_iter().map(LinkValue::Entity).collect(),
            LinkTarget::Deferred(_) => Vec::new(),
        }
    }
}

impl From<Identity> for LinkTarget {
    fn from(id: Identity) -> Self {
        LinkTarget::Id(id)
    }
}

impl From<u64> for LinkTarget {
    fn from(id: u64) -> Self {
        LinkTarget::Id(Identity::Int(id))
    }
}

impl From<&str> for LinkTarget {
    fn from(id: &str) -> Self {
        LinkTarget::Id(Identity::Str(id.to_string()))
    }
}

impl From<String> for LinkTarget {
    fn from(id: String) -> Self {
        LinkTarget::Id(Identity::Str(id))
    }
}

impl From<Vec<u64>> for LinkTarget {
    fn from(ids: Vec<u64>) -> Self {
        LinkTarget::Ids(ids.into_iter().map(Identity::Int).collect())
    }
}

impl From<Vec<Identity>> for LinkTarget {
    fn from(ids: Vec<Identity>) -> Self {
        LinkTarget::Ids(ids)
    }
}

impl From<Value> for LinkTarget {
    fn from(data: Value) -> Self {
        LinkTarget::Entity(data)
    }
}

impl From<Vec<Value>> for LinkTarget {
    fn from(list: Vec<Value>) -> Self {
        LinkTarget::Entities(list)
    }
}

/// A nullable foreign key: `None` links to nothing
impl<T: Into<LinkTarget>> From<Option<T>> for LinkTarget {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => LinkTarget::Ids(Vec::new()),
        }
    }
}

// =============================================================================
// Link maps
// =============================================================================

/// Declared outgoing links of one entity: linked type name → target
///
/// Insertion order is preserved; it determines output order of the resolved
/// records. Linked types are referenced by name and resolved through the
/// registry at traversal time.
#[derive(Debug, Default)]
pub struct LinkMap {
    entries: IndexMap<String, LinkTarget>,
}

impl LinkMap {
    /// Create an empty link map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link entry, builder style
    pub fn link(mut self, type_name: impl Into<String>, target: impl Into<LinkTarget>) -> Self {
        self.entries.insert(type_name.into(), target.into());
        self
    }

    /// Add a link entry in place
    pub fn insert(&mut self, type_name: impl Into<String>, target: impl Into<LinkTarget>) {
        self.entries.insert(type_name.into(), target.into());
    }

    /// Number of link entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the map in insertion order
    pub fn into_entries(self) -> impl Iterator<Item = (String, LinkTarget)> {
        self.entries.into_iter()
    }
}
