//! Render pipeline: wrapping one entity into its output envelope
//!
//! A resolved entity is emitted as a `{type, id, data}` record. The `id` is
//! the codec-obfuscated form of the entity's integer identity; the `data`
//! payload comes from the type's registered render callback. Render
//! callbacks that expose foreign-key-shaped fields are expected to run those
//! through the codec themselves; the pipeline only encodes the record's own
//! id.

use crate::codec::IdCodec;
use crate::core::descriptor::TypeDescriptor;
use crate::core::identity::Identity;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// One resolved linked entity, ready for output
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinkRecord {
    /// The entity's type name
    #[serde(rename = "type")]
    pub entity_type: String,

    /// The obfuscated (or passthrough string) id
    pub id: String,

    /// The rendered output fields
    pub data: Value,

    /// The raw identity before obfuscation; deduplication key, not part of
    /// the serialized envelope
    #[serde(skip_serializing)]
    pub raw_identity: Identity,
}

/// Renders entities into [`LinkRecord`] envelopes
#[derive(Debug, Clone)]
pub struct Renderer {
    codec: Arc<IdCodec>,
}

impl Renderer {
    /// Create a renderer sharing the given codec
    pub fn new(codec: Arc<IdCodec>) -> Self {
        Self { codec }
    }

    /// Render one entity into its output record.
    ///
    /// Integer identities are obfuscated through the codec. String
    /// identities are already opaque and pass through as the output id.
    /// Entities with a synthetic pair identity (or none at all) produce no
    /// record.
    pub fn render_record(&self, descriptor: &TypeDescriptor, entity: &Value) -> Option<LinkRecord> {
        let identity = Identity::of(entity)?;

        let id = match &identity {
            Identity::Int(n) => self.codec.encode(descriptor.type_name(), *n),
            Identity::Str(s) => s.clone(),
            Identity::Pair(..) => {
                tracing::debug!(
                    entity_type = %descriptor.type_name(),
                    identity = %identity,
                    "entity has only a synthetic identity, no record emitted"
                );
                return None;
            }
        };

        Some(LinkRecord {
            entity_type: descriptor.type_name().to_string(),
            id,
            data: descriptor.render(entity),
            raw_identity: identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecConfig;
    use serde_json::json;

    fn renderer() -> Renderer {
        let codec = IdCodec::new(CodecConfig {
            salt: "render tests".to_string(),
            min_length: 6,
        })
        .unwrap();
        Renderer::new(Arc::new(codec))
    }

    fn user_descriptor() -> TypeDescriptor {
        TypeDescriptor::new(
            "user",
            |_: &Identity| None,
            |data: &Value| json!({"name": data["name"]}),
        )
    }

    #[test]
    fn test_integer_identity_is_obfuscated() {
        let renderer = renderer();
        let record = renderer
            .render_record(&user_descriptor(), &json!({"id": 1, "name": "Alice"}))
            .unwrap();

        assert_eq!(record.entity_type, "user");
        assert_eq!(record.raw_identity, Identity::Int(1));
        assert_ne!(record.id, "1");
        assert_eq!(record.data, json!({"name": "Alice"}));
    }

    #[test]
    fn test_obfuscation_round_trips() {
        let codec = Arc::new(
            IdCodec::new(CodecConfig {
                salt: "render tests".to_string(),
                min_length: 6,
            })
            .unwrap(),
        );
        let renderer = Renderer::new(codec.clone());
        let record = renderer
            .render_record(&user_descriptor(), &json!({"id": 77, "name": "Bob"}))
            .unwrap();

        assert_eq!(codec.decode("user", &record.id).unwrap(), 77);
    }

    #[test]
    fn test_string_identity_passes_through() {
        let renderer = renderer();
        let record = renderer
            .render_record(&user_descriptor(), &json!({"id": "alice", "name": "Alice"}))
            .unwrap();

        assert_eq!(record.id, "alice");
        assert_eq!(record.raw_identity, Identity::Str("alice".to_string()));
    }

    #[test]
    fn test_pair_identity_yields_no_record() {
        let renderer = renderer();
        assert!(renderer
            .render_record(&user_descriptor(), &json!({"slug": "x"}))
            .is_none());
    }

    #[test]
    fn test_missing_identity_yields_no_record() {
        let renderer = renderer();
        assert!(renderer
            .render_record(&user_descriptor(), &json!({}))
            .is_none());
        assert!(renderer
            .render_record(&user_descriptor(), &json!(null))
            .is_none());
    }

    #[test]
    fn test_record_serializes_without_raw_identity() {
        let renderer = renderer();
        let record = renderer
            .render_record(&user_descriptor(), &json!({"id": 3, "name": "Cleo"}))
            .unwrap();

        let serialized = serde_json::to_value(&record).unwrap();
        assert_eq!(serialized["type"], "user");
        assert!(serialized.get("raw_identity").is_none());
        assert!(serialized["id"].is_string());
        assert_eq!(serialized["data"], json!({"name": "Cleo"}));
    }
}
