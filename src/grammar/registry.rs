//! Schema Registry
//!
//! Identifier-keyed cache of derived schema definitions. Insertion is two
//! phase: an id is first reserved with a placeholder, its definition is
//! built, then the placeholder is replaced. A definition that refers back to
//! an id still being built receives a `$ref` instead of recursing, which is
//! what lets self-referential node graphs terminate.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{BlocksError, Result};

/// Identifier of a definition inside the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(String);

impl SchemaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JSON pointer used to reference this definition from a bundle
    pub fn pointer(&self) -> String {
        format!("#/definitions/{}", self.0)
    }

    /// `{"$ref": "#/definitions/<id>"}`
    pub fn reference(&self) -> Value {
        json!({ "$ref": self.pointer() })
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone)]
enum Slot {
    /// Reserved, definition under construction
    Pending,
    Ready(Value),
}

/// Per-owner cache of schema definitions.
///
/// There is no global instance; whoever builds schemas owns the registry.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    slots: BTreeMap<SchemaId, Slot>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: &SchemaId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn is_pending(&self, id: &SchemaId) -> bool {
        matches!(self.slots.get(id), Some(Slot::Pending))
    }

    /// Finished definition for `id`, if any
    pub fn get(&self, id: &SchemaId) -> Option<&Value> {
        match self.slots.get(id) {
            Some(Slot::Ready(schema)) => Some(schema),
            _ => None,
        }
    }

    /// All ids, ready or pending, in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &SchemaId> {
        self.slots.keys()
    }

    /// Insert a placeholder for `id`. Returns false if `id` is already known.
    pub fn reserve(&mut self, id: SchemaId) -> bool {
        if self.slots.contains_key(&id) {
            return false;
        }
        tracing::trace!(id = %id, "reserving schema slot");
        self.slots.insert(id, Slot::Pending);
        true
    }

    /// Swap the placeholder for `id` with its finished definition
    pub fn replace(&mut self, id: &SchemaId, schema: Value) -> Result<()> {
        let slot = self
            .slots
            .get_mut(id)
            .ok_or_else(|| BlocksError::UnknownSchema(id.to_string()))?;
        if matches!(slot, Slot::Ready(_)) {
            return Err(BlocksError::SchemaAlreadyDefined(id.to_string()));
        }
        tracing::trace!(id = %id, "schema slot ready");
        *slot = Slot::Ready(schema);
        Ok(())
    }

    /// Reference to `id`, building its definition with `build` on first use.
    ///
    /// `build` receives the registry so it can resolve the ids it depends on;
    /// a dependency on an id that is still pending yields a plain reference.
    pub fn resolve<F>(&mut self, id: impl Into<SchemaId>, build: F) -> Result<Value>
    where
        F: FnOnce(&mut Self) -> Result<Value>,
    {
        let id = id.into();
        if self.reserve(id.clone()) {
            let schema = build(self)?;
            self.replace(&id, schema)?;
        }
        Ok(id.reference())
    }

    /// Every definition, keyed by id. Fails if any slot is still pending.
    pub fn definitions(&self) -> Result<Map<String, Value>> {
        self.slots
            .iter()
            .map(|(id, slot)| match slot {
                Slot::Ready(schema) => Ok((id.to_string(), schema.clone())),
                Slot::Pending => Err(BlocksError::PendingSchema(id.to_string())),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builds_once() {
        let mut registry = SchemaRegistry::new();
        let mut builds = 0;

        let first = registry
            .resolve("text", |_| {
                builds += 1;
                Ok(json!({ "type": "object" }))
            })
            .unwrap();
        let second = registry
            .resolve("text", |_| {
                builds += 1;
                Ok(json!({ "type": "string" }))
            })
            .unwrap();

        assert_eq!(builds, 1);
        assert_eq!(first, json!({ "$ref": "#/definitions/text" }));
        assert_eq!(first, second);
        assert_eq!(registry.get(&"text".into()), Some(&json!({ "type": "object" })));
    }

    #[test]
    fn test_self_reference_terminates() {
        // tree := { children: [tree] }
        fn tree(registry: &mut SchemaRegistry) -> Result<Value> {
            registry.resolve("tree", |registry| {
                let child = tree(registry)?;
                Ok(json!({ "type": "object", "properties": { "children": { "type": "array", "items": child } } }))
            })
        }

        let mut registry = SchemaRegistry::new();
        let reference = tree(&mut registry).unwrap();

        assert_eq!(reference, json!({ "$ref": "#/definitions/tree" }));
        let defs = registry.definitions().unwrap();
        assert_eq!(
            defs["tree"]["properties"]["children"]["items"],
            json!({ "$ref": "#/definitions/tree" })
        );
    }

    #[test]
    fn test_mutual_reference() {
        fn a(registry: &mut SchemaRegistry) -> Result<Value> {
            registry.resolve("a", |r| Ok(json!({ "items": b(r)? })))
        }
        fn b(registry: &mut SchemaRegistry) -> Result<Value> {
            registry.resolve("b", |r| Ok(json!({ "items": a(r)? })))
        }

        let mut registry = SchemaRegistry::new();
        a(&mut registry).unwrap();
        let defs = registry.definitions().unwrap();
        assert_eq!(defs["a"]["items"], json!({ "$ref": "#/definitions/b" }));
        assert_eq!(defs["b"]["items"], json!({ "$ref": "#/definitions/a" }));
    }

    #[test]
    fn test_pending_slots_block_export() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.reserve("half".into()));
        assert!(!registry.reserve("half".into()));
        assert!(registry.is_pending(&"half".into()));
        assert!(registry.get(&"half".into()).is_none());
        assert!(matches!(registry.definitions(), Err(BlocksError::PendingSchema(_))));

        registry.replace(&"half".into(), json!({})).unwrap();
        assert!(registry.definitions().is_ok());
    }

    #[test]
    fn test_replace_requires_placeholder() {
        let mut registry = SchemaRegistry::new();
        assert!(matches!(
            registry.replace(&"missing".into(), json!({})),
            Err(BlocksError::UnknownSchema(_))
        ));

        registry.reserve("done".into());
        registry.replace(&"done".into(), json!({})).unwrap();
        assert!(matches!(
            registry.replace(&"done".into(), json!({})),
            Err(BlocksError::SchemaAlreadyDefined(_))
        ));
    }
}
