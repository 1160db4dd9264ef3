//! Grammar Export
//!
//! Derives a draft-07 JSON Schema bundle describing the blocks grammar, for
//! editors and importers that want to check documents before submitting
//! them. [`crate::BlocksValidator`] stays authoritative: the URL rule is
//! only approximated here by `format: uri`.

pub mod registry;

pub use registry::{SchemaId, SchemaRegistry};

use serde_json::{json, Value};

use crate::error::Result;
use crate::version::SEMVER_PATTERN;

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// The grammar as a JSON Schema: a document root plus one definition per
/// node kind
#[derive(Debug, Clone)]
pub struct GrammarSchema {
    registry: SchemaRegistry,
    root: Value,
}

impl GrammarSchema {
    /// Derive every definition reachable from the document root
    pub fn build() -> Result<Self> {
        let mut registry = SchemaRegistry::new();
        let blocks = block(&mut registry)?;
        let root = json!({
            "type": "object",
            "required": ["version", "blocks"],
            "properties": {
                "version": { "type": "string", "pattern": SEMVER_PATTERN },
                "blocks": { "type": "array", "items": blocks }
            }
        });
        tracing::debug!(definitions = registry.len(), "derived blocks grammar schema");
        Ok(Self { registry, root })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Definition for a single node kind, e.g. `"heading"`
    pub fn definition(&self, id: &str) -> Option<&Value> {
        self.registry.get(&SchemaId::from(id))
    }

    /// Self-contained bundle validating a whole document
    pub fn document_schema(&self) -> Result<Value> {
        let mut bundle = json!({
            "$schema": DRAFT_07,
            "title": "Blocks document",
            "definitions": self.registry.definitions()?,
        });
        if let (Some(bundle), Some(root)) = (bundle.as_object_mut(), self.root.as_object()) {
            for (key, value) in root {
                bundle.insert(key.clone(), value.clone());
            }
        }
        Ok(bundle)
    }

    /// Bundle validating a bare array of blocks
    pub fn blocks_schema(&self) -> Result<Value> {
        Ok(json!({
            "$schema": DRAFT_07,
            "title": "Blocks",
            "type": "array",
            "items": SchemaId::from("block").reference(),
            "definitions": self.registry.definitions()?,
        }))
    }
}

fn tag(value: &str) -> Value {
    json!({ "const": value })
}

fn children(items: Value, min_items: Option<u64>) -> Value {
    let mut schema = json!({ "type": "array", "items": items });
    if let Some(min) = min_items {
        schema["minItems"] = json!(min);
    }
    schema
}

fn text(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("text", |_| {
        Ok(json!({
            "type": "object",
            "required": ["type", "text"],
            "properties": {
                "type": tag("text"),
                "text": { "type": "string" },
                "bold": { "type": "boolean" },
                "italic": { "type": "boolean" },
                "underline": { "type": "boolean" },
                "strikethrough": { "type": "boolean" },
                "code": { "type": "boolean" }
            }
        }))
    })
}

fn link(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("link", |registry| {
        let text_ref = text(registry)?;
        Ok(json!({
            "type": "object",
            "required": ["type", "url", "children"],
            "properties": {
                "type": tag("link"),
                "url": { "type": "string", "minLength": 1, "format": "uri" },
                "children": children(text_ref, Some(1))
            }
        }))
    })
}

fn inline(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("inline", |registry| {
        Ok(json!({ "oneOf": [text(registry)?, link(registry)?] }))
    })
}

/// Paragraph and quote share a shape
fn inline_container(registry: &mut SchemaRegistry, name: &'static str) -> Result<Value> {
    registry.resolve(name, |registry| {
        let inline_ref = inline(registry)?;
        Ok(json!({
            "type": "object",
            "required": ["type", "children"],
            "properties": {
                "type": tag(name),
                "children": children(inline_ref, Some(1))
            }
        }))
    })
}

fn heading(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("heading", |registry| {
        let inline_ref = inline(registry)?;
        Ok(json!({
            "type": "object",
            "required": ["type", "level", "children"],
            "properties": {
                "type": tag("heading"),
                "level": { "type": "integer", "minimum": 1, "maximum": 6 },
                "children": children(inline_ref, Some(1))
            }
        }))
    })
}

fn code(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("code", |registry| {
        let text_ref = text(registry)?;
        Ok(json!({
            "type": "object",
            "required": ["type", "children"],
            "properties": {
                "type": tag("code"),
                "syntax": { "type": ["string", "null"] },
                "children": children(text_ref, Some(1))
            }
        }))
    })
}

fn list_item(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("list-item", |registry| {
        let inline_ref = inline(registry)?;
        Ok(json!({
            "type": "object",
            "required": ["type", "children"],
            "properties": {
                "type": tag("list-item"),
                "children": children(inline_ref, None)
            }
        }))
    })
}

fn list(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("list", |registry| {
        let item_ref = list_item(registry)?;
        Ok(json!({
            "type": "object",
            "required": ["type", "format", "children"],
            "properties": {
                "type": tag("list"),
                "format": { "enum": ["ordered", "unordered"] },
                "children": children(item_ref, Some(1))
            }
        }))
    })
}

fn image_descriptor(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("image-descriptor", |_| {
        let string = json!({ "type": "string" });
        let nullable = json!({ "type": ["string", "null"] });
        let number = json!({ "type": "number" });
        Ok(json!({
            "type": "object",
            "required": [
                "name", "alternativeText", "url", "caption", "width", "height", "formats",
                "hash", "ext", "mime", "size", "previewUrl", "provider", "provider_metadata",
                "createdAt", "updatedAt"
            ],
            "properties": {
                "name": string,
                "alternativeText": nullable,
                "url": string,
                "caption": nullable,
                "width": number,
                "height": number,
                "formats": { "type": "object" },
                "hash": string,
                "ext": string,
                "mime": string,
                "size": number,
                "previewUrl": nullable,
                "provider": string,
                "provider_metadata": {},
                "createdAt": string,
                "updatedAt": string
            }
        }))
    })
}

fn image(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("image", |registry| {
        let descriptor_ref = image_descriptor(registry)?;
        let inline_ref = inline(registry)?;
        Ok(json!({
            "type": "object",
            "required": ["type", "image", "children"],
            "properties": {
                "type": tag("image"),
                "image": descriptor_ref,
                "children": children(inline_ref, None)
            }
        }))
    })
}

fn block(registry: &mut SchemaRegistry) -> Result<Value> {
    registry.resolve("block", |registry| {
        Ok(json!({
            "oneOf": [
                inline_container(registry, "paragraph")?,
                heading(registry)?,
                inline_container(registry, "quote")?,
                list(registry)?,
                image(registry)?,
                code(registry)?
            ]
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_node_kind_has_a_definition() {
        let grammar = GrammarSchema::build().unwrap();
        for id in [
            "text", "link", "inline", "paragraph", "heading", "quote", "code", "list", "list-item",
            "image", "image-descriptor", "block",
        ] {
            assert!(grammar.definition(id).is_some(), "missing definition for {}", id);
        }
        assert_eq!(grammar.registry().len(), 12);
    }

    #[test]
    fn test_definitions_share_references() {
        let grammar = GrammarSchema::build().unwrap();
        let code = grammar.definition("code").unwrap();
        assert_eq!(code["properties"]["children"]["items"], json!({ "$ref": "#/definitions/text" }));
        assert_eq!(code["properties"]["children"]["minItems"], 1);

        let item = grammar.definition("list-item").unwrap();
        assert!(item["properties"]["children"].get("minItems").is_none());
    }

    #[test]
    fn test_document_bundle_shape() {
        let bundle = GrammarSchema::build().unwrap().document_schema().unwrap();
        assert_eq!(bundle["$schema"], DRAFT_07);
        assert_eq!(bundle["required"], json!(["version", "blocks"]));
        assert_eq!(bundle["properties"]["version"]["pattern"], SEMVER_PATTERN);
        assert_eq!(bundle["properties"]["blocks"]["items"], json!({ "$ref": "#/definitions/block" }));
        assert_eq!(bundle["definitions"].as_object().unwrap().len(), 12);
    }
}
