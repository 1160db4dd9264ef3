//! Document envelope validator

use serde_json::Value;

use super::{block, fields, Outcome, Walk};
use crate::error::ErrorKind;
use crate::node::{BlockNode, Document, NodeKind};
use crate::version::{is_semver, SEMVER_PATTERN};

pub(super) fn document(walk: &mut Walk<'_>, value: &Value) -> Outcome<Document> {
    let Some(map) = value.as_object() else {
        return Err(walk.error(
            ErrorKind::Envelope,
            NodeKind::Document,
            format!(
                "document must be an object with `version` and `blocks`, found {}",
                fields::type_name(value)
            ),
        ));
    };

    let version = match map.get("version") {
        Some(Value::String(version)) if is_semver(version) => version.clone(),
        Some(Value::String(version)) => {
            return Err(walk.field_error(
                ErrorKind::Format,
                NodeKind::Document,
                "version",
                format!("version `{}` does not match the SemVer pattern {}", version, SEMVER_PATTERN),
            ))
        }
        Some(_) | None => {
            return Err(walk.field_error(
                ErrorKind::Envelope,
                NodeKind::Document,
                "version",
                format!("version is required and must be a string matching {}", SEMVER_PATTERN),
            ))
        }
    };

    let Some(Value::Array(items)) = map.get("blocks") else {
        return Err(walk.field_error(
            ErrorKind::Envelope,
            NodeKind::Document,
            "blocks",
            "blocks is required and must be an array of block nodes",
        ));
    };

    Ok(Document {
        version,
        blocks: walk.each("blocks", items, block::block)?,
        extra: fields::extra(map, &["version", "blocks"]),
    })
}

/// The blocks array alone, without an envelope
pub(super) fn bare_blocks(walk: &mut Walk<'_>, value: &Value) -> Outcome<Vec<BlockNode>> {
    let Some(items) = value.as_array() else {
        let err = walk.error(
            ErrorKind::Envelope,
            NodeKind::Document,
            format!("blocks must be an array of block nodes, found {}", fields::type_name(value)),
        );
        return Err(err.with_field("blocks"));
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(walk.at_index(i, |walk| block::block(walk, item))?);
    }
    Ok(out)
}
