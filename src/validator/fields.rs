//! Field-level checks shared by the node validators

use serde_json::{Map, Number, Value};

use super::{Outcome, Walk};
use crate::error::ErrorKind;
use crate::node::{Extra, NodeKind};

/// Human name of a JSON value's type, for messages
pub(super) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The node's `type` value, if it is an object with a string tag
pub(super) fn tag_of(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

/// Check that `value` is an object tagged exactly `tag`
pub(super) fn expect_tag<'v>(walk: &Walk<'_>, value: &'v Value, node: NodeKind, tag: &str) -> Outcome<&'v Map<String, Value>> {
    let Some(map) = value.as_object() else {
        return Err(walk.error(
            ErrorKind::UnknownType,
            node,
            format!("expected a `{}` node object, found {}", tag, type_name(value)),
        ));
    };
    match map.get("type") {
        Some(Value::String(found)) if found == tag => Ok(map),
        Some(Value::String(found)) => Err(walk.field_error(
            ErrorKind::UnknownType,
            node,
            "type",
            format!("expected node type `{}`, found `{}`", tag, found),
        )),
        Some(other) => Err(walk.field_error(
            ErrorKind::UnknownType,
            node,
            "type",
            format!("expected node type `{}`, found {}", tag, type_name(other)),
        )),
        None => Err(walk.field_error(
            ErrorKind::UnknownType,
            node,
            "type",
            format!("missing node type, expected `{}`", tag),
        )),
    }
}

fn missing(walk: &Walk<'_>, node: NodeKind, field: &'static str, expected: &str) -> crate::ValidationError {
    walk.field_error(
        ErrorKind::RequiredField,
        node,
        field,
        format!("{} field `{}` is required and must be {}", node, field, expected),
    )
}

fn wrong_type(walk: &Walk<'_>, node: NodeKind, field: &'static str, expected: &str, found: &Value) -> crate::ValidationError {
    walk.field_error(
        ErrorKind::RequiredField,
        node,
        field,
        format!("{} field `{}` must be {}, found {}", node, field, expected, type_name(found)),
    )
}

pub(super) fn required_str<'v>(
    walk: &Walk<'_>,
    map: &'v Map<String, Value>,
    node: NodeKind,
    field: &'static str,
) -> Outcome<&'v str> {
    match map.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(wrong_type(walk, node, field, "a string", other)),
        None => Err(missing(walk, node, field, "a string")),
    }
}

/// Present, and either null or a string
pub(super) fn nullable_str(
    walk: &Walk<'_>,
    map: &Map<String, Value>,
    node: NodeKind,
    field: &'static str,
) -> Outcome<Option<String>> {
    match map.get(field) {
        Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(walk, node, field, "a string or null", other)),
        None => Err(missing(walk, node, field, "a string or null")),
    }
}

/// Absent, explicit null, or a string
pub(super) fn optional_nullable_str(
    walk: &Walk<'_>,
    map: &Map<String, Value>,
    node: NodeKind,
    field: &'static str,
) -> Outcome<Option<Option<String>>> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(other) => Err(wrong_type(walk, node, field, "a string or null", other)),
    }
}

pub(super) fn optional_bool(
    walk: &Walk<'_>,
    map: &Map<String, Value>,
    node: NodeKind,
    field: &'static str,
) -> Outcome<Option<bool>> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(wrong_type(walk, node, field, "a boolean", other)),
    }
}

pub(super) fn required_number(
    walk: &Walk<'_>,
    map: &Map<String, Value>,
    node: NodeKind,
    field: &'static str,
) -> Outcome<Number> {
    match map.get(field) {
        Some(Value::Number(n)) => Ok(n.clone()),
        Some(other) => Err(wrong_type(walk, node, field, "a number", other)),
        None => Err(missing(walk, node, field, "a number")),
    }
}

pub(super) fn required_object<'v>(
    walk: &Walk<'_>,
    map: &'v Map<String, Value>,
    node: NodeKind,
    field: &'static str,
) -> Outcome<&'v Map<String, Value>> {
    match map.get(field) {
        Some(Value::Object(obj)) => Ok(obj),
        Some(other) => Err(wrong_type(walk, node, field, "an object", other)),
        None => Err(missing(walk, node, field, "an object")),
    }
}

/// Present with any value, null included
pub(super) fn required_any(
    walk: &Walk<'_>,
    map: &Map<String, Value>,
    node: NodeKind,
    field: &'static str,
) -> Outcome<Value> {
    map.get(field)
        .cloned()
        .ok_or_else(|| missing(walk, node, field, "present (null allowed)"))
}

/// How many children a node requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Cardinality {
    Any,
    /// At least one; the message names what the children should be
    AtLeastOne(&'static str),
}

/// The node's `children` array, checked for presence and cardinality
pub(super) fn children<'v>(
    walk: &Walk<'_>,
    map: &'v Map<String, Value>,
    node: NodeKind,
    cardinality: Cardinality,
) -> Outcome<&'v [Value]> {
    let items = match map.get("children") {
        Some(Value::Array(items)) => items,
        Some(other) => return Err(wrong_type(walk, node, "children", "an array", other)),
        None => return Err(missing(walk, node, "children", "an array")),
    };
    if let Cardinality::AtLeastOne(what) = cardinality {
        if items.is_empty() {
            return Err(walk.field_error(
                ErrorKind::Cardinality,
                node,
                "children",
                format!("{} node children must have at least one {}", node, what),
            ));
        }
    }
    Ok(items)
}

/// Copy of every key not in `known`. Tagged nodes list `type` themselves;
/// the envelope and image descriptor keep it as ordinary data.
pub(super) fn extra(map: &Map<String, Value>, known: &[&str]) -> Extra {
    map.iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
