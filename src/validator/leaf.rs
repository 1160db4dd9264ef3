//! Text, link, and image-descriptor validators

use serde_json::Value;
use url::Url;

use super::fields::{self, Cardinality};
use super::{Outcome, Walk};
use crate::error::ErrorKind;
use crate::node::{ImageDescriptor, LinkNode, NodeKind, TextNode};

const TEXT_FIELDS: [&str; 7] = ["type", "text", "bold", "italic", "underline", "strikethrough", "code"];

pub(super) fn text(walk: &mut Walk<'_>, value: &Value) -> Outcome<TextNode> {
    walk.enter(NodeKind::Text)?;
    let map = fields::expect_tag(walk, value, NodeKind::Text, "text")?;

    // Empty string is valid text; only absence or a non-string is rejected.
    let text = match map.get("text") {
        Some(Value::String(s)) => s.clone(),
        Some(_) | None => {
            return Err(walk.field_error(
                ErrorKind::RequiredField,
                NodeKind::Text,
                "text",
                "text must be defined with at least an empty string",
            ))
        }
    };

    let node = TextNode {
        text,
        bold: fields::optional_bool(walk, map, NodeKind::Text, "bold")?,
        italic: fields::optional_bool(walk, map, NodeKind::Text, "italic")?,
        underline: fields::optional_bool(walk, map, NodeKind::Text, "underline")?,
        strikethrough: fields::optional_bool(walk, map, NodeKind::Text, "strikethrough")?,
        code: fields::optional_bool(walk, map, NodeKind::Text, "code")?,
        extra: fields::extra(map, &TEXT_FIELDS),
    };
    walk.leave();
    Ok(node)
}

pub(super) fn link(walk: &mut Walk<'_>, value: &Value) -> Outcome<LinkNode> {
    walk.enter(NodeKind::Link)?;
    let map = fields::expect_tag(walk, value, NodeKind::Link, "link")?;

    let url = fields::required_str(walk, map, NodeKind::Link, "url")?;
    if !is_absolute_url(url) {
        return Err(walk.field_error(
            ErrorKind::Format,
            NodeKind::Link,
            "url",
            format!("link url `{}` is not a valid absolute URL", url),
        ));
    }

    let items = fields::children(walk, map, NodeKind::Link, Cardinality::AtLeastOne("Text node"))?;
    let children = walk.each("children", items, text)?;

    let node = LinkNode {
        url: url.to_string(),
        children,
        extra: fields::extra(map, &["type", "url", "children"]),
    };
    walk.leave();
    Ok(node)
}

/// Scheme plus host; relative references and host-less URLs are rejected
pub(crate) fn is_absolute_url(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }
    match Url::parse(candidate) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

const IMAGE_FIELDS: [&str; 16] = [
    "name",
    "alternativeText",
    "url",
    "caption",
    "width",
    "height",
    "formats",
    "hash",
    "ext",
    "mime",
    "size",
    "previewUrl",
    "provider",
    "provider_metadata",
    "createdAt",
    "updatedAt",
];

/// Not a node: it does not count toward depth or node limits
pub(super) fn image_descriptor(walk: &mut Walk<'_>, value: &Value) -> Outcome<ImageDescriptor> {
    const KIND: NodeKind = NodeKind::ImageDescriptor;
    let Some(map) = value.as_object() else {
        return Err(walk.error(
            ErrorKind::RequiredField,
            KIND,
            format!("image must be an object, found {}", fields::type_name(value)),
        ));
    };

    Ok(ImageDescriptor {
        name: fields::required_str(walk, map, KIND, "name")?.to_string(),
        alternative_text: fields::nullable_str(walk, map, KIND, "alternativeText")?,
        url: fields::required_str(walk, map, KIND, "url")?.to_string(),
        caption: fields::nullable_str(walk, map, KIND, "caption")?,
        width: fields::required_number(walk, map, KIND, "width")?,
        height: fields::required_number(walk, map, KIND, "height")?,
        formats: fields::required_object(walk, map, KIND, "formats")?.clone(),
        hash: fields::required_str(walk, map, KIND, "hash")?.to_string(),
        ext: fields::required_str(walk, map, KIND, "ext")?.to_string(),
        mime: fields::required_str(walk, map, KIND, "mime")?.to_string(),
        size: fields::required_number(walk, map, KIND, "size")?,
        preview_url: fields::nullable_str(walk, map, KIND, "previewUrl")?,
        provider: fields::required_str(walk, map, KIND, "provider")?.to_string(),
        provider_metadata: fields::required_any(walk, map, KIND, "provider_metadata")?,
        created_at: fields::required_str(walk, map, KIND, "createdAt")?.to_string(),
        updated_at: fields::required_str(walk, map, KIND, "updatedAt")?.to_string(),
        extra: fields::extra(map, &IMAGE_FIELDS),
    })
}
