//! Block node validators and the block dispatcher

use serde_json::Value;

use super::fields::{self, tag_of, Cardinality};
use super::{inline, leaf, Outcome, Walk};
use crate::error::ErrorKind;
use crate::node::{
    BlockKind, BlockNode, CodeNode, HeadingNode, ImageNode, ListFormat, ListItemNode, ListNode, NodeKind,
    ParagraphNode, QuoteNode,
};

pub(crate) const BLOCK_TYPE_MESSAGE: &str =
    "block node must be one of: paragraph, heading, quote, list, image, code";

const INLINE_CHILD: &str = "Text or Link node";

pub(super) fn block(walk: &mut Walk<'_>, value: &Value) -> Outcome<BlockNode> {
    let Some(kind) = tag_of(value).and_then(BlockKind::parse) else {
        return Err(walk.error(ErrorKind::UnknownType, NodeKind::Block, BLOCK_TYPE_MESSAGE));
    };
    match kind {
        BlockKind::Paragraph => paragraph(walk, value).map(BlockNode::Paragraph),
        BlockKind::Heading => heading(walk, value).map(BlockNode::Heading),
        BlockKind::Quote => quote(walk, value).map(BlockNode::Quote),
        BlockKind::Code => code(walk, value).map(BlockNode::Code),
        BlockKind::List => list(walk, value).map(BlockNode::List),
        BlockKind::Image => image(walk, value).map(BlockNode::Image),
    }
}

fn paragraph(walk: &mut Walk<'_>, value: &Value) -> Outcome<ParagraphNode> {
    walk.enter(NodeKind::Paragraph)?;
    let map = fields::expect_tag(walk, value, NodeKind::Paragraph, "paragraph")?;
    let items = fields::children(walk, map, NodeKind::Paragraph, Cardinality::AtLeastOne(INLINE_CHILD))?;
    let node = ParagraphNode {
        children: walk.each("children", items, inline::inline)?,
        extra: fields::extra(map, &["type", "children"]),
    };
    walk.leave();
    Ok(node)
}

fn heading(walk: &mut Walk<'_>, value: &Value) -> Outcome<HeadingNode> {
    walk.enter(NodeKind::Heading)?;
    let map = fields::expect_tag(walk, value, NodeKind::Heading, "heading")?;

    // Integral JSON numbers only: 2.0 parses as a float and is rejected.
    let level = map
        .get("level")
        .and_then(Value::as_u64)
        .filter(|level| (1..=6).contains(level))
        .ok_or_else(|| {
            walk.field_error(
                ErrorKind::RequiredField,
                NodeKind::Heading,
                "level",
                "heading level must be an integer between 1 and 6",
            )
        })?;

    let items = fields::children(walk, map, NodeKind::Heading, Cardinality::AtLeastOne(INLINE_CHILD))?;
    let node = HeadingNode {
        level: level as u8,
        children: walk.each("children", items, inline::inline)?,
        extra: fields::extra(map, &["type", "level", "children"]),
    };
    walk.leave();
    Ok(node)
}

fn quote(walk: &mut Walk<'_>, value: &Value) -> Outcome<QuoteNode> {
    walk.enter(NodeKind::Quote)?;
    let map = fields::expect_tag(walk, value, NodeKind::Quote, "quote")?;
    let items = fields::children(walk, map, NodeKind::Quote, Cardinality::AtLeastOne(INLINE_CHILD))?;
    let node = QuoteNode {
        children: walk.each("children", items, inline::inline)?,
        extra: fields::extra(map, &["type", "children"]),
    };
    walk.leave();
    Ok(node)
}

fn code(walk: &mut Walk<'_>, value: &Value) -> Outcome<CodeNode> {
    walk.enter(NodeKind::Code)?;
    let map = fields::expect_tag(walk, value, NodeKind::Code, "code")?;
    let syntax = fields::optional_nullable_str(walk, map, NodeKind::Code, "syntax")?;
    let items = fields::children(walk, map, NodeKind::Code, Cardinality::AtLeastOne("Text node"))?;
    let node = CodeNode {
        syntax,
        // Plain text only, links included in what is refused.
        children: walk.each("children", items, leaf::text)?,
        extra: fields::extra(map, &["type", "syntax", "children"]),
    };
    walk.leave();
    Ok(node)
}

fn list(walk: &mut Walk<'_>, value: &Value) -> Outcome<ListNode> {
    walk.enter(NodeKind::List)?;
    let map = fields::expect_tag(walk, value, NodeKind::List, "list")?;

    let format = map
        .get("format")
        .and_then(Value::as_str)
        .and_then(ListFormat::parse)
        .ok_or_else(|| {
            walk.field_error(
                ErrorKind::RequiredField,
                NodeKind::List,
                "format",
                "list format must be `ordered` or `unordered`",
            )
        })?;

    let items = fields::children(walk, map, NodeKind::List, Cardinality::AtLeastOne("ListItem node"))?;
    let node = ListNode {
        format,
        children: walk.each("children", items, list_item)?,
        extra: fields::extra(map, &["type", "format", "children"]),
    };
    walk.leave();
    Ok(node)
}

/// Unlike its siblings, a list item may have no children
fn list_item(walk: &mut Walk<'_>, value: &Value) -> Outcome<ListItemNode> {
    walk.enter(NodeKind::ListItem)?;
    let map = fields::expect_tag(walk, value, NodeKind::ListItem, "list-item")?;
    let items = fields::children(walk, map, NodeKind::ListItem, Cardinality::Any)?;
    let node = ListItemNode {
        children: walk.each("children", items, inline::inline)?,
        extra: fields::extra(map, &["type", "children"]),
    };
    walk.leave();
    Ok(node)
}

/// Void element: children are usually one empty text node, but none is
/// also accepted
fn image(walk: &mut Walk<'_>, value: &Value) -> Outcome<ImageNode> {
    walk.enter(NodeKind::Image)?;
    let map = fields::expect_tag(walk, value, NodeKind::Image, "image")?;

    let image = match map.get("image") {
        Some(descriptor) => walk.at_key("image", |walk| leaf::image_descriptor(walk, descriptor))?,
        None => {
            return Err(walk.field_error(
                ErrorKind::RequiredField,
                NodeKind::Image,
                "image",
                "image node field `image` is required and must be an object",
            ))
        }
    };

    let items = fields::children(walk, map, NodeKind::Image, Cardinality::Any)?;
    let node = ImageNode {
        image,
        children: walk.each("children", items, inline::inline)?,
        extra: fields::extra(map, &["type", "image", "children"]),
    };
    walk.leave();
    Ok(node)
}
