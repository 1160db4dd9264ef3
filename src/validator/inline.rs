//! Inline node dispatcher

use serde_json::Value;

use super::fields::tag_of;
use super::{leaf, Outcome, Walk};
use crate::error::ErrorKind;
use crate::node::{InlineKind, InlineNode, NodeKind};

pub(crate) const INLINE_TYPE_MESSAGE: &str = "inline node must be Text or Link";

pub(super) fn inline(walk: &mut Walk<'_>, value: &Value) -> Outcome<InlineNode> {
    let Some(kind) = tag_of(value).and_then(InlineKind::parse) else {
        return Err(walk.error(ErrorKind::UnknownType, NodeKind::Inline, INLINE_TYPE_MESSAGE));
    };
    match kind {
        InlineKind::Text => leaf::text(walk, value).map(InlineNode::Text),
        InlineKind::Link => leaf::link(walk, value).map(InlineNode::Link),
    }
}
