//! Blocks Content Validator
//!
//! Recursive-descent structural check of a blocks document against the
//! closed node grammar:
//!
//! ```text
//! document   { version: semver, blocks: [block] }
//! block      paragraph | heading | quote | code | list | image
//! paragraph  { children: [inline]+ }
//! heading    { level: 1..=6, children: [inline]+ }
//! quote      { children: [inline]+ }
//! code       { syntax?: string | null, children: [text]+ }
//! list       { format: ordered | unordered, children: [list-item]+ }
//! list-item  { children: [inline]* }
//! image      { image: image-descriptor, children: [inline]* }
//! inline     text | link
//! link       { url: absolute url, children: [text]+ }
//! ```
//!
//! Validation is fail-fast: the first violation aborts the walk and is
//! returned with the path to the offending value.

mod block;
mod document;
mod fields;
mod inline;
mod leaf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, ValidationError};
use crate::node::{BlockNode, Document, ImageDescriptor, InlineNode, LinkNode, NodeKind, TextNode};
use crate::path::{NodePath, PathSegment};

pub(crate) type Outcome<T> = std::result::Result<T, ValidationError>;

/// Bounds on how much untrusted input a single call may walk.
///
/// A value of 0 disables the corresponding check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Deepest node nesting allowed; top-level blocks are depth 1
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Total nodes allowed across one document
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
}

fn default_max_depth() -> usize {
    16
}

fn default_max_nodes() -> usize {
    100_000
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
        }
    }
}

impl ValidationLimits {
    /// No depth or node-count checks
    pub fn unbounded() -> Self {
        Self {
            max_depth: 0,
            max_nodes: 0,
        }
    }
}

/// Validates candidate JSON values against the blocks grammar.
///
/// Holds only immutable limits, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct BlocksValidator {
    limits: ValidationLimits,
}

impl BlocksValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate a full document envelope
    pub fn validate_document(&self, candidate: &Value) -> Outcome<Document> {
        let mut walk = Walk::new(&self.limits);
        let outcome = document::document(&mut walk, candidate);
        match &outcome {
            Ok(doc) => tracing::debug!(
                version = %doc.version,
                blocks = doc.blocks.len(),
                nodes = walk.nodes,
                "blocks document accepted"
            ),
            Err(err) => tracing::debug!(
                kind = %err.kind,
                path = %err.path,
                "blocks document rejected: {}",
                err.message
            ),
        }
        outcome
    }

    /// Validate a bare array of block nodes, as stored on a content entry
    pub fn validate_blocks(&self, candidate: &Value) -> Outcome<Vec<BlockNode>> {
        let mut walk = Walk::new(&self.limits);
        let outcome = document::bare_blocks(&mut walk, candidate);
        match &outcome {
            Ok(blocks) => tracing::debug!(blocks = blocks.len(), nodes = walk.nodes, "block array accepted"),
            Err(err) => tracing::debug!(
                kind = %err.kind,
                path = %err.path,
                "block array rejected: {}",
                err.message
            ),
        }
        outcome
    }

    /// Validate one block node through the block dispatcher
    pub fn validate_block(&self, candidate: &Value) -> Outcome<BlockNode> {
        block::block(&mut Walk::new(&self.limits), candidate)
    }

    /// Validate one inline node through the inline dispatcher
    pub fn validate_inline(&self, candidate: &Value) -> Outcome<InlineNode> {
        inline::inline(&mut Walk::new(&self.limits), candidate)
    }

    pub fn validate_text(&self, candidate: &Value) -> Outcome<TextNode> {
        leaf::text(&mut Walk::new(&self.limits), candidate)
    }

    pub fn validate_link(&self, candidate: &Value) -> Outcome<LinkNode> {
        leaf::link(&mut Walk::new(&self.limits), candidate)
    }

    pub fn validate_image_descriptor(&self, candidate: &Value) -> Outcome<ImageDescriptor> {
        leaf::image_descriptor(&mut Walk::new(&self.limits), candidate)
    }

    /// Parse JSON text and validate it as a document
    pub fn parse_document(&self, json: &str) -> crate::Result<Document> {
        let candidate: Value = serde_json::from_str(json)?;
        Ok(self.validate_document(&candidate)?)
    }

    /// Parse JSON text and validate it as a bare block array
    pub fn parse_blocks(&self, json: &str) -> crate::Result<Vec<BlockNode>> {
        let candidate: Value = serde_json::from_str(json)?;
        Ok(self.validate_blocks(&candidate)?)
    }
}

/// Validate a document with default limits
pub fn validate_document(candidate: &Value) -> Outcome<Document> {
    BlocksValidator::new().validate_document(candidate)
}

/// Validate a bare block array with default limits
pub fn validate_blocks(candidate: &Value) -> Outcome<Vec<BlockNode>> {
    BlocksValidator::new().validate_blocks(candidate)
}

/// State threaded through one validation call
pub(crate) struct Walk<'l> {
    limits: &'l ValidationLimits,
    path: NodePath,
    depth: usize,
    nodes: usize,
}

impl<'l> Walk<'l> {
    fn new(limits: &'l ValidationLimits) -> Self {
        Self {
            limits,
            path: NodePath::root(),
            depth: 0,
            nodes: 0,
        }
    }

    /// Error located at the current path
    pub(crate) fn error(&self, kind: ErrorKind, node: NodeKind, message: impl Into<String>) -> ValidationError {
        ValidationError::new(kind, node, self.path.clone(), message)
    }

    /// Error located at `field` of the current node
    pub(crate) fn field_error(
        &self,
        kind: ErrorKind,
        node: NodeKind,
        field: &'static str,
        message: impl Into<String>,
    ) -> ValidationError {
        ValidationError::new(kind, node, self.path.key(field), message).with_field(field)
    }

    /// Count a node and descend one level
    pub(crate) fn enter(&mut self, node: NodeKind) -> Outcome<()> {
        self.depth += 1;
        self.nodes += 1;
        if self.limits.max_depth > 0 && self.depth > self.limits.max_depth {
            return Err(self.error(
                ErrorKind::Limit,
                node,
                format!("nesting depth exceeds the maximum of {}", self.limits.max_depth),
            ));
        }
        if self.limits.max_nodes > 0 && self.nodes > self.limits.max_nodes {
            return Err(self.error(
                ErrorKind::Limit,
                node,
                format!("document exceeds the maximum of {} nodes", self.limits.max_nodes),
            ));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Run `f` with the path extended by `key`
    pub(crate) fn at_key<T>(&mut self, key: &'static str, f: impl FnOnce(&mut Self) -> Outcome<T>) -> Outcome<T> {
        self.path.push(PathSegment::Key(key));
        let outcome = f(self);
        self.path.pop();
        outcome
    }

    /// Run `f` with the path extended by `index`
    pub(crate) fn at_index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> Outcome<T>) -> Outcome<T> {
        self.path.push(PathSegment::Index(index));
        let outcome = f(self);
        self.path.pop();
        outcome
    }

    /// Validate every element of `items` under `key`, in order, stopping at
    /// the first failure
    pub(crate) fn each<T>(
        &mut self,
        key: &'static str,
        items: &[Value],
        mut f: impl FnMut(&mut Self, &Value) -> Outcome<T>,
    ) -> Outcome<Vec<T>> {
        self.at_key(key, |walk| {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(walk.at_index(i, |walk| f(walk, item))?);
            }
            Ok(out)
        })
    }
}
