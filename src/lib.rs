//! Blocks Content Validator
//!
//! Structural validation for rich-text "blocks" documents before they are
//! persisted. A blocks document is a JSON tree of block nodes (paragraphs,
//! headings, quotes, code blocks, lists, images) whose children are inline
//! text runs and links.
//!
//! ## Features
//!
//! - **Closed grammar**: node kinds are matched exhaustively; unknown
//!   `type` values are rejected at both the block and inline level
//! - **Fail-fast errors**: the first violation is reported with its kind
//!   and a path such as `blocks[2].children[0].url`
//! - **Lossless output**: accepted documents come back as typed values that
//!   serialize to the same JSON, unknown keys included
//! - **Bounded work**: configurable depth and node-count limits for
//!   untrusted input
//! - **Grammar export**: the same grammar as a draft-07 JSON Schema bundle
//!
//! ## Example
//!
//! ```
//! use blocks_validator::{validate_document, BlockNode};
//! use serde_json::json;
//!
//! let doc = validate_document(&json!({
//!     "version": "1.0.0",
//!     "blocks": [
//!         { "type": "heading", "level": 1, "children": [{ "type": "text", "text": "Hello" }] }
//!     ]
//! }))
//! .unwrap();
//!
//! assert!(matches!(doc.blocks[0], BlockNode::Heading(_)));
//! ```

pub mod config;
pub mod error;
pub mod grammar;
pub mod node;
pub mod path;
pub mod validator;
pub mod version;

pub use config::ValidatorConfig;
pub use error::{BlocksError, ErrorKind, Result, ValidationError};
pub use grammar::{GrammarSchema, SchemaId, SchemaRegistry};
pub use node::{
    BlockKind, BlockNode, CodeNode, Document, HeadingNode, ImageDescriptor, ImageNode, InlineKind, InlineNode,
    LinkNode, ListFormat, ListItemNode, ListNode, NodeKind, ParagraphNode, QuoteNode, TextNode,
};
pub use path::{NodePath, PathSegment};
pub use validator::{validate_blocks, validate_document, BlocksValidator, ValidationLimits};
