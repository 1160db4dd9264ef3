//! Typed blocks document model
//!
//! Values of these types are only produced by [`crate::BlocksValidator`], so
//! holding one means the grammar has been checked. They serialize back to
//! JSON equal to the accepted input, unknown keys included.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Every node kind the grammar knows about, plus the two dispatch levels
/// and the envelope. Used to label validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Document,
    Block,
    Inline,
    Paragraph,
    Heading,
    Quote,
    Code,
    List,
    ListItem,
    Image,
    ImageDescriptor,
    Text,
    Link,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Block => "block",
            Self::Inline => "inline",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Quote => "quote",
            Self::Code => "code",
            Self::List => "list",
            Self::ListItem => "list-item",
            Self::Image => "image",
            Self::ImageDescriptor => "image-descriptor",
            Self::Text => "text",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminants accepted at the top level of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Quote,
    List,
    Image,
    Code,
}

impl BlockKind {
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Paragraph,
        BlockKind::Heading,
        BlockKind::Quote,
        BlockKind::List,
        BlockKind::Image,
        BlockKind::Code,
    ];

    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "paragraph" => Some(Self::Paragraph),
            "heading" => Some(Self::Heading),
            "quote" => Some(Self::Quote),
            "list" => Some(Self::List),
            "image" => Some(Self::Image),
            "code" => Some(Self::Code),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.node_kind().as_str()
    }

    pub fn node_kind(&self) -> NodeKind {
        match self {
            Self::Paragraph => NodeKind::Paragraph,
            Self::Heading => NodeKind::Heading,
            Self::Quote => NodeKind::Quote,
            Self::List => NodeKind::List,
            Self::Image => NodeKind::Image,
            Self::Code => NodeKind::Code,
        }
    }
}

/// Discriminants accepted inside block children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Text,
    Link,
}

impl InlineKind {
    pub const ALL: [InlineKind; 2] = [InlineKind::Text, InlineKind::Link];

    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(Self::Text),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Link => "link",
        }
    }
}

/// Keys the grammar does not name, kept as-is
pub type Extra = Map<String, Value>;

/// The envelope: a format version and the ordered block sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub version: String,
    pub blocks: Vec<BlockNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Document {
    /// Parsed form of `version`.
    ///
    /// `version` already matched the SemVer grammar during validation, so this
    /// only fails on documents assembled by hand.
    pub fn semver(&self) -> crate::Result<semver::Version> {
        Ok(crate::version::parse(&self.version)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockNode {
    Paragraph(ParagraphNode),
    Heading(HeadingNode),
    Quote(QuoteNode),
    Code(CodeNode),
    List(ListNode),
    Image(ImageNode),
}

impl BlockNode {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Paragraph(_) => BlockKind::Paragraph,
            Self::Heading(_) => BlockKind::Heading,
            Self::Quote(_) => BlockKind::Quote,
            Self::Code(_) => BlockKind::Code,
            Self::List(_) => BlockKind::List,
            Self::Image(_) => BlockKind::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphNode {
    pub children: Vec<InlineNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadingNode {
    /// 1 through 6
    pub level: u8,
    pub children: Vec<InlineNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteNode {
    pub children: Vec<InlineNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeNode {
    /// Absent (`None`), explicit null (`Some(None)`), or a language name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<Option<String>>,
    /// Code blocks hold plain text only
    #[serde(serialize_with = "serialize_text_children")]
    pub children: Vec<TextNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Ordered,
    Unordered,
}

impl ListFormat {
    pub fn parse(format: &str) -> Option<Self> {
        match format {
            "ordered" => Some(Self::Ordered),
            "unordered" => Some(Self::Unordered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListNode {
    pub format: ListFormat,
    pub children: Vec<ListItemNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Serializes with its `list-item` tag since it never appears inside
/// [`BlockNode`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "list-item")]
pub struct ListItemNode {
    pub children: Vec<InlineNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageNode {
    pub image: ImageDescriptor,
    pub children: Vec<InlineNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A stored media asset referenced by an image block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDescriptor {
    pub name: String,
    #[serde(rename = "alternativeText")]
    pub alternative_text: Option<String>,
    pub url: String,
    pub caption: Option<String>,
    pub width: Number,
    pub height: Number,
    pub formats: Map<String, Value>,
    pub hash: String,
    pub ext: String,
    pub mime: String,
    pub size: Number,
    #[serde(rename = "previewUrl")]
    pub preview_url: Option<String>,
    pub provider: String,
    pub provider_metadata: Value,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InlineNode {
    Text(TextNode),
    Link(LinkNode),
}

impl InlineNode {
    pub fn kind(&self) -> InlineKind {
        match self {
            Self::Text(_) => InlineKind::Text,
            Self::Link(_) => InlineKind::Link,
        }
    }
}

/// A run of text with optional formatting marks.
///
/// Inside [`InlineNode`] the enum supplies the `text` tag; standalone (code
/// block and link children) use [`TaggedText`] when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextNode {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkNode {
    pub url: String,
    #[serde(serialize_with = "serialize_text_children")]
    pub children: Vec<TextNode>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Borrowed view that writes a [`TextNode`] with its `"type": "text"` tag
#[derive(Serialize)]
#[serde(tag = "type", rename = "text")]
pub struct TaggedText<'a> {
    #[serde(flatten)]
    pub node: &'a TextNode,
}

pub(crate) fn serialize_text_children<S>(children: &[TextNode], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(children.iter().map(|node| TaggedText { node }))
}
