use std::fmt;

use oas_span::SourceSpan;
use oas_syntax::{Content, Node, Scalar};
use serde_json::Number;

use crate::build::Element;
use crate::{KindSet, List, Map, NodeRef};

/// One step of a path from the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// A fixed field name of an OpenAPI object.
    Field(&'static str),
    /// An authored key: extension, patterned or map key.
    Key(&'a str),
    Index(usize),
}

impl Segment<'_> {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name),
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A child of a node, with the segment that leads to it.
#[derive(Debug, Clone, Copy)]
pub struct Child<'a> {
    pub segment: Segment<'a>,
    /// Span of the key token, or of the item for sequence children.
    pub key_span: SourceSpan,
    pub node: NodeRef<'a>,
}

/// A scalar of the typed tree, or a generic subtree kept as-is.
#[derive(Debug, Clone, Copy)]
pub enum ValueRef<'a> {
    String(&'a str, SourceSpan),
    Bool(bool, SourceSpan),
    Number(&'a Number, SourceSpan),
    Raw(&'a Node),
}

impl<'a> ValueRef<'a> {
    pub fn span(&self) -> SourceSpan {
        match *self {
            Self::String(_, span) | Self::Bool(_, span) | Self::Number(_, span) => span,
            Self::Raw(node) => node.span(),
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::String(text, _) => Some(text),
            Self::Raw(node) => node.as_str(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match *self {
            Self::String(text, _) => serde_json::Value::String(text.to_owned()),
            Self::Bool(value, _) => serde_json::Value::Bool(value),
            Self::Number(number, _) => serde_json::Value::Number(number.clone()),
            Self::Raw(node) => node.to_json(),
        }
    }

    /// Entries and items of a generic mapping or sequence. Duplicate keys
    /// are all present.
    pub fn children(&self) -> Vec<Child<'a>> {
        let Self::Raw(node) = *self else {
            return Vec::new();
        };
        match node.content() {
            Content::Mapping(entries) => entries
                .iter()
                .map(|entry| Child {
                    segment: Segment::Key(entry.key.text()),
                    key_span: entry.key.span(),
                    node: NodeRef::Value(Self::Raw(&entry.value)),
                })
                .collect(),
            Content::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| Child {
                    segment: Segment::Index(index),
                    key_span: item.span(),
                    node: NodeRef::Value(Self::Raw(item)),
                })
                .collect(),
            Content::Scalar(_) => Vec::new(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Raw(node) if matches!(node.as_scalar(), Some(Scalar::Null)))
    }
}

pub(crate) trait Container {
    fn len(&self) -> usize;

    fn children(&self) -> Vec<Child<'_>>;
}

impl<T: Element> Container for List<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn children(&self) -> Vec<Child<'_>> {
        self.iter()
            .enumerate()
            .map(|(index, item)| Child {
                segment: Segment::Index(index),
                key_span: item.span,
                node: item.value.node_ref(item.span),
            })
            .collect()
    }
}

impl<T: Element> Container for Map<T> {
    fn len(&self) -> usize {
        indexmap::IndexMap::len(self)
    }

    fn children(&self) -> Vec<Child<'_>> {
        self.iter()
            .map(|(key, value)| Child {
                segment: Segment::Key(&key.value),
                key_span: key.span,
                node: value.value.node_ref(value.span),
            })
            .collect()
    }
}

/// A typed sequence or mapping.
#[derive(Clone, Copy)]
pub struct Collection<'a> {
    span: SourceSpan,
    item_kinds: KindSet,
    entries: &'a dyn Container,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(span: SourceSpan, item_kinds: KindSet, entries: &'a dyn Container) -> Self {
        Self { span, item_kinds, entries }
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }

    /// Kinds the items of this collection can present directly.
    pub fn item_kinds(&self) -> KindSet {
        self.item_kinds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn children(&self) -> Vec<Child<'a>> {
        self.entries.children()
    }
}

impl fmt::Debug for Collection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection").field("span", &self.span).field("len", &self.len()).finish()
    }
}
