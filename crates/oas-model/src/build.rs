use std::fmt::Write as _;

use indexmap::IndexMap;
use oas_span::SourceSpan;
use oas_syntax::{MAX_DEPTH, Node};
use serde_json::Number;

use crate::node_ref::{Collection, ValueRef};
use crate::objects::Document;
use crate::{KeySource, KindSet, List, Loose, Map, ModelError, NodeKind, NodeRef, ValueSource, Version};

/// Builds the typed model of a document whose version is already known.
///
/// Fails only when the root is not a mapping or the tree nests deeper than
/// any parser would produce. Everything else, including values of the wrong
/// shape, is kept in the tree.
pub fn build(root: &Node, version: Version) -> Result<Document, ModelError> {
    tracing::debug!(%version, "building document model");
    let mut cx = BuildContext::new(version);
    match Document::build(&mut cx, root)? {
        Loose::Typed(document) => {
            tracing::debug!("document model built");
            Ok(document)
        }
        Loose::Mismatched(node) => Err(ModelError::Construction {
            path: String::new(),
            reason: format!("expected a mapping at the document root, found {}", node.shape_name()),
        }),
    }
}

#[derive(Debug, Clone, Copy)]
enum PathSegment<'a> {
    Name(&'a str),
    Index(usize),
}

/// State threaded through a single build: the version being built and the
/// location of the node currently being built.
pub struct BuildContext<'a> {
    version: Version,
    path: Vec<PathSegment<'a>>,
}

impl<'a> BuildContext<'a> {
    pub fn new(version: Version) -> Self {
        Self { version, path: Vec::new() }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// JSON Pointer of the node currently being built.
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            out.push('/');
            match segment {
                PathSegment::Name(name) => {
                    out.push_str(&name.replace('~', "~0").replace('/', "~1"));
                }
                PathSegment::Index(index) => {
                    let _ = write!(out, "{index}");
                }
            }
        }
        out
    }

    pub(crate) fn field<T>(
        &mut self,
        name: &'a str,
        f: impl FnOnce(&mut Self) -> Result<T, ModelError>,
    ) -> Result<T, ModelError> {
        self.descend(PathSegment::Name(name), f)
    }

    pub(crate) fn index<T>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ModelError>,
    ) -> Result<T, ModelError> {
        self.descend(PathSegment::Index(index), f)
    }

    fn descend<T>(
        &mut self,
        segment: PathSegment<'a>,
        f: impl FnOnce(&mut Self) -> Result<T, ModelError>,
    ) -> Result<T, ModelError> {
        self.path.push(segment);
        let result = if self.path.len() > MAX_DEPTH {
            Err(ModelError::TooDeep { path: self.pointer() })
        } else {
            f(self)
        };
        self.path.pop();
        result
    }

    /// Keeps a value whose shape does not match the declared one.
    pub(crate) fn mismatch<T>(&self, expected: &str, node: &Node) -> Loose<T> {
        tracing::trace!(
            path = %self.pointer(),
            expected,
            found = node.shape_name(),
            "value kept as mismatched"
        );
        Loose::Mismatched(node.clone())
    }
}

/// A value the builder can produce from a generic node.
pub trait Element: Sized {
    /// Kinds a value of this type presents to a traversal without entering
    /// a nested object: its own kind, and the kinds of collection items.
    const KINDS: KindSet;

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError>;

    /// The traversal view of this value. `span` is the span recorded by the
    /// wrapper holding it.
    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_>;
}

const VALUE: KindSet = KindSet::new([NodeKind::Value]);

impl Element for String {
    const KINDS: KindSet = VALUE;

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        Ok(match node.as_str() {
            Some(text) => Loose::Typed(text.to_owned()),
            None => cx.mismatch("string", node),
        })
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        NodeRef::Value(ValueRef::String(self, span))
    }
}

impl Element for bool {
    const KINDS: KindSet = VALUE;

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        Ok(match node.as_bool() {
            Some(value) => Loose::Typed(value),
            None => cx.mismatch("boolean", node),
        })
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        NodeRef::Value(ValueRef::Bool(*self, span))
    }
}

impl Element for Number {
    const KINDS: KindSet = VALUE;

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        Ok(match node.as_number() {
            Some(number) => Loose::Typed(number.clone()),
            None => cx.mismatch("number", node),
        })
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        NodeRef::Value(ValueRef::Number(self, span))
    }
}

/// Any value at all, kept as the generic tree.
impl Element for Node {
    const KINDS: KindSet = VALUE;

    fn build<'a>(_: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        Ok(Loose::Typed(node.clone()))
    }

    fn node_ref(&self, _: SourceSpan) -> NodeRef<'_> {
        NodeRef::Value(ValueRef::Raw(self))
    }
}

impl<T: Element> Element for Box<T> {
    const KINDS: KindSet = T::KINDS;

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        Ok(T::build(cx, node)?.map(Box::new))
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        T::node_ref(self, span)
    }
}

impl<T: Element> Element for List<T> {
    const KINDS: KindSet = T::KINDS.union(&KindSet::new([NodeKind::Sequence, NodeKind::Value]));

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        let Some(items) = node.as_sequence() else {
            return Ok(cx.mismatch("sequence", node));
        };
        let mut list = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let value = cx.index(index, |cx| T::build(cx, item))?;
            list.push(ValueSource::new(value, item.span()));
        }
        Ok(Loose::Typed(list))
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        NodeRef::Sequence(Collection::new(span, T::KINDS, self))
    }
}

impl<T: Element> Element for Map<T> {
    const KINDS: KindSet = T::KINDS.union(&KindSet::new([NodeKind::Mapping, NodeKind::Value]));

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        let Some(entries) = node.as_mapping() else {
            return Ok(cx.mismatch("mapping", node));
        };
        let mut map = IndexMap::with_capacity(entries.len());
        for entry in entries {
            let key = entry.key.text();
            if map.contains_key(key) {
                tracing::trace!(path = %cx.pointer(), key, "duplicate key ignored");
                continue;
            }
            let value = cx.field(key, |cx| T::build(cx, &entry.value))?;
            map.insert(
                KeySource::new(key.to_owned(), entry.key.span()),
                ValueSource::new(value, entry.value.span()),
            );
        }
        Ok(Loose::Typed(map))
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        NodeRef::Mapping(Collection::new(span, T::KINDS, self))
    }
}

#[cfg(test)]
mod tests {
    use oas_syntax::parse;

    use super::*;

    #[test]
    fn pointer_escapes_names() {
        let mut cx = BuildContext::new(Version::V30);
        let pointer = cx
            .field("paths", |cx| cx.field("/a~b", |cx| cx.index(1, |cx| Ok(cx.pointer()))))
            .unwrap();
        assert_eq!(pointer, "/paths/~1a~0b/1");
        assert_eq!(cx.pointer(), "");
    }

    #[test]
    fn scalars_of_the_wrong_shape_are_kept() {
        let node = parse("[1, \"two\", true]").unwrap();
        let mut cx = BuildContext::new(Version::V31);
        let Loose::Typed(list) = List::<String>::build(&mut cx, &node).unwrap() else {
            panic!("expected a typed list");
        };

        let items: Vec<_> = list
            .iter()
            .map(|item| match &item.value {
                Loose::Typed(text) => format!("typed {text}"),
                Loose::Mismatched(node) => format!("mismatched {}", node.shape_name()),
            })
            .collect();
        assert_eq!(items, ["mismatched number", "typed two", "mismatched boolean"]);
        assert_eq!(list[1].span.to_string(), "1:5-1:10");
    }

    #[test]
    fn maps_keep_first_duplicate_in_order() {
        let node = parse(r#"{"b": "1", "a": "2", "b": "3"}"#).unwrap();
        let mut cx = BuildContext::new(Version::V30);
        let Loose::Typed(map) = Map::<String>::build(&mut cx, &node).unwrap() else {
            panic!("expected a typed map");
        };

        let entries: Vec<_> = map
            .iter()
            .map(|(key, value)| (key.value.as_str(), value.value.clone()))
            .collect();
        assert_eq!(
            entries,
            [("b", Loose::Typed("1".to_owned())), ("a", Loose::Typed("2".to_owned()))]
        );
    }

    #[test]
    fn deep_synthetic_trees_are_rejected() {
        let mut value = serde_json::json!(1);
        for _ in 0..MAX_DEPTH + 1 {
            value = serde_json::json!([value]);
        }
        let node = Node::from_json(&value);

        let mut cx = BuildContext::new(Version::V30);
        assert!(List::<Node>::build(&mut cx, &node).is_ok(), "raw values are not descended");

        let mut nested = serde_json::json!("leaf");
        for _ in 0..MAX_DEPTH + 1 {
            nested = serde_json::json!({"allOf": [nested]});
        }
        let mut cx = BuildContext::new(Version::V30);
        let err = crate::Schema::build(&mut cx, &Node::from_json(&nested)).unwrap_err();
        assert!(matches!(err, ModelError::TooDeep { .. }));
    }
}
