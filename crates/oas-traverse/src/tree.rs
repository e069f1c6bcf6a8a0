use oas_model::{KindSet, NodeKind, NodeRef, Segment};
use oas_syntax::{Content, Node};

/// Anything the engine can walk: the typed model, or a generic tree of
/// mappings, sequences and scalars.
pub trait Tree<'a>: Copy {
    fn kind(&self) -> NodeKind;

    /// Kinds that can occur in the subtree rooted here. Subtrees whose set
    /// misses everything a visitor is interested in are not entered.
    fn reachable(&self) -> KindSet;

    /// Children in document order, with the segment leading to each.
    fn children(&self) -> Vec<(Segment<'a>, Self)>;
}

impl<'a> Tree<'a> for NodeRef<'a> {
    fn kind(&self) -> NodeKind {
        NodeRef::kind(self)
    }

    fn reachable(&self) -> KindSet {
        NodeRef::reachable(self)
    }

    fn children(&self) -> Vec<(Segment<'a>, Self)> {
        NodeRef::children(self).into_iter().map(|child| (child.segment, child.node)).collect()
    }
}

/// Generic trees are made of a single kind, [`NodeKind::Value`].
impl<'a> Tree<'a> for &'a Node {
    fn kind(&self) -> NodeKind {
        NodeKind::Value
    }

    fn reachable(&self) -> KindSet {
        KindSet::of(NodeKind::Value)
    }

    fn children(&self) -> Vec<(Segment<'a>, Self)> {
        let node: &'a Node = *self;
        match node.content() {
            Content::Mapping(entries) => entries
                .iter()
                .map(|entry| (Segment::Key(entry.key.text()), &entry.value))
                .collect(),
            Content::Sequence(items) => {
                items.iter().enumerate().map(|(index, item)| (Segment::Index(index), item)).collect()
            }
            Content::Scalar(_) => Vec::new(),
        }
    }
}

impl<'a> Tree<'a> for &'a serde_json::Value {
    fn kind(&self) -> NodeKind {
        NodeKind::Value
    }

    fn reachable(&self) -> KindSet {
        KindSet::of(NodeKind::Value)
    }

    fn children(&self) -> Vec<(Segment<'a>, Self)> {
        let value: &'a serde_json::Value = *self;
        match value {
            serde_json::Value::Object(map) => {
                map.iter().map(|(key, value)| (Segment::Key(key), value)).collect()
            }
            serde_json::Value::Array(items) => {
                items.iter().enumerate().map(|(index, item)| (Segment::Index(index), item)).collect()
            }
            _ => Vec::new(),
        }
    }
}
