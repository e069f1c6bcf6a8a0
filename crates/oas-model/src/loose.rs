use indexmap::IndexMap;
use oas_span::SourceSpan;
use oas_syntax::Node;

use crate::build::{BuildContext, Element};
use crate::node_ref::ValueRef;
use crate::objects::Reference;
use crate::{KeySource, KindSet, ModelError, NodeKind, NodeRef, ValueSource};

/// Ordered sequence of built values.
pub type List<T> = Vec<ValueSource<Loose<T>>>;

/// Ordered mapping from authored keys to built values.
pub type Map<T> = IndexMap<KeySource<String>, ValueSource<Loose<T>>>;

/// A built value, or the generic subtree when the document holds something
/// of a different shape than the field declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loose<T> {
    Typed(T),
    Mismatched(Node),
}

impl<T> Loose<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Self::Typed(value) => Some(value),
            Self::Mismatched(_) => None,
        }
    }

    pub fn is_mismatched(&self) -> bool {
        matches!(self, Self::Mismatched(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loose<U> {
        match self {
            Self::Typed(value) => Loose::Typed(f(value)),
            Self::Mismatched(node) => Loose::Mismatched(node),
        }
    }
}

impl<T: Element> Loose<T> {
    pub fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        match self {
            Self::Typed(value) => value.node_ref(span),
            Self::Mismatched(node) => NodeRef::Value(ValueRef::Raw(node)),
        }
    }
}

/// A position that accepts either a Reference or the object itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefOr<T> {
    Reference(Reference),
    Item(T),
}

impl<T> RefOr<T> {
    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Reference(_) => None,
            Self::Item(item) => Some(item),
        }
    }

    pub fn reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            Self::Item(_) => None,
        }
    }
}

impl<T: Element> Element for RefOr<T> {
    const KINDS: KindSet = T::KINDS.union(&KindSet::new([NodeKind::Reference, NodeKind::Value]));

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        if Reference::is_reference(cx.version(), node) {
            return Ok(Reference::build(cx, node)?.map(Self::Reference));
        }
        Ok(T::build(cx, node)?.map(Self::Item))
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        match self {
            Self::Reference(reference) => reference.node_ref(span),
            Self::Item(item) => item.node_ref(span),
        }
    }
}
