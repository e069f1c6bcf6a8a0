use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use oas_span::SourceSpan;

use crate::Version;
use crate::node_ref::{Child, Collection, ValueRef};
use crate::objects::*;

macro_rules! node_kinds {
    ($($kind:ident),* $(,)?) => {
        /// The variant tag of a node: one kind per OpenAPI object, plus
        /// the typed containers and the untyped value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum NodeKind {
            $($kind,)*
            Sequence,
            Mapping,
            Value,
        }

        impl NodeKind {
            pub const ALL: [Self; COUNT] = [$(Self::$kind,)* Self::Sequence, Self::Mapping, Self::Value];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$kind => stringify!($kind),)*
                    Self::Sequence => "Sequence",
                    Self::Mapping => "Mapping",
                    Self::Value => "Value",
                }
            }

            fn child_kinds(self) -> KindSet {
                match self {
                    $(Self::$kind => <$kind as Object>::CHILD_KINDS,)*
                    Self::Sequence | Self::Mapping | Self::Value => KindSet::EMPTY,
                }
            }

            fn fields(self) -> &'static [(&'static str, Option<Version>)] {
                match self {
                    $(Self::$kind => <$kind as Object>::FIELDS,)*
                    Self::Sequence | Self::Mapping | Self::Value => &[],
                }
            }
        }

        const COUNT: usize = [$(stringify!($kind),)*].len() + 3;

        /// A borrowed view of any node of the typed tree.
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $($kind(&'a $kind),)*
            Sequence(Collection<'a>),
            Mapping(Collection<'a>),
            Value(ValueRef<'a>),
        }

        impl<'a> NodeRef<'a> {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Self::$kind(_) => NodeKind::$kind,)*
                    Self::Sequence(_) => NodeKind::Sequence,
                    Self::Mapping(_) => NodeKind::Mapping,
                    Self::Value(_) => NodeKind::Value,
                }
            }

            pub fn span(&self) -> SourceSpan {
                match self {
                    $(Self::$kind(node) => node.span,)*
                    Self::Sequence(collection) | Self::Mapping(collection) => collection.span(),
                    Self::Value(value) => value.span(),
                }
            }

            /// Children in document order.
            pub fn children(&self) -> Vec<Child<'a>> {
                match *self {
                    $(Self::$kind(node) => node.children(),)*
                    Self::Sequence(collection) | Self::Mapping(collection) => collection.children(),
                    Self::Value(value) => value.children(),
                }
            }

            /// Every kind that can occur in the subtree rooted here, this node
            /// included.
            pub fn reachable(&self) -> KindSet {
                match self {
                    Self::Sequence(collection) | Self::Mapping(collection) => {
                        KindSet::of(self.kind()).union(&collection.item_kinds().closure())
                    }
                    _ => reachable(self.kind()),
                }
            }
        }

        $(
            impl<'a> From<&'a $kind> for NodeRef<'a> {
                fn from(node: &'a $kind) -> Self {
                    Self::$kind(node)
                }
            }
        )*
    };
}

node_kinds! {
    Document,
    Info,
    Contact,
    License,
    Server,
    ServerVariable,
    Components,
    Paths,
    PathItem,
    Operation,
    ExternalDocs,
    Parameter,
    RequestBody,
    MediaType,
    Encoding,
    Responses,
    Response,
    Callback,
    Example,
    Link,
    Header,
    Tag,
    Reference,
    Schema,
    Discriminator,
    Xml,
    SecurityScheme,
    OAuthFlows,
    OAuthFlow,
    SecurityRequirement,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node kind `{0}`")]
pub struct UnknownKind(String);

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

/// Names of the fields an object kind defines for a version, in table order.
pub fn field_names(kind: NodeKind, version: Version) -> Vec<&'static str> {
    kind.fields()
        .iter()
        .filter(|(_, only)| only.is_none_or(|only| only == version))
        .map(|&(name, _)| name)
        .collect()
}

/// A set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSet {
    bits: u64,
}

impl KindSet {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const ALL: Self = Self::new(NodeKind::ALL);

    pub const fn of(kind: NodeKind) -> Self {
        Self { bits: 1u64 << kind as u32 }
    }

    pub const fn new<const N: usize>(kinds: [NodeKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.union(&Self::of(kinds[i]));
            i += 1;
        }

        set
    }

    pub const fn union(mut self, other: &Self) -> Self {
        self.bits |= other.bits;
        self
    }

    pub const fn contains(&self, kind: NodeKind) -> bool {
        self.bits & Self::of(kind).bits != 0
    }

    pub const fn intersects(&self, other: &Self) -> bool {
        self.bits & other.bits != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = NodeKind> {
        NodeKind::ALL.into_iter().filter(move |&kind| self.contains(kind))
    }

    /// This set plus every kind reachable from its members.
    pub fn closure(self) -> Self {
        let table = reachable_table();
        self.iter().fold(self, |set, kind| set.union(&table[kind as usize]))
    }
}

impl FromIterator<NodeKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = NodeKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, kind| set.union(&Self::of(kind)))
    }
}

/// Kinds that can occur in the subtree of a node of `kind`, `kind` included.
pub fn reachable(kind: NodeKind) -> KindSet {
    reachable_table()[kind as usize]
}

fn reachable_table() -> &'static [KindSet; COUNT] {
    static TABLE: OnceLock<[KindSet; COUNT]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = NodeKind::ALL.map(|kind| KindSet::of(kind).union(&kind.child_kinds()));
        loop {
            let mut changed = false;
            for kind in NodeKind::ALL {
                let current = table[kind as usize];
                let grown = current.iter().fold(current, |set, inner| set.union(&table[inner as usize]));
                if grown != current {
                    table[kind as usize] = grown;
                    changed = true;
                }
            }
            if !changed {
                break table;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_fit_in_the_set() {
        assert!(COUNT <= u64::BITS as usize);
        assert_eq!(KindSet::ALL.iter().count(), COUNT);
    }

    #[test]
    fn names_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.name().parse::<NodeKind>(), Ok(kind));
        }
        assert_eq!("pathitem".parse::<NodeKind>(), Ok(NodeKind::PathItem));
        assert!("Nope".parse::<NodeKind>().is_err());
    }

    #[test]
    fn reachability() {
        let from_info = reachable(NodeKind::Info);
        assert!(from_info.contains(NodeKind::Contact));
        assert!(from_info.contains(NodeKind::License));
        assert!(!from_info.contains(NodeKind::Schema));

        let from_document = reachable(NodeKind::Document);
        assert_eq!(from_document, KindSet::ALL);

        let from_schema = reachable(NodeKind::Schema);
        for kind in [NodeKind::Reference, NodeKind::Discriminator, NodeKind::Xml, NodeKind::ExternalDocs] {
            assert!(from_schema.contains(kind), "{kind}");
        }
        assert!(!from_schema.contains(NodeKind::Operation));
        assert_eq!(reachable(NodeKind::Value), KindSet::of(NodeKind::Value));
    }

    #[test]
    fn field_tables_depend_on_version() {
        let v30 = field_names(NodeKind::Info, Version::V30);
        let v31 = field_names(NodeKind::Info, Version::V31);
        assert!(!v30.contains(&"summary"));
        assert!(v31.contains(&"summary"));

        assert!(field_names(NodeKind::Schema, Version::V30).contains(&"nullable"));
        assert!(!field_names(NodeKind::Schema, Version::V31).contains(&"nullable"));
        assert!(field_names(NodeKind::Schema, Version::V31).contains(&"prefixItems"));
        assert!(field_names(NodeKind::Value, Version::V31).is_empty());
    }
}
