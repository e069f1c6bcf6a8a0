//! One struct per OpenAPI object.
//!
//! Every object is declared through [`object!`] with its field table: the
//! Rust field, the declared value type, the key in the document, and
//! optionally the single version the field exists in. A key the table does
//! not enable for the document's version is treated like any other unknown
//! key.

use indexmap::IndexMap;
use oas_syntax::{Entry, Node};

use crate::build::{BuildContext, Element};
use crate::node_ref::Child;
use crate::{KeySource, KindSet, Version};

mod document;
mod paths;
mod reference;
mod schema;
mod security;

pub use document::{
    Components, Contact, Document, ExternalDocs, Info, License, Server, ServerVariable, Tag,
};
pub use paths::{
    Callback, Encoding, Example, Header, Link, MediaType, Operation, Parameter, PathItem, Paths,
    RequestBody, Response, Responses,
};
pub use reference::Reference;
pub use schema::{BoolOrSchema, Discriminator, Schema, SchemaType, Xml};
pub use security::{OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme};

/// Keys kept verbatim: extensions, or keys an object does not define.
pub type Extensions = IndexMap<KeySource<String>, Node>;

/// Behaviour shared by every OpenAPI object.
pub trait Object: Element {
    /// Kinds the object's direct children can present.
    const CHILD_KINDS: KindSet;

    /// The field table: document key and, for single-version fields, the
    /// version it belongs to.
    const FIELDS: &'static [(&'static str, Option<Version>)];

    /// Keys following the `x-` convention. Never also a named field.
    fn extensions(&self) -> &Extensions;

    /// Keys that are neither named fields, extensions, nor patterned keys.
    fn unknown(&self) -> &Extensions;

    /// Named fields, patterned entries, extensions and unknown keys, in
    /// document order.
    fn children(&self) -> Vec<Child<'_>>;
}

pub(crate) fn is_extension(key: &str) -> bool {
    key.starts_with("x-")
}

pub(crate) fn keep_raw(cx: &BuildContext<'_>, map: &mut Extensions, entry: &Entry) {
    let key = entry.key.text();
    if map.contains_key(key) {
        duplicate(cx, key);
        return;
    }
    map.insert(KeySource::new(key.to_owned(), entry.key.span()), entry.value.clone());
}

pub(crate) fn duplicate(cx: &BuildContext<'_>, key: &str) {
    tracing::trace!(path = %cx.pointer(), key, "duplicate key ignored");
}

/// Orders children by where their keys appear in the document. Synthetic
/// trees keep declaration order.
pub(crate) fn in_document_order(mut children: Vec<Child<'_>>) -> Vec<Child<'_>> {
    children.sort_by_key(|child| child.key_span.start());
    children
}

macro_rules! object {
    (@version) => { None };
    (@version $only:ident) => { Some($crate::Version::$only) };

    (@enabled $cx:ident) => { true };
    (@enabled $cx:ident $only:ident) => { $cx.version() == $crate::Version::$only };

    (@accepts $key:ident) => { true };
    (@accepts $key:ident $pred:path) => { $pred($key) };

    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$field_meta:meta])* $field:ident: $ty:ty = $yaml:literal $(only $only:ident)?, )*
        }
        $( patterned $(#[$patterned_meta:meta])* $patterned:ident: $pty:ty $(where $pred:path)?; )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub span: ::oas_span::SourceSpan,
            pub version: $crate::Version,
            $( $(#[$field_meta])* pub $field: Option<$crate::FieldSource<$crate::Loose<$ty>>>, )*
            $( $(#[$patterned_meta])* pub $patterned: $crate::Map<$pty>, )?
            pub extensions: $crate::objects::Extensions,
            pub unknown: $crate::objects::Extensions,
        }

        impl $name {
            fn from_entries<'a>(
                cx: &mut $crate::build::BuildContext<'a>,
                node: &'a ::oas_syntax::Node,
                entries: &'a [::oas_syntax::Entry],
            ) -> Result<Self, $crate::ModelError> {
                let mut this = Self {
                    span: node.span(),
                    version: cx.version(),
                    $( $field: None, )*
                    $( $patterned: ::indexmap::IndexMap::new(), )?
                    extensions: ::indexmap::IndexMap::new(),
                    unknown: ::indexmap::IndexMap::new(),
                };

                for entry in entries {
                    let key = entry.key.text();
                    if $crate::objects::is_extension(key) {
                        $crate::objects::keep_raw(cx, &mut this.extensions, entry);
                        continue;
                    }

                    $(
                        if key == $yaml && $crate::objects::object!(@enabled cx $($only)?) {
                            if this.$field.is_some() {
                                $crate::objects::duplicate(cx, key);
                            } else {
                                let value = cx.field($yaml, |cx| {
                                    <$ty as $crate::build::Element>::build(cx, &entry.value)
                                })?;
                                this.$field = Some($crate::FieldSource::new(
                                    value,
                                    entry.key.span(),
                                    entry.value.span(),
                                    $yaml,
                                ));
                            }
                            continue;
                        }
                    )*

                    $(
                        if $crate::objects::object!(@accepts key $($pred)?) {
                            if this.$patterned.contains_key(key) {
                                $crate::objects::duplicate(cx, key);
                            } else {
                                let value = cx.field(key, |cx| {
                                    <$pty as $crate::build::Element>::build(cx, &entry.value)
                                })?;
                                this.$patterned.insert(
                                    $crate::KeySource::new(key.to_owned(), entry.key.span()),
                                    $crate::ValueSource::new(value, entry.value.span()),
                                );
                            }
                            continue;
                        }
                    )?

                    tracing::trace!(
                        path = %cx.pointer(),
                        key,
                        object = stringify!($name),
                        "unknown key kept"
                    );
                    $crate::objects::keep_raw(cx, &mut this.unknown, entry);
                }

                Ok(this)
            }
        }

        impl $crate::build::Element for $name {
            const KINDS: $crate::KindSet =
                $crate::KindSet::new([$crate::NodeKind::$name, $crate::NodeKind::Value]);

            fn build<'a>(
                cx: &mut $crate::build::BuildContext<'a>,
                node: &'a ::oas_syntax::Node,
            ) -> Result<$crate::Loose<Self>, $crate::ModelError> {
                let Some(entries) = node.as_mapping() else {
                    return Ok(cx.mismatch(stringify!($name), node));
                };
                Self::from_entries(cx, node, entries).map($crate::Loose::Typed)
            }

            fn node_ref(&self, _: ::oas_span::SourceSpan) -> $crate::NodeRef<'_> {
                $crate::NodeRef::$name(self)
            }
        }

        impl $crate::objects::Object for $name {
            const CHILD_KINDS: $crate::KindSet =
                $crate::KindSet::of($crate::NodeKind::Value)
                    $( .union(&<$ty as $crate::build::Element>::KINDS) )*
                    $( .union(&<$pty as $crate::build::Element>::KINDS) )?;

            const FIELDS: &'static [(&'static str, Option<$crate::Version>)] =
                &[$( ($yaml, $crate::objects::object!(@version $($only)?)), )*];

            fn extensions(&self) -> &$crate::objects::Extensions {
                &self.extensions
            }

            fn unknown(&self) -> &$crate::objects::Extensions {
                &self.unknown
            }

            fn children(&self) -> Vec<$crate::node_ref::Child<'_>> {
                use $crate::node_ref::{Child, Segment, ValueRef};

                let mut children = Vec::new();
                $(
                    if let Some(field) = &self.$field {
                        let node = field.value.node_ref(field.value_span);
                        // A `null` field keeps its spans but holds no value.
                        if !matches!(node, $crate::NodeRef::Value(value) if value.is_null()) {
                            children.push(Child {
                                segment: Segment::Field(field.field_name),
                                key_span: field.key_span,
                                node,
                            });
                        }
                    }
                )*
                $(
                    for (key, value) in &self.$patterned {
                        children.push(Child {
                            segment: Segment::Key(&key.value),
                            key_span: key.span,
                            node: value.value.node_ref(value.span),
                        });
                    }
                )?
                for (key, node) in self.extensions.iter().chain(&self.unknown) {
                    children.push(Child {
                        segment: Segment::Key(&key.value),
                        key_span: key.span,
                        node: $crate::NodeRef::Value(ValueRef::Raw(node)),
                    });
                }
                $crate::objects::in_document_order(children)
            }
        }
    };
}

pub(crate) use object;
