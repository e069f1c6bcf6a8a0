use oas_model::*;

use crate::Control;
use crate::path::{NodePath, Path};

macro_rules! visitor {
    ($($kind:ident($ty:ty) => $method:ident, $leave:ident);* $(;)?) => {
        /// Push-style hooks for [`traverse`](crate::traverse).
        ///
        /// For every node whose kind is in [`interest`](Self::interest) the
        /// engine calls [`enter`](Self::enter), then [`visit`](Self::visit),
        /// which dispatches to the `visit_*` method of the node's kind, then
        /// the children, then [`leave`](Self::leave), which dispatches to the
        /// matching `leave_*` method. Every hook defaults to
        /// [`Control::Continue`].
        ///
        /// [`Control::SkipChildren`] from `enter` also skips `visit` and
        /// `leave` for that node; from `visit` it skips only the children.
        /// [`Control::Break`] from any hook ends the traversal.
        pub trait Visitor<'a> {
            type Error;

            /// Kinds this visitor handles. Subtrees that cannot contain any
            /// of them are never entered.
            fn interest(&self) -> KindSet {
                KindSet::ALL
            }

            fn enter(&mut self, _node: NodeRef<'a>, _path: &Path<'a>) -> Result<Control, Self::Error> {
                Ok(Control::Continue)
            }

            fn visit(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
                dispatch(self, node, path)
            }

            fn leave(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
                dispatch_leave(self, node, path)
            }

            $(
                fn $method(&mut self, _node: $ty, _path: &Path<'a>) -> Result<Control, Self::Error> {
                    Ok(Control::Continue)
                }

                fn $leave(&mut self, _node: $ty, _path: &Path<'a>) -> Result<Control, Self::Error> {
                    Ok(Control::Continue)
                }
            )*
        }

        /// Calls the `visit_*` method matching the kind of `node`.
        pub fn dispatch<'a, V: Visitor<'a> + ?Sized>(
            visitor: &mut V,
            node: NodeRef<'a>,
            path: &Path<'a>,
        ) -> Result<Control, V::Error> {
            match node {
                $(NodeRef::$kind(node) => visitor.$method(node, path),)*
            }
        }

        /// Calls the `leave_*` method matching the kind of `node`.
        pub fn dispatch_leave<'a, V: Visitor<'a> + ?Sized>(
            visitor: &mut V,
            node: NodeRef<'a>,
            path: &Path<'a>,
        ) -> Result<Control, V::Error> {
            match node {
                $(NodeRef::$kind(node) => visitor.$leave(node, path),)*
            }
        }

        impl<'a, V: Visitor<'a> + ?Sized> Visitor<'a> for &mut V {
            type Error = V::Error;

            fn interest(&self) -> KindSet {
                (**self).interest()
            }

            fn enter(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
                (**self).enter(node, path)
            }

            fn visit(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
                (**self).visit(node, path)
            }

            fn leave(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
                (**self).leave(node, path)
            }

            $(
                fn $method(&mut self, node: $ty, path: &Path<'a>) -> Result<Control, Self::Error> {
                    (**self).$method(node, path)
                }

                fn $leave(&mut self, node: $ty, path: &Path<'a>) -> Result<Control, Self::Error> {
                    (**self).$leave(node, path)
                }
            )*
        }

        impl<'a, V: Visitor<'a> + ?Sized> Visitor<'a> for Box<V> {
            type Error = V::Error;

            fn interest(&self) -> KindSet {
                (**self).interest()
            }

            fn enter(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
                (**self).enter(node, path)
            }

            fn visit(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
                (**self).visit(node, path)
            }

            fn leave(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
                (**self).leave(node, path)
            }

            $(
                fn $method(&mut self, node: $ty, path: &Path<'a>) -> Result<Control, Self::Error> {
                    (**self).$method(node, path)
                }

                fn $leave(&mut self, node: $ty, path: &Path<'a>) -> Result<Control, Self::Error> {
                    (**self).$leave(node, path)
                }
            )*
        }
    };
}

visitor! {
    Document(&'a Document) => visit_document, leave_document;
    Info(&'a Info) => visit_info, leave_info;
    Contact(&'a Contact) => visit_contact, leave_contact;
    License(&'a License) => visit_license, leave_license;
    Server(&'a Server) => visit_server, leave_server;
    ServerVariable(&'a ServerVariable) => visit_server_variable, leave_server_variable;
    Components(&'a Components) => visit_components, leave_components;
    Paths(&'a Paths) => visit_paths, leave_paths;
    PathItem(&'a PathItem) => visit_path_item, leave_path_item;
    Operation(&'a Operation) => visit_operation, leave_operation;
    ExternalDocs(&'a ExternalDocs) => visit_external_docs, leave_external_docs;
    Parameter(&'a Parameter) => visit_parameter, leave_parameter;
    RequestBody(&'a RequestBody) => visit_request_body, leave_request_body;
    MediaType(&'a MediaType) => visit_media_type, leave_media_type;
    Encoding(&'a Encoding) => visit_encoding, leave_encoding;
    Responses(&'a Responses) => visit_responses, leave_responses;
    Response(&'a Response) => visit_response, leave_response;
    Callback(&'a Callback) => visit_callback, leave_callback;
    Example(&'a Example) => visit_example, leave_example;
    Link(&'a Link) => visit_link, leave_link;
    Header(&'a Header) => visit_header, leave_header;
    Tag(&'a Tag) => visit_tag, leave_tag;
    Reference(&'a Reference) => visit_reference, leave_reference;
    Schema(&'a Schema) => visit_schema, leave_schema;
    Discriminator(&'a Discriminator) => visit_discriminator, leave_discriminator;
    Xml(&'a Xml) => visit_xml, leave_xml;
    SecurityScheme(&'a SecurityScheme) => visit_security_scheme, leave_security_scheme;
    OAuthFlows(&'a OAuthFlows) => visit_oauth_flows, leave_oauth_flows;
    OAuthFlow(&'a OAuthFlow) => visit_oauth_flow, leave_oauth_flow;
    SecurityRequirement(&'a SecurityRequirement) => visit_security_requirement, leave_security_requirement;
    Sequence(Collection<'a>) => visit_sequence, leave_sequence;
    Mapping(Collection<'a>) => visit_mapping, leave_mapping;
    Value(ValueRef<'a>) => visit_value, leave_value;
}

/// Hooks for [`traverse_generic`](crate::traverse_generic). Every node of a
/// generic tree has the same kind, so there is a single visit hook.
pub trait GenericVisitor<'a, T> {
    type Error;

    fn visit_node(&mut self, node: T, path: &NodePath<'a, T>) -> Result<Control, Self::Error>;

    /// Called after the node's children, unless the visit asked to break.
    fn leave_node(&mut self, _node: T, _path: &NodePath<'a, T>) -> Result<Control, Self::Error> {
        Ok(Control::Continue)
    }
}

impl<'a, T, V: GenericVisitor<'a, T> + ?Sized> GenericVisitor<'a, T> for &mut V {
    type Error = V::Error;

    fn visit_node(&mut self, node: T, path: &NodePath<'a, T>) -> Result<Control, Self::Error> {
        (**self).visit_node(node, path)
    }

    fn leave_node(&mut self, node: T, path: &NodePath<'a, T>) -> Result<Control, Self::Error> {
        (**self).leave_node(node, path)
    }
}
