use oas_span::SourceSpan;
use oas_syntax::Node;
use serde_json::Number;

use super::object;
use crate::build::{BuildContext, Element};
use crate::node_ref::ValueRef;
use crate::objects::ExternalDocs;
use crate::{KindSet, List, Loose, Map, ModelError, NodeRef, RefOr, Version};

/// `type`: a single name, or in 3.1 a list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Single(String),
    Multiple(List<String>),
}

impl Element for SchemaType {
    const KINDS: KindSet = <List<String> as Element>::KINDS;

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        if let Some(name) = node.as_str() {
            return Ok(Loose::Typed(Self::Single(name.to_owned())));
        }
        if cx.version() == Version::V31 && node.as_sequence().is_some() {
            return Ok(List::<String>::build(cx, node)?.map(Self::Multiple));
        }
        Ok(cx.mismatch("type name", node))
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        match self {
            Self::Single(name) => NodeRef::Value(ValueRef::String(name, span)),
            Self::Multiple(names) => names.node_ref(span),
        }
    }
}

/// A boolean, or a schema, as taken by `additionalProperties` and the
/// `unevaluated*` keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolOrSchema {
    Bool(bool),
    Schema(Box<RefOr<Schema>>),
}

impl Element for BoolOrSchema {
    const KINDS: KindSet = <RefOr<Schema> as Element>::KINDS;

    fn build<'a>(cx: &mut BuildContext<'a>, node: &'a Node) -> Result<Loose<Self>, ModelError> {
        if let Some(value) = node.as_bool() {
            return Ok(Loose::Typed(Self::Bool(value)));
        }
        Ok(<Box<RefOr<Schema>>>::build(cx, node)?.map(Self::Schema))
    }

    fn node_ref(&self, span: SourceSpan) -> NodeRef<'_> {
        match self {
            Self::Bool(value) => NodeRef::Value(ValueRef::Bool(*value, span)),
            Self::Schema(schema) => schema.node_ref(span),
        }
    }
}

object! {
    /// A Schema Object. In 3.1 this is a JSON Schema 2020-12 schema, so the
    /// table also carries the 2020-12 keywords for that version.
    pub struct Schema {
        reference: String = "$ref" only V31,
        id: String = "$id" only V31,
        schema: String = "$schema" only V31,
        anchor: String = "$anchor" only V31,
        comment: String = "$comment" only V31,
        defs: Map<RefOr<Schema>> = "$defs" only V31,

        title: String = "title",
        description: String = "description",
        r#type: SchemaType = "type",
        format: String = "format",
        default: Node = "default",
        r#enum: List<Node> = "enum",
        r#const: Node = "const" only V31,
        nullable: bool = "nullable" only V30,

        multiple_of: Number = "multipleOf",
        maximum: Number = "maximum",
        exclusive_maximum: Node = "exclusiveMaximum",
        minimum: Number = "minimum",
        exclusive_minimum: Node = "exclusiveMinimum",
        max_length: Number = "maxLength",
        min_length: Number = "minLength",
        pattern: String = "pattern",
        max_items: Number = "maxItems",
        min_items: Number = "minItems",
        unique_items: bool = "uniqueItems",
        max_properties: Number = "maxProperties",
        min_properties: Number = "minProperties",
        required: List<String> = "required",

        all_of: List<RefOr<Schema>> = "allOf",
        one_of: List<RefOr<Schema>> = "oneOf",
        any_of: List<RefOr<Schema>> = "anyOf",
        not: Box<RefOr<Schema>> = "not",
        r#if: Box<RefOr<Schema>> = "if" only V31,
        then: Box<RefOr<Schema>> = "then" only V31,
        r#else: Box<RefOr<Schema>> = "else" only V31,
        dependent_schemas: Map<RefOr<Schema>> = "dependentSchemas" only V31,

        items: Box<RefOr<Schema>> = "items",
        prefix_items: List<RefOr<Schema>> = "prefixItems" only V31,
        contains: Box<RefOr<Schema>> = "contains" only V31,
        unevaluated_items: BoolOrSchema = "unevaluatedItems" only V31,
        properties: Map<RefOr<Schema>> = "properties",
        pattern_properties: Map<RefOr<Schema>> = "patternProperties" only V31,
        additional_properties: BoolOrSchema = "additionalProperties",
        unevaluated_properties: BoolOrSchema = "unevaluatedProperties" only V31,
        property_names: Box<RefOr<Schema>> = "propertyNames" only V31,

        content_encoding: String = "contentEncoding" only V31,
        content_media_type: String = "contentMediaType" only V31,

        discriminator: Discriminator = "discriminator",
        read_only: bool = "readOnly",
        write_only: bool = "writeOnly",
        xml: Xml = "xml",
        external_docs: ExternalDocs = "externalDocs",
        example: Node = "example",
        examples: List<Node> = "examples" only V31,
        deprecated: bool = "deprecated",
    }
}

object! {
    pub struct Discriminator {
        property_name: String = "propertyName",
        mapping: Map<String> = "mapping",
    }
}

object! {
    pub struct Xml {
        name: String = "name",
        namespace: String = "namespace",
        prefix: String = "prefix",
        attribute: bool = "attribute",
        wrapped: bool = "wrapped",
    }
}

#[cfg(test)]
mod tests {
    use oas_syntax::parse;

    use crate::objects::Reference;

    use super::*;

    fn schema(version: Version, text: &str) -> Schema {
        let node = parse(text).unwrap();
        let mut cx = BuildContext::new(version);
        match Schema::build(&mut cx, &node).unwrap() {
            Loose::Typed(schema) => schema,
            Loose::Mismatched(node) => panic!("not a schema: {node:?}"),
        }
    }

    #[test]
    fn type_lists_are_3_1_only() {
        let v31 = schema(Version::V31, r#"{"type": ["string", "null"]}"#);
        let Some(Loose::Typed(SchemaType::Multiple(names))) = v31.r#type.as_ref().map(|f| &f.value)
        else {
            panic!("expected a list of type names");
        };
        assert_eq!(names.len(), 2);

        let v30 = schema(Version::V30, r#"{"type": ["string", "null"]}"#);
        assert!(v30.r#type.unwrap().value.is_mismatched());
    }

    #[test]
    fn version_specific_keywords() {
        let text = r#"{"nullable": true, "const": 1, "$id": "x"}"#;

        let v30 = schema(Version::V30, text);
        assert!(v30.nullable.is_some());
        assert!(v30.r#const.is_none());
        let unknown: Vec<_> = v30.unknown.keys().map(|key| key.value.as_str()).collect();
        assert_eq!(unknown, ["const", "$id"]);

        let v31 = schema(Version::V31, text);
        assert!(v31.nullable.is_none());
        assert!(v31.r#const.is_some());
        assert!(v31.id.is_some());
        let unknown: Vec<_> = v31.unknown.keys().map(|key| key.value.as_str()).collect();
        assert_eq!(unknown, ["nullable"]);
    }

    #[test]
    fn nested_references_and_booleans() {
        let s = schema(
            Version::V31,
            r##"{
                "properties": {"pet": {"$ref": "#/components/schemas/Pet"}},
                "additionalProperties": false,
                "items": {"$ref": "#/a", "type": "string"}
            }"##,
        );

        let properties = s.properties.unwrap().value;
        let pet = &properties.typed().unwrap()["pet"].value;
        let target = pet.typed().and_then(RefOr::reference).and_then(Reference::target);
        assert_eq!(target, Some("#/components/schemas/Pet"));

        assert_eq!(s.additional_properties.unwrap().value, Loose::Typed(BoolOrSchema::Bool(false)));

        let items = s.items.unwrap().value;
        let items = items.typed().and_then(|boxed| boxed.item()).unwrap();
        assert!(items.reference.is_some(), "$ref with siblings stays a schema keyword in 3.1");
    }
}
