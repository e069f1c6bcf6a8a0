use std::fmt::Write as _;

use expect_test::expect;
use oas_span::Position;
use oas_syntax::parse;

use crate::{Document, Loose, ModelError, NodeRef, Object, Version, build};

fn document(text: &str) -> Document {
    let root = parse(text).unwrap();
    let version = Version::detect(&root).unwrap();
    build(&root, version).unwrap()
}

fn render(node: NodeRef<'_>) -> String {
    fn go(node: NodeRef<'_>, depth: usize, out: &mut String) {
        for child in node.children() {
            let indent = "  ".repeat(depth);
            write!(out, "{indent}{}: {}", child.segment, child.node.kind()).unwrap();
            if let NodeRef::Value(value) = child.node {
                write!(out, " = {}", value.to_json()).unwrap();
            }
            out.push('\n');
            go(child.node, depth + 1, out);
        }
    }

    let mut out = format!("{}\n", node.kind());
    go(node, 1, &mut out);
    out
}

const PETS: &str = r#"{
  "openapi": "3.1.0",
  "info": {"title": "Pets", "version": "1", "x-vendor-flag": true},
  "paths": {
    "/users": {"get": {"responses": {"200": {"description": "ok"}}}}
  },
  "x-top": 1,
  "bogus": []
}"#;

#[test]
fn children_follow_document_order() {
    let document = document(PETS);
    expect![[r#"
        Document
          openapi: Value = "3.1.0"
          info: Info
            title: Value = "Pets"
            version: Value = "1"
            x-vendor-flag: Value = true
          paths: Paths
            /users: PathItem
              get: Operation
                responses: Responses
                  200: Response
                    description: Value = "ok"
          x-top: Value = 1
          bogus: Value = []
    "#]]
    .assert_eq(&render(NodeRef::from(&document)));
}

#[test]
fn extensions_and_unknown_keys_are_segregated() {
    let document = document(PETS);
    let keys = |map: &crate::Extensions| map.keys().map(|k| k.value.clone()).collect::<Vec<_>>();

    assert_eq!(keys(document.extensions()), ["x-top"]);
    assert_eq!(keys(document.unknown()), ["bogus"]);

    let info = document.info.as_ref().unwrap().value.typed().unwrap();
    assert_eq!(keys(&info.extensions), ["x-vendor-flag"]);
    assert!(info.unknown.is_empty());
    assert!(!<crate::Info as Object>::FIELDS.iter().any(|(name, _)| name.starts_with("x-")));
}

#[test]
fn fields_record_key_and_value_spans() {
    let document = document(PETS);
    let info = document.info.as_ref().unwrap();

    assert_eq!(info.field_name, "info");
    assert_eq!(info.key_span.to_string(), "3:3-3:9");
    assert_eq!(info.value_span.start(), Position::new(2, 10));
    assert_eq!(info.value.typed().unwrap().span, info.value_span);
    assert_eq!(document.version, Version::V31);
}

#[test]
fn empty_paths_are_present() {
    let document = document(r#"{"openapi": "3.0.3", "paths": {}}"#);
    let paths = document.paths.unwrap().value;
    let Loose::Typed(paths) = paths else { panic!("paths should build") };
    assert!(paths.paths.is_empty());
    assert_eq!(NodeRef::from(&paths).children().len(), 0);
}

#[test]
fn wrong_shapes_are_kept_not_rejected() {
    let document = document(r#"{"openapi": "3.0.3", "info": "nope", "paths": {"users": {}}}"#);
    expect![[r#"
        Document
          openapi: Value = "3.0.3"
          info: Value = "nope"
          paths: Paths
            users: Value = {}
    "#]]
    .assert_eq(&render(NodeRef::from(&document)));

    let paths = document.paths.unwrap().value;
    let Loose::Typed(paths) = paths else { panic!("paths should build") };
    assert!(paths.paths.is_empty());
    assert_eq!(paths.unknown.len(), 1);
}

#[test]
fn references_replace_the_contextual_object() {
    let document = document(
        r##"{
            "openapi": "3.0.3",
            "paths": {"/a": {"get": {"parameters": [{"$ref": "#/components/parameters/P"}]}}},
            "components": {"parameters": {"P": {"name": "p", "in": "query"}}}
        }"##,
    );
    expect![[r##"
        Document
          openapi: Value = "3.0.3"
          paths: Paths
            /a: PathItem
              get: Operation
                parameters: Sequence
                  0: Reference
                    $ref: Value = "#/components/parameters/P"
          components: Components
            parameters: Mapping
              P: Parameter
                name: Value = "p"
                in: Value = "query"
    "##]]
    .assert_eq(&render(NodeRef::from(&document)));
}

#[test]
fn path_items_keep_ref_as_a_field() {
    let document = document(r##"{"openapi": "3.1.0", "paths": {"/a": {"$ref": "#/x"}}}"##);
    let paths = document.paths.unwrap().value;
    let item = &paths.typed().unwrap().paths["/a"].value;
    let item = item.typed().unwrap();
    assert_eq!(item.reference.as_ref().unwrap().value, Loose::Typed("#/x".to_owned()));
}

#[test]
fn duplicate_fields_keep_the_first() {
    let document = document(r#"{"openapi": "3.0.0", "info": {"title": "a", "title": "b"}}"#);
    let info = document.info.unwrap().value;
    let title = info.typed().unwrap().title.as_ref().unwrap();
    assert_eq!(title.value, Loose::Typed("a".to_owned()));
}

#[test]
fn root_must_be_a_mapping() {
    let err = build(&parse("[1]").unwrap(), Version::V30).unwrap_err();
    assert_eq!(
        err,
        ModelError::Construction {
            path: String::new(),
            reason: "expected a mapping at the document root, found sequence".to_owned(),
        }
    );
    assert_eq!(err.path(), "");
}

#[test]
fn building_twice_gives_equal_trees() {
    let root = parse(PETS).unwrap();
    let first = build(&root, Version::V31).unwrap();
    let second = build(&root, Version::V31).unwrap();
    assert_eq!(first, second);
    assert_eq!(render(NodeRef::from(&first)), render(NodeRef::from(&second)));
}

#[test]
fn synthetic_trees_have_zero_spans() {
    let value = serde_json::json!({"openapi": "3.0.0", "info": {"title": "t"}});
    let root = oas_syntax::Node::from_json(&value);
    let document = build(&root, Version::V30).unwrap();
    assert!(document.span.is_zero());
    assert!(document.info.unwrap().key_span.is_zero());
}

#[test]
fn operations_come_in_document_order() {
    let document = document(
        r#"{
          "openapi": "3.0.3",
          "paths": {
            "/pets": {
              "post": {"operationId": "createPet"},
              "summary": "Pets",
              "get": {"operationId": "listPets"},
              "delete": "not an operation"
            }
          }
        }"#,
    );
    let paths = document.paths.as_ref().unwrap().value.typed().unwrap();
    let item = paths.paths["/pets"].value.typed().unwrap();

    let operations: Vec<_> = item
        .operations()
        .into_iter()
        .map(|(method, operation)| {
            let id = operation.operation_id.as_ref().and_then(|field| field.value.typed());
            (method, id.map(String::as_str))
        })
        .collect();
    assert_eq!(operations, [("post", Some("createPet")), ("get", Some("listPets"))]);
}
