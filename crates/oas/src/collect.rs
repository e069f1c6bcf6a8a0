use std::convert::Infallible;

use oas_model::{FieldSource, KindSet, Loose, NodeKind, NodeRef, PathItem, Reference, Schema};
use oas_traverse::{Control, Path, PathFormat, Visitor};

/// Renders the path of every node of the requested kinds.
pub(crate) struct PathCollector {
    interest: KindSet,
    format: PathFormat,
    pub(crate) paths: Vec<String>,
}

impl PathCollector {
    pub(crate) fn new(interest: KindSet, format: PathFormat) -> Self {
        Self { interest, format, paths: Vec::new() }
    }
}

impl<'a> Visitor<'a> for PathCollector {
    type Error = Infallible;

    fn interest(&self) -> KindSet {
        self.interest
    }

    fn enter(&mut self, _: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
        self.paths.push(path.format(self.format));
        Ok(Control::Continue)
    }
}

/// Every `$ref` of the document: Reference objects, plus the `$ref` fields
/// Path Items and 3.1 Schemas carry next to their other fields.
#[derive(Default)]
pub(crate) struct RefCollector {
    pub(crate) refs: Vec<(String, String)>,
}

impl RefCollector {
    fn push(&mut self, path: &Path<'_>, target: Option<&str>) {
        if let Some(target) = target {
            self.refs.push((path.pointer(), target.to_owned()));
        }
    }
}

fn field_target(field: Option<&FieldSource<Loose<String>>>) -> Option<&str> {
    field?.value.typed().map(String::as_str)
}

impl<'a> Visitor<'a> for RefCollector {
    type Error = Infallible;

    fn interest(&self) -> KindSet {
        KindSet::new([NodeKind::Reference, NodeKind::Schema, NodeKind::PathItem])
    }

    fn visit_reference(
        &mut self,
        reference: &'a Reference,
        path: &Path<'a>,
    ) -> Result<Control, Self::Error> {
        self.push(path, reference.target());
        Ok(Control::Continue)
    }

    fn visit_schema(&mut self, schema: &'a Schema, path: &Path<'a>) -> Result<Control, Self::Error> {
        self.push(path, field_target(schema.reference.as_ref()));
        Ok(Control::Continue)
    }

    fn visit_path_item(
        &mut self,
        item: &'a PathItem,
        path: &Path<'a>,
    ) -> Result<Control, Self::Error> {
        self.push(path, field_target(item.reference.as_ref()));
        Ok(Control::Continue)
    }
}

#[cfg(test)]
mod tests {
    use oas_model::{Document, Version, build};
    use oas_syntax::parse;
    use oas_traverse::traverse;

    use super::*;

    fn document(text: &str) -> Document {
        let root = parse(text).unwrap();
        build(&root, Version::detect(&root).unwrap()).unwrap()
    }

    #[test]
    fn refs_are_collected_in_document_order() {
        let document = document(
            r##"{
                "openapi": "3.1.0",
                "paths": {
                    "/a": {"$ref": "#/components/pathItems/A"},
                    "/b": {"get": {"parameters": [{"$ref": "#/components/parameters/P"}]}}
                },
                "components": {
                    "schemas": {"S": {"$ref": "#/components/schemas/T", "type": "object"}}
                }
            }"##,
        );
        let mut refs = RefCollector::default();
        traverse(&document, &mut refs).unwrap();
        assert_eq!(
            refs.refs,
            [
                ("/paths/~1a".to_owned(), "#/components/pathItems/A".to_owned()),
                ("/paths/~1b/get/parameters/0".to_owned(), "#/components/parameters/P".to_owned()),
                ("/components/schemas/S".to_owned(), "#/components/schemas/T".to_owned()),
            ]
        );
    }

    #[test]
    fn paths_filter_by_kind() {
        let document = document(
            r#"{"openapi": "3.0.3", "paths": {"/a": {"get": {}, "post": {}}}}"#,
        );
        let mut paths =
            PathCollector::new(KindSet::of(NodeKind::Operation), PathFormat::JsonPath);
        traverse(&document, &mut paths).unwrap();
        assert_eq!(paths.paths, ["$['paths']['/a']['get']", "$['paths']['/a']['post']"]);
    }
}
