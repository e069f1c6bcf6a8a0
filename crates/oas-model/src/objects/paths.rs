use oas_syntax::Node;

use super::object;
use crate::objects::{ExternalDocs, Schema, SecurityRequirement, Server};
use crate::{List, Map, RefOr};

fn is_path_template(key: &str) -> bool {
    key.starts_with('/')
}

object! {
    pub struct Paths {}
    patterned
    /// Path templates, in document order.
    paths: PathItem where is_path_template;
}

object! {
    pub struct PathItem {
        reference: String = "$ref",
        summary: String = "summary",
        description: String = "description",
        get: Operation = "get",
        put: Operation = "put",
        post: Operation = "post",
        delete: Operation = "delete",
        options: Operation = "options",
        head: Operation = "head",
        patch: Operation = "patch",
        trace: Operation = "trace",
        servers: List<Server> = "servers",
        parameters: List<RefOr<Parameter>> = "parameters",
    }
}

impl PathItem {
    /// The operations present, with their HTTP method, in document order.
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        let mut operations: Vec<_> = [
            &self.get,
            &self.put,
            &self.post,
            &self.delete,
            &self.options,
            &self.head,
            &self.patch,
            &self.trace,
        ]
        .into_iter()
        .flatten()
        .filter_map(|field| Some((field.field_name, field.value.typed()?, field.key_span)))
        .collect();
        operations.sort_by_key(|&(_, _, span)| span.start());
        operations.into_iter().map(|(method, operation, _)| (method, operation)).collect()
    }
}

object! {
    pub struct Operation {
        tags: List<String> = "tags",
        summary: String = "summary",
        description: String = "description",
        external_docs: ExternalDocs = "externalDocs",
        operation_id: String = "operationId",
        parameters: List<RefOr<Parameter>> = "parameters",
        request_body: RefOr<RequestBody> = "requestBody",
        responses: Responses = "responses",
        callbacks: Map<RefOr<Callback>> = "callbacks",
        deprecated: bool = "deprecated",
        security: List<SecurityRequirement> = "security",
        servers: List<Server> = "servers",
    }
}

object! {
    pub struct Parameter {
        name: String = "name",
        r#in: String = "in",
        description: String = "description",
        required: bool = "required",
        deprecated: bool = "deprecated",
        allow_empty_value: bool = "allowEmptyValue",
        style: String = "style",
        explode: bool = "explode",
        allow_reserved: bool = "allowReserved",
        schema: RefOr<Schema> = "schema",
        example: Node = "example",
        examples: Map<RefOr<Example>> = "examples",
        content: Map<MediaType> = "content",
    }
}

object! {
    pub struct RequestBody {
        description: String = "description",
        content: Map<MediaType> = "content",
        required: bool = "required",
    }
}

object! {
    pub struct MediaType {
        schema: RefOr<Schema> = "schema",
        example: Node = "example",
        examples: Map<RefOr<Example>> = "examples",
        encoding: Map<Encoding> = "encoding",
    }
}

object! {
    pub struct Encoding {
        content_type: String = "contentType",
        headers: Map<RefOr<Header>> = "headers",
        style: String = "style",
        explode: bool = "explode",
        allow_reserved: bool = "allowReserved",
    }
}

object! {
    pub struct Responses {
        default: RefOr<Response> = "default",
    }
    patterned
    /// Responses keyed by status code or status code range.
    statuses: RefOr<Response>;
}

object! {
    pub struct Response {
        description: String = "description",
        headers: Map<RefOr<Header>> = "headers",
        content: Map<MediaType> = "content",
        links: Map<RefOr<Link>> = "links",
    }
}

object! {
    pub struct Callback {}
    patterned
    /// Runtime expressions mapped to the path item they call.
    expressions: PathItem;
}

object! {
    pub struct Example {
        summary: String = "summary",
        description: String = "description",
        value: Node = "value",
        external_value: String = "externalValue",
    }
}

object! {
    pub struct Link {
        operation_ref: String = "operationRef",
        operation_id: String = "operationId",
        parameters: Map<Node> = "parameters",
        request_body: Node = "requestBody",
        description: String = "description",
        server: Server = "server",
    }
}

object! {
    pub struct Header {
        description: String = "description",
        required: bool = "required",
        deprecated: bool = "deprecated",
        allow_empty_value: bool = "allowEmptyValue",
        style: String = "style",
        explode: bool = "explode",
        allow_reserved: bool = "allowReserved",
        schema: RefOr<Schema> = "schema",
        example: Node = "example",
        examples: Map<RefOr<Example>> = "examples",
        content: Map<MediaType> = "content",
    }
}
