use super::object;
use crate::objects::{
    Callback, Example, Header, Link, Parameter, PathItem, Paths, RequestBody, Response, Schema,
    SecurityRequirement, SecurityScheme,
};
use crate::{List, Map, RefOr};

object! {
    /// The document root.
    pub struct Document {
        openapi: String = "openapi",
        info: Info = "info",
        json_schema_dialect: String = "jsonSchemaDialect" only V31,
        servers: List<Server> = "servers",
        paths: Paths = "paths",
        webhooks: Map<PathItem> = "webhooks" only V31,
        components: Components = "components",
        security: List<SecurityRequirement> = "security",
        tags: List<Tag> = "tags",
        external_docs: ExternalDocs = "externalDocs",
    }
}

object! {
    pub struct Info {
        title: String = "title",
        summary: String = "summary" only V31,
        description: String = "description",
        terms_of_service: String = "termsOfService",
        contact: Contact = "contact",
        license: License = "license",
        api_version: String = "version",
    }
}

object! {
    pub struct Contact {
        name: String = "name",
        url: String = "url",
        email: String = "email",
    }
}

object! {
    pub struct License {
        name: String = "name",
        identifier: String = "identifier" only V31,
        url: String = "url",
    }
}

object! {
    pub struct Server {
        url: String = "url",
        description: String = "description",
        variables: Map<ServerVariable> = "variables",
    }
}

object! {
    pub struct ServerVariable {
        r#enum: List<String> = "enum",
        default: String = "default",
        description: String = "description",
    }
}

object! {
    /// Reusable objects, each map keyed by component name.
    pub struct Components {
        schemas: Map<RefOr<Schema>> = "schemas",
        responses: Map<RefOr<Response>> = "responses",
        parameters: Map<RefOr<Parameter>> = "parameters",
        examples: Map<RefOr<Example>> = "examples",
        request_bodies: Map<RefOr<RequestBody>> = "requestBodies",
        headers: Map<RefOr<Header>> = "headers",
        security_schemes: Map<RefOr<SecurityScheme>> = "securitySchemes",
        links: Map<RefOr<Link>> = "links",
        callbacks: Map<RefOr<Callback>> = "callbacks",
        path_items: Map<PathItem> = "pathItems" only V31,
    }
}

object! {
    pub struct ExternalDocs {
        description: String = "description",
        url: String = "url",
    }
}

object! {
    pub struct Tag {
        name: String = "name",
        description: String = "description",
        external_docs: ExternalDocs = "externalDocs",
    }
}
