use super::object;
use crate::{List, Map};

object! {
    pub struct SecurityScheme {
        r#type: String = "type",
        description: String = "description",
        name: String = "name",
        r#in: String = "in",
        scheme: String = "scheme",
        bearer_format: String = "bearerFormat",
        flows: OAuthFlows = "flows",
        open_id_connect_url: String = "openIdConnectUrl",
    }
}

object! {
    pub struct OAuthFlows {
        implicit: OAuthFlow = "implicit",
        password: OAuthFlow = "password",
        client_credentials: OAuthFlow = "clientCredentials",
        authorization_code: OAuthFlow = "authorizationCode",
    }
}

object! {
    pub struct OAuthFlow {
        authorization_url: String = "authorizationUrl",
        token_url: String = "tokenUrl",
        refresh_url: String = "refreshUrl",
        scopes: Map<String> = "scopes",
    }
}

object! {
    pub struct SecurityRequirement {}
    patterned
    /// Security scheme names mapped to the scopes they require.
    schemes: List<String>;
}
