// Route path constants for the fixed parts of the API.
// The GraphQL endpoint and UI mount come from configuration.

pub const HEALTH: &str = "/health";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Default GraphQL endpoint, used for the OpenAPI document.
pub const GRAPHQL: &str = "/graphql";
/// Appended to the GraphQL endpoint path.
pub const SCHEMA_SDL: &str = "/schema.graphql";
pub const GRAPHQL_SCHEMA: &str = "/graphql/schema.graphql";
