use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{GraphQLErrorEntry, GraphQLRequestBody, GraphQLResponseBody};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "kumuluz-graphql API",
        version = "0.1.0",
        description = "GraphQL endpoint with a bundled GraphiQL explorer"
    ),
    paths(
        handlers::health::health_handler,
        handlers::graphql::graphql_handler,
        handlers::graphql::schema_sdl_handler
    ),
    components(
        schemas(
            GraphQLRequestBody,
            GraphQLResponseBody,
            GraphQLErrorEntry,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "graphql", description = "GraphQL operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == crate::routes::HEALTH));
        assert!(paths.iter().any(|p| p.as_str() == crate::routes::GRAPHQL));
        assert!(paths.iter().any(|p| p.as_str() == crate::routes::GRAPHQL_SCHEMA));
    }
}
