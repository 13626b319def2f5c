use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::State, http::header, response::IntoResponse};

use crate::error::{ApiError, ErrorResponse};
use crate::models::{GraphQLRequestBody, GraphQLResponseBody};
use crate::routes;
use crate::state::AppState;

/// POST /graphql handler - Execute a GraphQL operation
///
/// Also accepts GET with the operation in the query string. The path is the
/// configured GraphQL mapping.
#[utoipa::path(
    post,
    path = routes::GRAPHQL,
    request_body = GraphQLRequestBody,
    responses(
        (status = 200, description = "Operation executed", body = GraphQLResponseBody),
        (status = 503, description = "Schema not initialized", body = ErrorResponse)
    ),
    tag = "graphql"
)]
pub async fn graphql_handler(
    State(state): State<AppState>,
    request: GraphQLRequest,
) -> Result<GraphQLResponse, ApiError> {
    let schema = state
        .schema
        .current()
        .ok_or(ApiError::SchemaNotInitialized)?;

    let response = schema.execute(request.into_inner()).await;
    if response.is_err() {
        tracing::debug!("GraphQL operation returned {} error(s)", response.errors.len());
    }

    Ok(response.into())
}

/// GET /graphql/schema.graphql handler - Printed schema
#[utoipa::path(
    get,
    path = routes::GRAPHQL_SCHEMA,
    responses(
        (status = 200, description = "Schema in SDL", body = String, content_type = "text/plain"),
        (status = 503, description = "Schema not initialized", body = ErrorResponse)
    ),
    tag = "graphql"
)]
pub async fn schema_sdl_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let schema = state
        .schema
        .current()
        .ok_or(ApiError::SchemaNotInitialized)?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        schema.sdl().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineSettings, ResolverError, SchemaInitializer, SchemaSlot};
    use async_graphql::{EmptyMutation, EmptySubscription, Object, Result, Schema};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Query;

    #[Object]
    impl Query {
        async fn add(&self, a: i32, b: i32) -> i32 {
            a + b
        }

        async fn failing(&self) -> Result<i32> {
            Err(ResolverError::internal("com.acme.Hidden", "db password wrong").into())
        }
    }

    type TestSchema = Schema<Query, EmptyMutation, EmptySubscription>;

    fn app(slot: SchemaSlot<TestSchema>) -> Router {
        Router::new()
            .route(routes::GRAPHQL, get(graphql_handler).post(graphql_handler))
            .route(routes::GRAPHQL_SCHEMA, get(schema_sdl_handler))
            .with_state(AppState {
                schema: Arc::new(slot),
            })
    }

    fn registered() -> SchemaSlot<TestSchema> {
        let slot = SchemaSlot::new();
        SchemaInitializer::new(EngineSettings::default(), false).initialize(
            |_| Schema::build(Query, EmptyMutation, EmptySubscription),
            &slot,
        );
        slot
    }

    async fn post(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(routes::GRAPHQL)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_post_query() {
        let (status, body) = post(
            app(registered()),
            json!({ "query": "query($a: Int!) { add(a: $a, b: 2) }", "variables": { "a": 40 } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["add"], 42);
    }

    #[tokio::test]
    async fn test_get_query() {
        let response = app(registered())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/graphql?query=%7B%20add(a%3A%201%2C%20b%3A%201)%20%7D")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["data"]["add"], 2);
    }

    #[tokio::test]
    async fn test_internal_error_masked() {
        let (status, body) = post(app(registered()), json!({ "query": "{ failing }" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["errors"][0]["message"], "Server Error");
    }

    #[tokio::test]
    async fn test_schema_not_initialized() {
        let (status, body) = post(app(SchemaSlot::new()), json!({ "query": "{ add(a: 1, b: 1) }" })).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("not initialized"));
    }

    #[tokio::test]
    async fn test_schema_sdl() {
        let response = app(registered())
            .oneshot(
                Request::builder()
                    .uri(routes::GRAPHQL_SCHEMA)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let sdl = String::from_utf8(body.to_vec()).unwrap();
        assert!(sdl.contains("add(a: Int!, b: Int!): Int!"));
    }
}
