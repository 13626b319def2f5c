use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// GraphQL request body, as accepted on POST
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequestBody {
    pub query: String,
    pub operation_name: Option<String>,
    pub variables: Option<JsonValue>,
}

/// A single error entry in a GraphQL response
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct GraphQLErrorEntry {
    pub message: String,
    pub path: Option<Vec<JsonValue>>,
    pub extensions: Option<JsonValue>,
}

/// GraphQL response body
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct GraphQLResponseBody {
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLErrorEntry>,
}
