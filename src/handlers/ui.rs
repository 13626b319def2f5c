use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    response::Response,
    routing::get,
    Router,
};

use crate::error::UiError;
use crate::ui::{GraphiqlUi, UiRequest};

/// Routes serving the GraphQL explorer below `mount`.
pub fn router(ui: Arc<GraphiqlUi>, mount: &str) -> Router {
    Router::new()
        .route(mount, get(mount_handler))
        .route(&format!("{}/", mount), get(index_handler))
        .route(&format!("{}/{{*file}}", mount), get(asset_handler))
        .with_state(ui)
}

/// GET <mount> - redirect to the trailing-slash form so relative links in
/// the page resolve below the mount
pub async fn mount_handler(
    State(ui): State<Arc<GraphiqlUi>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, UiError> {
    ui.respond(uri.path(), UiRequest::Mount)
}

/// GET <mount>/ - explorer entry page
pub async fn index_handler(
    State(ui): State<Arc<GraphiqlUi>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, UiError> {
    ui.respond(uri.path(), UiRequest::Root)
}

/// GET <mount>/{file} - bundled asset
pub async fn asset_handler(
    State(ui): State<Arc<GraphiqlUi>>,
    OriginalUri(uri): OriginalUri,
    Path(file): Path<String>,
) -> Result<Response, UiError> {
    ui.respond(uri.path(), UiRequest::File(&file))
}
