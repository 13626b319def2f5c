//! HTTP host: router assembly and serving.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::config::keys::host;
use crate::config::{ConfigStore, ServerConfig};
use crate::engine::SchemaHandle;
use crate::handlers;
use crate::routes;
use crate::state::AppState;
use crate::ui::paths::{mount_path, normalize_mapping, resolve_path};
use crate::ui::{GraphiqlUi, DEFAULT_GRAPHQL_MAPPING, DEFAULT_UI_MAPPING};

/// Routes registered before any configured mount.
const FIXED_ROUTES: [&str; 3] = [routes::HEALTH, routes::SWAGGER_UI, routes::OPENAPI_JSON];

/// Mount point for the mapping under `key`, or `None` when neither the
/// mapping nor `default` can be mounted beside `taken`.
///
/// A relative mapping replaced by the fallback is written to the store's
/// override layer, so the explorer's lazily resolved paths match the
/// router. Absolute mappings are left alone and keep their diagnostic.
fn mount_for(
    store: &ConfigStore,
    key: &str,
    mapping: &str,
    default: &str,
    taken: &[&str],
) -> Option<String> {
    let mut mount = mount_path(mapping, default);
    if taken.contains(&mount.as_str()) {
        let fallback = normalize_mapping(default);
        tracing::warn!("Mapping {} collides with another route, using {} instead", mount, fallback);
        if taken.contains(&fallback.as_str()) {
            return None;
        }
        mount = fallback;
    }

    if mount != normalize_mapping(mapping) && resolve_path("", mapping).is_ok() {
        store.set_override(key, mount.clone());
    }
    Some(mount)
}

/// Builds the application router.
///
/// `store` is the host configuration the explorer resolves its paths
/// from. Everything is nested under the configured context path.
pub fn app(config: &ServerConfig, store: ConfigStore, schema: Arc<dyn SchemaHandle>) -> Router {
    let api = mount_for(
        &store,
        host::GRAPHQL_MAPPING,
        &config.graphql_mapping,
        DEFAULT_GRAPHQL_MAPPING,
        &FIXED_ROUTES,
    )
    .unwrap_or_else(|| normalize_mapping(DEFAULT_GRAPHQL_MAPPING));
    let schema_sdl = format!("{}{}", api, routes::SCHEMA_SDL);

    let mut router = Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            &api,
            get(handlers::graphql_handler).post(handlers::graphql_handler),
        )
        .route(&schema_sdl, get(handlers::schema_sdl_handler))
        .with_state(AppState { schema })
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()));

    if config.ui_enabled {
        let mut taken = FIXED_ROUTES.to_vec();
        taken.extend([api.as_str(), schema_sdl.as_str()]);

        match mount_for(
            &store,
            host::UI_MAPPING,
            &config.ui_mapping,
            DEFAULT_UI_MAPPING,
            &taken,
        ) {
            Some(mount) => {
                tracing::debug!("GraphQL UI mounted at {}", mount);
                let ui = Arc::new(GraphiqlUi::new(store));
                router = router.merge(handlers::ui::router(ui, &mount));
            }
            None => tracing::warn!("No free mount for the GraphQL UI, UI disabled"),
        }
    }

    let router = match config.nest_path() {
        Some(context_path) => Router::new().nest(&context_path, router),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves `app` until Ctrl-C.
pub async fn serve(app: Router, config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("GraphQL server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
