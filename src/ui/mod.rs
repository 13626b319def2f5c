//! Bundled GraphQL explorer.
//!
//! Serves the upstream UI assets with a few rewrites so the explorer points
//! at the configured API path and carries the host's branding.

pub mod assets;
pub mod paths;
pub mod rewrite;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::keys::host;
use crate::config::ConfigStore;
use crate::error::UiError;
use assets::{AssetBundle, BundledVersions, EmbeddedBundle};
use paths::PathCache;
use rewrite::{Rewriter, INDEX_HTML};

pub const DEFAULT_GRAPHQL_MAPPING: &str = "graphql";
pub const DEFAULT_UI_MAPPING: &str = "graphiql";

/// What a UI request asked for, relative to the mount path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRequest<'a> {
    /// The mount path itself, without a trailing slash.
    Mount,
    /// The mount path with a trailing slash.
    Root,
    /// A file below the mount path.
    File(&'a str),
}

pub struct GraphiqlUi {
    config: ConfigStore,
    bundle: Arc<dyn AssetBundle>,
    versions: BundledVersions,
    paths: PathCache,
}

impl GraphiqlUi {
    pub fn new(config: ConfigStore) -> Self {
        GraphiqlUi::with_bundle(config, Arc::new(EmbeddedBundle), BundledVersions::bundled())
    }

    pub fn with_bundle(
        config: ConfigStore,
        bundle: Arc<dyn AssetBundle>,
        versions: BundledVersions,
    ) -> Self {
        GraphiqlUi {
            config,
            bundle,
            versions,
            paths: PathCache::new(),
        }
    }

    pub fn paths(&self) -> &PathCache {
        &self.paths
    }

    /// API and UI paths, resolving whichever is not cached yet. The API path
    /// is resolved first; if it fails the UI path is not attempted.
    fn resolve_paths(&self) -> Result<(&str, &str), UiError> {
        let context_path = self.config.get(host::CONTEXT_PATH).unwrap_or_default();

        let api = self.paths.api_or_resolve(|| {
            paths::resolve_configured(
                &self.config,
                &context_path,
                host::GRAPHQL_MAPPING,
                DEFAULT_GRAPHQL_MAPPING,
            )
        })?;
        let ui = self.paths.ui_or_resolve(|| {
            paths::resolve_configured(
                &self.config,
                &context_path,
                host::UI_MAPPING,
                DEFAULT_UI_MAPPING,
            )
        })?;

        Ok((api, ui))
    }

    /// Handles one UI request. `request_path` is the full path the client
    /// used, needed to build the trailing-slash redirect.
    pub fn respond(&self, request_path: &str, request: UiRequest<'_>) -> Result<Response, UiError> {
        let (api, ui) = self.resolve_paths()?;

        let file = match request {
            UiRequest::Mount => {
                let target = format!("{}/", request_path);
                tracing::debug!("Redirecting {} to {}", request_path, target);
                return Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response());
            }
            UiRequest::Root => INDEX_HTML,
            UiRequest::File(name) => name.strip_prefix('/').unwrap_or(name),
        };

        self.send_file(file, Some(api), Some(ui))
    }

    fn send_file(&self, file: &str, api: Option<&str>, ui: Option<&str>) -> Result<Response, UiError> {
        let resource = assets::resource_for(file);
        let bytes = self
            .bundle
            .open(&resource)
            .ok_or_else(|| UiError::AssetNotFound(resource.clone()))?;

        let rewriter = Rewriter {
            api_path: api,
            ui_path: ui,
            upstream_version: self.versions.upstream_version(),
        };

        let body = match rewriter.rewrite(file, &bytes) {
            Some(content) => {
                tracing::debug!("Serving rewritten {} from {}", file, resource);
                Body::from(content)
            }
            None => {
                tracing::trace!("Streaming {} from {} ({} bytes)", file, resource, bytes.len());
                Body::from_stream(assets::chunked(bytes))
            }
        };

        Ok(([(header::CONTENT_TYPE, assets::content_type(file))], body).into_response())
    }
}
