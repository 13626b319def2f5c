use std::sync::OnceLock;

use axum::http::Uri;
use thiserror::Error;

use crate::config::ConfigStore;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("URL must be relative : {0}. Extension not initialized.")]
    Absolute(String),
    #[error("Malformed url: {0}. Extension not initialized.")]
    Malformed(String),
}

/// Strips every leading and trailing slash and re-adds exactly one leading
/// slash.
pub fn normalize_mapping(mapping: &str) -> String {
    format!("/{}", mapping.trim_matches('/'))
}

fn has_scheme(path: &str) -> bool {
    path.parse::<Uri>()
        .map(|uri| uri.scheme().is_some())
        .unwrap_or(false)
}

/// Joins the context path with the normalized mapping and checks that the
/// result is a relative URL.
pub fn resolve_path(context_path: &str, mapping: &str) -> Result<String, PathError> {
    if has_scheme(mapping.trim()) {
        return Err(PathError::Absolute(mapping.to_string()));
    }

    let path = format!("{}{}", context_path, normalize_mapping(mapping));
    match path.parse::<Uri>() {
        Ok(uri) if uri.scheme().is_some() => Err(PathError::Absolute(path)),
        Ok(_) => Ok(path),
        Err(_) => Err(PathError::Malformed(path)),
    }
}

/// Segments the router would read as captures or wildcards.
fn routable(mount: &str) -> bool {
    !mount.contains(['{', '}'])
        && !mount
            .split('/')
            .any(|segment| segment.starts_with('*') || segment.starts_with(':'))
}

/// Router mount point for a configured mapping. Mappings that cannot be
/// mounted (absolute, normalizing to the root, or containing capture
/// syntax) fall back to `default`.
pub fn mount_path(mapping: &str, default: &str) -> String {
    let mount = normalize_mapping(mapping);
    if has_scheme(mapping.trim()) || mount == "/" || !routable(&mount) {
        let fallback = normalize_mapping(default);
        tracing::warn!("Cannot mount '{}', using {} instead", mapping, fallback);
        return fallback;
    }
    mount
}

/// Reads `key` (falling back to `default`) and resolves it against
/// `context_path`.
pub fn resolve_configured(
    store: &ConfigStore,
    context_path: &str,
    key: &str,
    default: &str,
) -> Result<String, PathError> {
    let mapping = store.get(key).unwrap_or_else(|| default.to_string());
    resolve_path(context_path, &mapping)
}

/// API and UI paths, each resolved once and kept for the life of the cache.
///
/// Concurrent first requests may both resolve a path; resolution is pure,
/// so whichever value is stored first is equal to the others.
#[derive(Debug, Default)]
pub struct PathCache {
    api: OnceLock<String>,
    ui: OnceLock<String>,
}

fn cached<'a, F>(slot: &'a OnceLock<String>, resolve: F) -> Result<&'a str, PathError>
where
    F: FnOnce() -> Result<String, PathError>,
{
    if let Some(path) = slot.get() {
        return Ok(path);
    }
    let path = resolve()?;
    Ok(slot.get_or_init(|| path))
}

impl PathCache {
    pub fn new() -> Self {
        PathCache::default()
    }

    pub fn api(&self) -> Option<&str> {
        self.api.get().map(String::as_str)
    }

    pub fn ui(&self) -> Option<&str> {
        self.ui.get().map(String::as_str)
    }

    pub fn api_or_resolve<F>(&self, resolve: F) -> Result<&str, PathError>
    where
        F: FnOnce() -> Result<String, PathError>,
    {
        cached(&self.api, resolve)
    }

    pub fn ui_or_resolve<F>(&self, resolve: F) -> Result<&str, PathError>
    where
        F: FnOnce() -> Result<String, PathError>,
    {
        cached(&self.ui, resolve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mapping() {
        assert_eq!(normalize_mapping("graphql"), "/graphql");
        assert_eq!(normalize_mapping("/graphql"), "/graphql");
        assert_eq!(normalize_mapping("///graphql//"), "/graphql");
        assert_eq!(normalize_mapping("api/graphql/"), "/api/graphql");
        assert_eq!(normalize_mapping(""), "/");
    }

    #[test]
    fn test_resolve_with_context_path() {
        assert_eq!(resolve_path("", "graphql").unwrap(), "/graphql");
        assert_eq!(resolve_path("/v1", "/graphiql/").unwrap(), "/v1/graphiql");
        assert_eq!(resolve_path("/shop/v2", "api//").unwrap(), "/shop/v2/api");
    }

    #[test]
    fn test_absolute_mapping_rejected() {
        let err = resolve_path("", "http://x/y").unwrap_err();
        assert_eq!(err, PathError::Absolute("http://x/y".to_string()));
        assert_eq!(
            err.to_string(),
            "URL must be relative : http://x/y. Extension not initialized."
        );
    }

    #[test]
    fn test_absolute_context_path_rejected() {
        let err = resolve_path("https://example.com", "graphql").unwrap_err();
        assert_eq!(
            err,
            PathError::Absolute("https://example.com/graphql".to_string())
        );
    }

    #[test]
    fn test_malformed_path_rejected() {
        let err = resolve_path("", "graph ql").unwrap_err();
        assert_eq!(err, PathError::Malformed("/graph ql".to_string()));
        assert!(err.to_string().starts_with("Malformed url: /graph ql."));
    }

    #[test]
    fn test_mount_path() {
        assert_eq!(mount_path("/explorer/", "graphiql"), "/explorer");
        assert_eq!(mount_path("tools/graphiql", "graphiql"), "/tools/graphiql");
        assert_eq!(mount_path("http://x/y", "graphiql"), "/graphiql");
        assert_eq!(mount_path("//", "graphql"), "/graphql");
        assert_eq!(mount_path("tools/*", "graphiql"), "/graphiql");
        assert_eq!(mount_path("tools/*all", "graphiql"), "/graphiql");
        assert_eq!(mount_path(":id/ui", "graphiql"), "/graphiql");
        assert_eq!(mount_path("ui/{name}", "graphiql"), "/graphiql");
        assert_eq!(mount_path("a}b", "graphiql"), "/graphiql");
        assert_eq!(mount_path("v1.0/ui-*", "graphiql"), "/v1.0/ui-*");
    }

    #[test]
    fn test_cache_resolves_once() {
        let cache = PathCache::new();
        let mut calls = 0;

        let first = cache
            .api_or_resolve(|| {
                calls += 1;
                Ok("/graphql".to_string())
            })
            .unwrap()
            .to_string();
        let second = cache
            .api_or_resolve(|| {
                calls += 1;
                Ok("/other".to_string())
            })
            .unwrap();

        assert_eq!(first, "/graphql");
        assert_eq!(second, "/graphql");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_failed_resolution_not_cached() {
        let cache = PathCache::new();

        let failed = cache.ui_or_resolve(|| Err(PathError::Malformed("x".to_string())));
        assert!(failed.is_err());
        assert_eq!(cache.ui(), None);

        let resolved = cache.ui_or_resolve(|| Ok("/graphiql".to_string())).unwrap();
        assert_eq!(resolved, "/graphiql");
        assert_eq!(cache.ui(), Some("/graphiql"));
        assert_eq!(cache.api(), None);
    }
}
