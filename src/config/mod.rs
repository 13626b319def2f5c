pub mod bridge;
pub mod env;
pub mod keys;
pub mod memory;
pub mod store;

use std::sync::Arc;

use anyhow::{Context, Result};

pub use bridge::{EngineConfig, EngineConfigBridge};
pub use env::EnvSource;
pub use memory::MapSource;
pub use store::{ConfigStore, ConfigValue, ConfigurationSource};

/// Builds the host store from `.env`, the process environment and an
/// application-level in-memory source.
pub fn host_store(app: Arc<MapSource>) -> ConfigStore {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }

    let env: Arc<dyn ConfigurationSource> = Arc::new(EnvSource::from_env());
    let app: Arc<dyn ConfigurationSource> = app;
    ConfigStore::new(vec![env, app])
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub context_path: String,
    pub graphql_mapping: String,
    pub ui_mapping: String,
    pub ui_enabled: bool,
}

impl ServerConfig {
    pub fn from_store(store: &ConfigStore) -> Result<Self> {
        let address = store
            .get(keys::host::SERVER_ADDRESS)
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let port = store
            .get(keys::host::SERVER_PORT)
            .unwrap_or_else(|| "8080".to_string())
            .trim()
            .parse::<u16>()
            .with_context(|| {
                format!(
                    "{} must be a valid port number (0-65535)",
                    keys::host::SERVER_PORT
                )
            })?;

        let context_path = store.get(keys::host::CONTEXT_PATH).unwrap_or_default();

        let graphql_mapping = store
            .get(keys::host::GRAPHQL_MAPPING)
            .unwrap_or_else(|| "graphql".to_string());

        let ui_mapping = store
            .get(keys::host::UI_MAPPING)
            .unwrap_or_else(|| "graphiql".to_string());

        let ui_enabled = store.get_bool(keys::host::UI_ENABLED).unwrap_or(true);

        Ok(ServerConfig {
            address,
            port,
            context_path,
            graphql_mapping,
            ui_mapping,
            ui_enabled,
        })
    }

    /// Context path in the form used for nesting routes, or `None` when the
    /// application is served from the root.
    pub fn nest_path(&self) -> Option<String> {
        let trimmed = self.context_path.trim_matches('/');
        (!trimmed.is_empty()).then(|| format!("/{}", trimmed))
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Context path: {}",
            if self.context_path.is_empty() { "/" } else { &self.context_path });
        tracing::info!("  GraphQL mapping: {}", self.graphql_mapping);
        tracing::info!("  GraphQL UI: {}",
            if self.ui_enabled { self.ui_mapping.as_str() } else { "disabled" });
        tracing::info!("  Service listening on: {}:{}", self.address, self.port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_from_env(vars: &[(&str, &str)]) -> ConfigStore {
        ConfigStore::new(vec![Arc::new(EnvSource::from_vars(vars.iter().copied()))])
    }

    #[test]
    fn test_config_with_all_vars() {
        let store = store_from_env(&[
            ("KUMULUZEE_SERVER_HTTP_ADDRESS", "127.0.0.1"),
            ("KUMULUZEE_SERVER_HTTP_PORT", "9090"),
            ("KUMULUZEE_SERVER_CONTEXT_PATH", "/v1"),
            ("KUMULUZEE_GRAPHQL_MAPPING", "/api/graphql/"),
            ("KUMULUZEE_GRAPHQL_UI_MAPPING", "explorer"),
            ("KUMULUZEE_GRAPHQL_UI_ENABLED", "false"),
        ]);

        let config = ServerConfig::from_store(&store).unwrap();

        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.context_path, "/v1");
        assert_eq!(config.graphql_mapping, "/api/graphql/");
        assert_eq!(config.ui_mapping, "explorer");
        assert!(!config.ui_enabled);
    }

    #[test]
    fn test_config_with_defaults() {
        let config = ServerConfig::from_store(&store_from_env(&[])).unwrap();

        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.context_path, "");
        assert_eq!(config.graphql_mapping, "graphql");
        assert_eq!(config.ui_mapping, "graphiql");
        assert!(config.ui_enabled);
    }

    #[test]
    fn test_invalid_port() {
        let store = store_from_env(&[("KUMULUZEE_SERVER_HTTP_PORT", "not-a-number")]);

        let result = ServerConfig::from_store(&store);
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains(keys::host::SERVER_PORT));
    }

    #[test]
    fn test_port_out_of_range() {
        let store = store_from_env(&[("KUMULUZEE_SERVER_HTTP_PORT", "99999")]);
        assert!(ServerConfig::from_store(&store).is_err());
    }

    #[test]
    fn test_application_source_below_env() {
        let app = MapSource::application();
        app.insert(keys::host::SERVER_PORT, "7000");
        app.insert(keys::host::UI_MAPPING, "playground");
        let env = EnvSource::from_vars([("KUMULUZEE_SERVER_HTTP_PORT", "7001")]);
        let store = ConfigStore::new(vec![Arc::new(app), Arc::new(env)]);

        let config = ServerConfig::from_store(&store).unwrap();

        assert_eq!(config.port, 7001);
        assert_eq!(config.ui_mapping, "playground");
    }

    #[test]
    fn test_nest_path() {
        let mut config = ServerConfig::from_store(&store_from_env(&[])).unwrap();
        assert_eq!(config.nest_path(), None);

        config.context_path = "/".to_string();
        assert_eq!(config.nest_path(), None);

        config.context_path = "v1/".to_string();
        assert_eq!(config.nest_path().as_deref(), Some("/v1"));
    }
}
