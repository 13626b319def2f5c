//! GraphQL engine integration.
//!
//! The engine itself is async-graphql. This module turns the engine-side
//! configuration keys into [`EngineSettings`] and applies them while the
//! schema is built.

pub mod errors;
pub mod init;
pub mod printer;

use crate::config::keys::engine;
use crate::config::EngineConfig;

pub use errors::{ErrorMasking, ErrorMessagePolicy, ResolverError};
pub use init::{
    DynSchema, RegisteredSchema, SchemaHandle, SchemaInitializer, SchemaRegistry, SchemaSlot,
};
pub use printer::SchemaPrinter;

pub const DEFAULT_ERROR_MESSAGE: &str = "Server Error";

/// Engine options resolved from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub default_error_message: String,
    pub include_scalars: bool,
    pub include_schema_definition: bool,
    pub include_directives: bool,
    pub include_introspection_types: bool,
    pub metrics_enabled: bool,
    pub federation_enabled: bool,
    pub federation_batch_resolving: bool,
    pub hide_error_message: Vec<String>,
    pub show_error_message: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            default_error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            include_scalars: true,
            include_schema_definition: false,
            include_directives: false,
            include_introspection_types: false,
            metrics_enabled: false,
            federation_enabled: true,
            federation_batch_resolving: false,
            hide_error_message: Vec::new(),
            show_error_message: Vec::new(),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &EngineConfig) -> Self {
        let defaults = EngineSettings::default();
        let flag = |key: &str, default: bool| config.get_bool(key).unwrap_or(default);

        EngineSettings {
            default_error_message: config
                .get(engine::DEFAULT_ERROR_MESSAGE)
                .unwrap_or(defaults.default_error_message),
            include_scalars: flag(engine::SCHEMA_INCLUDE_SCALARS, defaults.include_scalars),
            include_schema_definition: flag(
                engine::SCHEMA_INCLUDE_DEFINITION,
                defaults.include_schema_definition,
            ),
            include_directives: flag(engine::SCHEMA_INCLUDE_DIRECTIVES, defaults.include_directives),
            include_introspection_types: flag(
                engine::SCHEMA_INCLUDE_INTROSPECTION_TYPES,
                defaults.include_introspection_types,
            ),
            metrics_enabled: flag(engine::ENABLE_METRICS, defaults.metrics_enabled),
            federation_enabled: flag(engine::ENABLE_FEDERATION, defaults.federation_enabled),
            federation_batch_resolving: flag(
                engine::ENABLE_FEDERATION_BATCH_RESOLVING,
                defaults.federation_batch_resolving,
            ),
            hide_error_message: config.get_list(engine::HIDE_ERROR_MESSAGE),
            show_error_message: config.get_list(engine::SHOW_ERROR_MESSAGE),
        }
    }

    pub fn error_policy(&self) -> ErrorMessagePolicy {
        ErrorMessagePolicy::new(
            self.default_error_message.clone(),
            self.show_error_message.clone(),
            self.hide_error_message.clone(),
        )
    }

    pub fn printer(&self) -> SchemaPrinter {
        SchemaPrinter::from_settings(self)
    }
}
