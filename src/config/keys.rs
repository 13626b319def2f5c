//! Configuration key names.
//!
//! `host` keys live in the application namespace; `engine` keys are the
//! names the GraphQL engine asks for and are answered through the bridge.

pub mod host {
    pub const SERVER_ADDRESS: &str = "kumuluzee.server.http.address";
    pub const SERVER_PORT: &str = "kumuluzee.server.http.port";
    pub const CONTEXT_PATH: &str = "kumuluzee.server.context-path";

    pub const GRAPHQL_MAPPING: &str = "kumuluzee.graphql.mapping";
    pub const UI_MAPPING: &str = "kumuluzee.graphql.ui.mapping";
    pub const UI_ENABLED: &str = "kumuluzee.graphql.ui.enabled";

    pub const DEFAULT_ERROR_MESSAGE: &str = "kumuluzee.graphql.exceptions.default-error-message";
    pub const HIDE_ERROR_MESSAGE: &str = "kumuluzee.graphql.exceptions.hide-error-message";
    pub const SHOW_ERROR_MESSAGE: &str = "kumuluzee.graphql.exceptions.show-error-message";
    pub const INCLUDE_SHOW_ERROR_DEFAULTS: &str =
        "kumuluzee.graphql.exceptions.include-show-error-defaults";

    pub const SCHEMA_INCLUDE_SCALARS: &str = "kumuluzee.graphql.schema.include-scalars";
    pub const SCHEMA_INCLUDE_DEFINITION: &str = "kumuluzee.graphql.schema.include-schema-definition";
    pub const SCHEMA_INCLUDE_DIRECTIVES: &str = "kumuluzee.graphql.schema.include-directives";
    pub const SCHEMA_INCLUDE_INTROSPECTION_TYPES: &str =
        "kumuluzee.graphql.schema.include-introspection-types";

    pub const METRICS_ENABLED: &str = "kumuluzee.graphql.metrics.enabled";
    pub const FEDERATION_ENABLED: &str = "kumuluzee.graphql.federation.enabled";
    pub const FEDERATION_BATCH_RESOLVING: &str =
        "kumuluzee.graphql.federation.enabled-federation-batch-resolving";

    pub const SCANNING_DEBUG: &str = "kumuluzee.graphql.scanning.debug";
}

pub mod engine {
    pub const DEFAULT_ERROR_MESSAGE: &str = "mp.graphql.defaultErrorMessage";
    pub const HIDE_ERROR_MESSAGE: &str = "mp.graphql.hideErrorMessage";
    pub const SHOW_ERROR_MESSAGE: &str = "mp.graphql.showErrorMessage";

    pub const SCHEMA_INCLUDE_SCALARS: &str = "smallrye.graphql.schema.includeScalars";
    pub const SCHEMA_INCLUDE_DEFINITION: &str = "smallrye.graphql.schema.includeSchemaDefinition";
    pub const SCHEMA_INCLUDE_DIRECTIVES: &str = "smallrye.graphql.schema.includeDirectives";
    pub const SCHEMA_INCLUDE_INTROSPECTION_TYPES: &str =
        "smallrye.graphql.schema.includeIntrospectionTypes";

    pub const ENABLE_METRICS: &str = "smallrye.graphql.metrics.enabled";
    pub const ENABLE_FEDERATION: &str = "smallrye.graphql.federation.enabled";
    pub const ENABLE_FEDERATION_BATCH_RESOLVING: &str =
        "smallrye.graphql.federation.batchResolving.enabled";
}
