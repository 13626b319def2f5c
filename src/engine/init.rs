use std::sync::{Arc, OnceLock};

use async_graphql::{extensions, ObjectType, Request, Response, Schema, SchemaBuilder, SubscriptionType};
use futures::future::{BoxFuture, FutureExt};

use super::{EngineSettings, ErrorMasking};
use crate::config::keys::host;
use crate::config::{ConfigStore, EngineConfig};

/// A finished schema together with its printed SDL.
#[derive(Clone)]
pub struct RegisteredSchema<E> {
    pub executor: E,
    pub sdl: String,
}

/// Capability handed to the initializer by the host for publishing the
/// built schema.
pub trait SchemaRegistry<E>: Send + Sync {
    fn register(&self, schema: RegisteredSchema<E>);
}

/// Write-once registry shared between the initializer and request handlers.
pub struct SchemaSlot<E> {
    inner: Arc<OnceLock<RegisteredSchema<E>>>,
}

impl<E> SchemaSlot<E> {
    pub fn new() -> Self {
        SchemaSlot {
            inner: Arc::new(OnceLock::new()),
        }
    }

    pub fn get(&self) -> Option<&RegisteredSchema<E>> {
        self.inner.get()
    }

    pub fn is_registered(&self) -> bool {
        self.inner.get().is_some()
    }
}

impl<E> Default for SchemaSlot<E> {
    fn default() -> Self {
        SchemaSlot::new()
    }
}

impl<E> Clone for SchemaSlot<E> {
    fn clone(&self) -> Self {
        SchemaSlot {
            inner: self.inner.clone(),
        }
    }
}

impl<E: Send + Sync> SchemaRegistry<E> for SchemaSlot<E> {
    fn register(&self, schema: RegisteredSchema<E>) {
        if self.inner.set(schema).is_err() {
            tracing::warn!("GraphQL schema already registered, ignoring second registration");
        }
    }
}

/// Object-safe view of a registered schema, so request handlers do not
/// carry the schema's root types.
pub trait DynSchema: Send + Sync {
    fn execute(&self, request: Request) -> BoxFuture<'_, Response>;
    fn sdl(&self) -> &str;
}

impl<Q, M, S> DynSchema for RegisteredSchema<Schema<Q, M, S>>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    fn execute(&self, request: Request) -> BoxFuture<'_, Response> {
        self.executor.execute(request).boxed()
    }

    fn sdl(&self) -> &str {
        &self.sdl
    }
}

/// Where handlers look up the schema. `None` until the initializer has
/// registered one.
pub trait SchemaHandle: Send + Sync {
    fn current(&self) -> Option<&dyn DynSchema>;
}

impl<Q, M, S> SchemaHandle for SchemaSlot<Schema<Q, M, S>>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    fn current(&self) -> Option<&dyn DynSchema> {
        self.get().map(|schema| schema as &dyn DynSchema)
    }
}

/// Builds the engine schema once at startup and registers it with the host.
pub struct SchemaInitializer {
    settings: EngineSettings,
    verbose: bool,
}

impl SchemaInitializer {
    pub fn new(settings: EngineSettings, verbose: bool) -> Self {
        SchemaInitializer { settings, verbose }
    }

    /// Reads engine settings through the configuration bridge.
    pub fn from_config(store: &ConfigStore) -> Self {
        let engine = EngineConfig::new(store);
        let settings = EngineSettings::from_config(&engine);
        let verbose = store.get_bool(host::SCANNING_DEBUG).unwrap_or(false);
        tracing::debug!(?settings, "GraphQL engine settings resolved");
        SchemaInitializer::new(settings, verbose)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Finishes the schema returned by `build` with the configured engine
    /// options and registers it.
    pub fn initialize<Q, M, S, F>(
        &self,
        build: F,
        registry: &dyn SchemaRegistry<Schema<Q, M, S>>,
    ) -> Schema<Q, M, S>
    where
        Q: ObjectType + 'static,
        M: ObjectType + 'static,
        S: SubscriptionType + 'static,
        F: FnOnce(&EngineSettings) -> SchemaBuilder<Q, M, S>,
    {
        let mut builder = build(&self.settings);

        if self.settings.federation_enabled {
            builder = builder.enable_federation();
        }
        if self.settings.metrics_enabled {
            builder = builder.extension(extensions::Tracing);
        }
        builder = builder.extension(ErrorMasking::new(self.settings.error_policy()));

        let schema = builder.finish();

        let printer = self.settings.printer();
        let sdl = printer.print(&schema.sdl_with_options(printer.export_options()));
        if self.verbose {
            tracing::info!("GraphQL schema initialized: \n{}", sdl);
        } else {
            tracing::debug!("GraphQL schema initialized: \n{}", sdl);
        }

        registry.register(RegisteredSchema {
            executor: schema.clone(),
            sdl,
        });

        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSource;
    use crate::engine::ResolverError;
    use async_graphql::{EmptyMutation, EmptySubscription, Object, Result};

    struct Query;

    #[Object]
    impl Query {
        async fn greeting(&self) -> &str {
            "hello"
        }

        async fn broken(&self) -> Result<i32> {
            Err(ResolverError::internal("com.acme.Broken", "stack trace here").into())
        }
    }

    type TestSchema = Schema<Query, EmptyMutation, EmptySubscription>;

    fn builder(_: &EngineSettings) -> SchemaBuilder<Query, EmptyMutation, EmptySubscription> {
        Schema::build(Query, EmptyMutation, EmptySubscription)
    }

    fn store_with(app: MapSource) -> ConfigStore {
        ConfigStore::new(vec![Arc::new(app)])
    }

    #[tokio::test]
    async fn test_initialize_registers_schema() {
        let slot: SchemaSlot<TestSchema> = SchemaSlot::new();
        let initializer = SchemaInitializer::from_config(&store_with(MapSource::application()));

        assert!(!slot.is_registered());
        initializer.initialize(builder, &slot);
        assert!(slot.is_registered());

        let registered = slot.get().unwrap();
        assert!(registered.sdl.contains("type Query"));
        assert!(registered.sdl.contains("greeting: String!"));

        let response = registered.executor.execute("{ greeting }").await;
        assert!(response.errors.is_empty());
        assert_eq!(
            response.data.into_json().unwrap(),
            serde_json::json!({ "greeting": "hello" })
        );
    }

    #[tokio::test]
    async fn test_second_registration_ignored() {
        let slot: SchemaSlot<TestSchema> = SchemaSlot::new();
        let initializer = SchemaInitializer::new(EngineSettings::default(), false);

        initializer.initialize(builder, &slot);
        let first_sdl = slot.get().unwrap().sdl.clone();
        initializer.initialize(builder, &slot);

        assert_eq!(slot.get().unwrap().sdl, first_sdl);
    }

    #[tokio::test]
    async fn test_default_message_applied() {
        let app = MapSource::application();
        app.insert(host::DEFAULT_ERROR_MESSAGE, "Something went wrong");
        let slot: SchemaSlot<TestSchema> = SchemaSlot::new();

        let schema = SchemaInitializer::from_config(&store_with(app)).initialize(builder, &slot);
        let response = schema.execute("{ broken }").await;

        assert_eq!(response.errors[0].message, "Something went wrong");
    }

    #[tokio::test]
    async fn test_show_list_from_host_config() {
        let app = MapSource::application();
        app.insert_list(host::SHOW_ERROR_MESSAGE, ["com.acme.Broken"]);
        let slot: SchemaSlot<TestSchema> = SchemaSlot::new();

        let schema = SchemaInitializer::from_config(&store_with(app)).initialize(builder, &slot);
        let response = schema.execute("{ broken }").await;

        assert_eq!(response.errors[0].message, "stack trace here");
    }

    #[tokio::test]
    async fn test_handle_exposes_registered_schema() {
        let slot: SchemaSlot<TestSchema> = SchemaSlot::new();
        let handle: &dyn SchemaHandle = &slot;
        assert!(handle.current().is_none());

        SchemaInitializer::new(EngineSettings::default(), false).initialize(builder, &slot);

        let schema = handle.current().unwrap();
        assert!(schema.sdl().contains("greeting"));
        let response = schema.execute(Request::new("{ greeting }")).await;
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_scanning_debug_enables_verbose_logging() {
        let app = MapSource::application();
        app.insert(host::SCANNING_DEBUG, "true");
        let initializer = SchemaInitializer::from_config(&store_with(app));
        assert!(initializer.verbose);
        assert!(initializer.settings().federation_enabled);
    }
}
