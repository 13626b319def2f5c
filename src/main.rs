use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};
use tracing_subscriber::EnvFilter;

use kumuluz_graphql::config::{host_store, MapSource, ServerConfig};
use kumuluz_graphql::engine::{ResolverError, SchemaInitializer, SchemaSlot};
use kumuluz_graphql::server;

struct Query;

#[Object]
impl Query {
    /// Greets `name`, or the world.
    async fn hello(&self, name: Option<String>) -> async_graphql::Result<String> {
        match name.as_deref() {
            Some("") => Err(ResolverError::domain("InvalidName", "name must not be empty").into()),
            Some(name) => Ok(format!("Hello, {}!", name)),
            None => Ok("Hello, world!".to_string()),
        }
    }

    async fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

type AppSchema = Schema<Query, EmptyMutation, EmptySubscription>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("kumuluz-graphql starting");

    let store = host_store(Arc::new(MapSource::application()));
    let config = ServerConfig::from_store(&store)?;
    config.log_startup();

    let slot: SchemaSlot<AppSchema> = SchemaSlot::new();
    SchemaInitializer::from_config(&store).initialize(
        |_| Schema::build(Query, EmptyMutation, EmptySubscription),
        &slot,
    );

    let app = server::app(&config, store, Arc::new(slot));
    server::serve(app, &config).await
}
