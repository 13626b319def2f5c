pub mod graphql;
pub mod health;
pub mod ui;

pub use graphql::{graphql_handler, schema_sdl_handler};
pub use health::health_handler;
