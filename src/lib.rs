//! GraphQL service with a configuration bridge into the engine and a
//! bundled GraphiQL explorer.

pub mod api_doc;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;
pub mod ui;
