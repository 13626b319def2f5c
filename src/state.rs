use crate::engine::SchemaHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub schema: Arc<dyn SchemaHandle>,
}
