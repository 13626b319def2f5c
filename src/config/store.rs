use std::fmt;
use std::sync::Arc;

use super::memory::MapSource;

/// Ordinal of the override layer. Matches the precedence of process-wide
/// system properties, above every regular source.
pub const OVERRIDE_ORDINAL: i32 = 400;

/// A typed value accepted by [`ConfigurationSource::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(v) => f.write_str(v),
            ConfigValue::Bool(v) => write!(f, "{}", v),
            ConfigValue::Int(v) => write!(f, "{}", v),
            ConfigValue::Long(v) => write!(f, "{}", v),
            ConfigValue::Double(v) => write!(f, "{}", v),
            ConfigValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

/// A single layer of configuration.
///
/// Lists are addressed through indexed keys (`key[0]`, `key[1]`, ...) and
/// their length through [`get_list_size`](Self::get_list_size). The typed
/// getters parse the string value unless a source overrides them.
pub trait ConfigurationSource: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Higher ordinals take precedence.
    fn ordinal(&self) -> i32;

    /// Called once when the source is added to a store.
    fn init(&self, _store: &ConfigStore) {}

    fn get(&self, key: &str) -> Option<String>;

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| parse_bool(&v))
    }

    fn get_i32(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn get_f32(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn get_list_size(&self, key: &str) -> Option<usize>;

    fn get_map_keys(&self, key: &str) -> Option<Vec<String>>;

    fn watch(&self, key: &str);

    fn set(&self, key: &str, value: ConfigValue);
}

/// Builds the key of the list element at `index`.
pub fn list_key(key: &str, index: usize) -> String {
    format!("{}[{}]", key, index)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Layered configuration store.
///
/// Sources are consulted from the highest ordinal down and the first answer
/// wins. Every store carries an override layer at [`OVERRIDE_ORDINAL`]
/// that can be written through [`set_override`](Self::set_override).
#[derive(Clone)]
pub struct ConfigStore {
    sources: Vec<Arc<dyn ConfigurationSource>>,
    overrides: Arc<MapSource>,
}

impl ConfigStore {
    pub fn new(sources: Vec<Arc<dyn ConfigurationSource>>) -> Self {
        let overrides = Arc::new(MapSource::new("overrides", OVERRIDE_ORDINAL));
        let mut store = ConfigStore {
            sources: vec![overrides.clone() as Arc<dyn ConfigurationSource>],
            overrides,
        };
        for source in sources {
            store = store.with_source(source);
        }
        store
    }

    /// Returns a store sharing this store's sources (and override layer)
    /// with `source` added at its ordinal.
    pub fn with_source(&self, source: Arc<dyn ConfigurationSource>) -> Self {
        let mut sources = self.sources.clone();
        let position = sources
            .iter()
            .position(|s| s.ordinal() < source.ordinal())
            .unwrap_or(sources.len());
        sources.insert(position, source.clone());

        let store = ConfigStore {
            sources,
            overrides: self.overrides.clone(),
        };
        tracing::debug!(
            source = source.name(),
            ordinal = source.ordinal(),
            "Configuration source registered"
        );
        source.init(&store);
        store
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|s| s.get(key))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.sources.iter().find_map(|s| s.get_bool(key))
    }

    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.sources.iter().find_map(|s| s.get_i32(key))
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.sources.iter().find_map(|s| s.get_i64(key))
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.sources.iter().find_map(|s| s.get_f64(key))
    }

    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.sources.iter().find_map(|s| s.get_f32(key))
    }

    pub fn get_list_size(&self, key: &str) -> Option<usize> {
        self.sources.iter().find_map(|s| s.get_list_size(key))
    }

    /// Reads a list stored as indexed keys. Elements missing from every
    /// source are skipped.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        let size = self.get_list_size(key)?;
        Some(
            (0..size)
                .filter_map(|index| self.get(&list_key(key, index)))
                .collect(),
        )
    }

    pub fn get_map_keys(&self, key: &str) -> Option<Vec<String>> {
        self.sources.iter().find_map(|s| s.get_map_keys(key))
    }

    /// Writes into the override layer, shadowing every other source.
    pub fn set_override(&self, key: &str, value: impl Into<ConfigValue>) {
        self.overrides.set(key, value.into());
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        ConfigStore::new(Vec::new())
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("sources", &self.source_names())
            .finish()
    }
}
