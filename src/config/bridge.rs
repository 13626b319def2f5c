use std::sync::Arc;

use super::keys::{engine, host};
use super::store::{ConfigStore, ConfigValue, ConfigurationSource};

/// Kept below every regular source so that engine-native keys set
/// explicitly by the user take precedence over the translated ones.
pub const BRIDGE_ORDINAL: i32 = 10;

/// Engine scalar key -> host key.
const SCALAR_KEYS: &[(&str, &str)] = &[
    (engine::DEFAULT_ERROR_MESSAGE, host::DEFAULT_ERROR_MESSAGE),
    (engine::SCHEMA_INCLUDE_SCALARS, host::SCHEMA_INCLUDE_SCALARS),
    (engine::SCHEMA_INCLUDE_DEFINITION, host::SCHEMA_INCLUDE_DEFINITION),
    (engine::SCHEMA_INCLUDE_DIRECTIVES, host::SCHEMA_INCLUDE_DIRECTIVES),
    (
        engine::SCHEMA_INCLUDE_INTROSPECTION_TYPES,
        host::SCHEMA_INCLUDE_INTROSPECTION_TYPES,
    ),
    (engine::ENABLE_METRICS, host::METRICS_ENABLED),
    (engine::ENABLE_FEDERATION, host::FEDERATION_ENABLED),
    (
        engine::ENABLE_FEDERATION_BATCH_RESOLVING,
        host::FEDERATION_BATCH_RESOLVING,
    ),
];

/// Engine list key -> host key. Host lists are comma-joined on read.
const LIST_KEYS: &[(&str, &str)] = &[
    (engine::HIDE_ERROR_MESSAGE, host::HIDE_ERROR_MESSAGE),
    (engine::SHOW_ERROR_MESSAGE, host::SHOW_ERROR_MESSAGE),
];

/// Error types whose messages are always shown unless
/// `include-show-error-defaults` is false. Order is significant.
pub const SHOW_ERROR_DEFAULTS: [&str; 5] = [
    "com.kumuluz.ee.rest.exceptions.InvalidEntityFieldException",
    "com.kumuluz.ee.rest.exceptions.InvalidFieldValueException",
    "com.kumuluz.ee.rest.exceptions.NoGenericTypeException",
    "com.kumuluz.ee.rest.exceptions.NoSuchEntityFieldException",
    "com.kumuluz.ee.rest.exceptions.QueryFormatException",
];

/// Answers engine configuration keys from the host namespace.
///
/// Read-only and untyped: only [`get`](ConfigurationSource::get) returns
/// values, every other accessor is empty and writes are dropped.
pub struct EngineConfigBridge {
    host: ConfigStore,
}

impl EngineConfigBridge {
    pub fn new(host: ConfigStore) -> Self {
        EngineConfigBridge { host }
    }

    fn scalar_key(key: &str) -> Option<&'static str> {
        SCALAR_KEYS.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn list_key(key: &str) -> Option<&'static str> {
        LIST_KEYS.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn read_list(&self, host_key: &str) -> Option<String> {
        let joined = self.host.get_list(host_key).map(|items| items.join(","));

        if host_key == host::SHOW_ERROR_MESSAGE
            && self
                .host
                .get_bool(host::INCLUDE_SHOW_ERROR_DEFAULTS)
                .unwrap_or(true)
        {
            let defaults = SHOW_ERROR_DEFAULTS.join(",");
            return Some(match joined {
                Some(configured) => format!("{},{}", defaults, configured),
                None => defaults,
            });
        }

        joined
    }
}

impl ConfigurationSource for EngineConfigBridge {
    fn name(&self) -> &str {
        "engine-bridge"
    }

    fn ordinal(&self) -> i32 {
        BRIDGE_ORDINAL
    }

    /// The engine reads the federation flag from the override layer
    /// directly instead of going through the sources, so it is copied there.
    fn init(&self, store: &ConfigStore) {
        let federation = self
            .get(engine::ENABLE_FEDERATION)
            .unwrap_or_else(|| "true".to_string());
        tracing::debug!(federation = %federation, "Publishing federation flag to engine overrides");
        store.set_override(engine::ENABLE_FEDERATION, federation);
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(host_key) = Self::scalar_key(key) {
            return self.host.get(host_key);
        }
        if let Some(host_key) = Self::list_key(key) {
            return self.read_list(host_key);
        }
        None
    }

    fn get_bool(&self, _key: &str) -> Option<bool> {
        None
    }

    fn get_i32(&self, _key: &str) -> Option<i32> {
        None
    }

    fn get_i64(&self, _key: &str) -> Option<i64> {
        None
    }

    fn get_f64(&self, _key: &str) -> Option<f64> {
        None
    }

    fn get_f32(&self, _key: &str) -> Option<f32> {
        None
    }

    fn get_list_size(&self, _key: &str) -> Option<usize> {
        None
    }

    fn get_map_keys(&self, _key: &str) -> Option<Vec<String>> {
        None
    }

    fn watch(&self, _key: &str) {}

    fn set(&self, _key: &str, _value: ConfigValue) {}
}

/// The configuration surface seen by the engine: the host store with the
/// bridge layered underneath it.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    store: ConfigStore,
}

impl EngineConfig {
    pub fn new(host: &ConfigStore) -> Self {
        let bridge = Arc::new(EngineConfigBridge::new(host.clone()));
        EngineConfig {
            store: host.with_source(bridge),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// Engine flags are read as strings, since the bridge does not answer
    /// typed lookups.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.store
            .get(key)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Splits a comma-joined engine list.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.store
            .get(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
