use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

use super::store::{list_key, ConfigValue, ConfigurationSource};

/// Default ordinal for in-memory application configuration.
pub const APP_ORDINAL: i32 = 100;

/// Mutable in-memory configuration source.
#[derive(Debug)]
pub struct MapSource {
    name: String,
    ordinal: i32,
    values: RwLock<BTreeMap<String, String>>,
}

impl MapSource {
    pub fn new(name: impl Into<String>, ordinal: i32) -> Self {
        MapSource {
            name: name.into(),
            ordinal,
            values: RwLock::new(BTreeMap::new()),
        }
    }

    /// Application-level source at [`APP_ORDINAL`].
    pub fn application() -> Self {
        MapSource::new("application", APP_ORDINAL)
    }

    pub fn insert(&self, key: &str, value: impl Into<String>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.into());
    }

    /// Stores `items` under indexed keys, replacing any previous list.
    pub fn insert_list<I, S>(&self, key: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let prefix = format!("{}[", key);
        values.retain(|k, _| !k.starts_with(&prefix));
        for (index, item) in items.into_iter().enumerate() {
            values.insert(list_key(key, index), item.into());
        }
    }
}

impl ConfigurationSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn get_list_size(&self, key: &str) -> Option<usize> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let size = (0..)
            .take_while(|index| values.contains_key(&list_key(key, *index)))
            .count();
        (size > 0).then_some(size)
    }

    fn get_map_keys(&self, key: &str) -> Option<Vec<String>> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let prefix = format!("{}.", key);
        let keys: BTreeSet<String> = values
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .map(|rest| {
                rest.split(['.', '[']).next().unwrap_or(rest).to_string()
            })
            .filter(|k| !k.is_empty())
            .collect();
        (!keys.is_empty()).then(|| keys.into_iter().collect())
    }

    fn watch(&self, key: &str) {
        tracing::trace!(source = %self.name, key, "Watch ignored, in-memory values change only via set");
    }

    fn set(&self, key: &str, value: ConfigValue) {
        self.insert(key, value.to_string());
    }
}
