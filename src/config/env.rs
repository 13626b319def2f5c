use std::collections::HashMap;

use super::store::{list_key, ConfigValue, ConfigurationSource};

pub const ENV_ORDINAL: i32 = 300;

/// Read-only snapshot of environment variables.
///
/// A key is looked up under every name produced by [`env_names`], so
/// `kumuluzee.server.context-path` matches both
/// `KUMULUZEE_SERVER_CONTEXT_PATH` and `KUMULUZEE_SERVER_CONTEXTPATH`.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshots the current process environment.
    pub fn from_env() -> Self {
        EnvSource::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvSource {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Candidate environment variable names for a configuration key.
pub fn env_names(key: &str) -> Vec<String> {
    let underscored = to_env_name(key, true);
    let dashless = to_env_name(key, false);
    if underscored == dashless {
        vec![underscored]
    } else {
        vec![underscored, dashless]
    }
}

fn to_env_name(key: &str, dash_as_underscore: bool) -> String {
    let mut name = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '-' if !dash_as_underscore => {}
            ']' => {}
            c if c.is_ascii_alphanumeric() => name.push(c.to_ascii_uppercase()),
            _ => name.push('_'),
        }
    }
    name
}

impl ConfigurationSource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn ordinal(&self) -> i32 {
        ENV_ORDINAL
    }

    fn get(&self, key: &str) -> Option<String> {
        env_names(key)
            .into_iter()
            .find_map(|name| self.vars.get(&name).cloned())
    }

    fn get_list_size(&self, key: &str) -> Option<usize> {
        let size = (0..)
            .take_while(|index| self.get(&list_key(key, *index)).is_some())
            .count();
        (size > 0).then_some(size)
    }

    fn get_map_keys(&self, _key: &str) -> Option<Vec<String>> {
        None
    }

    fn watch(&self, _key: &str) {}

    fn set(&self, key: &str, _value: ConfigValue) {
        tracing::warn!(key, "Environment configuration is read-only, ignoring set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_names() {
        assert_eq!(
            env_names("kumuluzee.server.context-path"),
            vec![
                "KUMULUZEE_SERVER_CONTEXT_PATH".to_string(),
                "KUMULUZEE_SERVER_CONTEXTPATH".to_string()
            ]
        );
        assert_eq!(
            env_names("mp.graphql.hideErrorMessage"),
            vec!["MP_GRAPHQL_HIDEERRORMESSAGE".to_string()]
        );
        assert_eq!(
            env_names("kumuluzee.dev.scan-libraries[2]"),
            vec![
                "KUMULUZEE_DEV_SCAN_LIBRARIES_2".to_string(),
                "KUMULUZEE_DEV_SCANLIBRARIES_2".to_string()
            ]
        );
    }

    #[test]
    fn test_get_both_name_forms() {
        let source = EnvSource::from_vars([
            ("KUMULUZEE_SERVER_CONTEXT_PATH", "/v1"),
            ("KUMULUZEE_GRAPHQL_UI_MAPPING", "explorer"),
            ("KUMULUZEE_GRAPHQL_EXCEPTIONS_INCLUDESHOWERRORDEFAULTS", "false"),
        ]);

        assert_eq!(source.get("kumuluzee.server.context-path").as_deref(), Some("/v1"));
        assert_eq!(source.get("kumuluzee.graphql.ui.mapping").as_deref(), Some("explorer"));
        assert_eq!(
            source.get_bool("kumuluzee.graphql.exceptions.include-show-error-defaults"),
            Some(false)
        );
    }

    #[test]
    fn test_list_from_indexed_vars() {
        let source = EnvSource::from_vars([
            ("KUMULUZEE_GRAPHQL_EXCEPTIONS_SHOW_ERROR_MESSAGE_0", "com.acme.A"),
            ("KUMULUZEE_GRAPHQL_EXCEPTIONS_SHOW_ERROR_MESSAGE_1", "com.acme.B"),
            ("KUMULUZEE_GRAPHQL_EXCEPTIONS_SHOW_ERROR_MESSAGE_3", "com.acme.Skipped"),
        ]);

        let key = "kumuluzee.graphql.exceptions.show-error-message";
        assert_eq!(source.get_list_size(key), Some(2));
        assert_eq!(source.get(&list_key(key, 1)).as_deref(), Some("com.acme.B"));
        assert_eq!(source.get_list_size("kumuluzee.dev.scan-libraries"), None);
    }

    #[test]
    fn test_set_is_ignored() {
        let source = EnvSource::default();
        source.set("some.key", ConfigValue::from("value"));
        assert!(source.is_empty());
        assert_eq!(source.get("some.key"), None);
    }
}
