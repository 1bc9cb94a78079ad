//! Per-layer URL expansion.
//!
//! A `database.url` is expanded into `host`, `port` and `name` within the
//! layer that sets it, before layers merge. A URL from a higher layer then
//! replaces the connection target of every lower layer, instead of losing to
//! a lower layer's separate `host`. Fields set explicitly in the same layer
//! keep priority over that layer's URL.

use figment::value::{Dict, Map, Value};
use figment::{Error, Metadata, Profile, Provider};

use crate::database::parse_database_url;

/// Wraps a provider and expands its `database.url`.
pub(crate) struct ExpandUrl<P>(pub P);

impl<P: Provider> Provider for ExpandUrl<P> {
    fn metadata(&self) -> Metadata {
        self.0.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut data = self.0.data()?;
        for dict in data.values_mut() {
            if let Some(Value::Dict(_, database)) = dict.get_mut("database") {
                expand(database);
            }
        }
        Ok(data)
    }

    fn profile(&self) -> Option<Profile> {
        self.0.profile()
    }
}

fn expand(database: &mut Dict) {
    let Some(url) = database.get("url").and_then(Value::as_str) else {
        return;
    };
    if url.trim().is_empty() {
        return;
    }
    // Malformed URLs are reported by `DatabaseConfig::resolve`.
    let Ok(parts) = parse_database_url(url) else {
        return;
    };

    let port = parts.port.map_or_else(|| Value::from(String::new()), Value::from);
    let mut fill = |key: &str, value: Value| {
        database.entry(key.to_string()).or_insert(value);
    };
    fill("host", Value::from(parts.host));
    fill("port", port);
    fill("name", Value::from(parts.database));
    // Credentials are only replaced when the URL carries them.
    if !parts.user.is_empty() {
        fill("user", Value::from(parts.user));
    }
    if !parts.password.is_empty() {
        fill("password", Value::from(parts.password));
    }
}

#[cfg(test)]
mod tests {
    use figment::Figment;
    use figment::providers::Serialized;
    use figment::util::map;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::DatabaseConfig;

    fn extract(layers: Vec<Dict>) -> DatabaseConfig {
        let mut figment = Figment::new();
        for layer in layers {
            figment = figment.merge(ExpandUrl(Serialized::defaults(layer)));
        }
        figment.extract_inner("database").unwrap()
    }

    fn database(entries: Map<&str, Value>) -> Dict {
        map! { "database".to_string() => Value::from(entries) }
    }

    #[test]
    fn higher_url_replaces_lower_host_port_and_name() {
        let config = extract(vec![
            database(map! {
                "host" => Value::from("file-host"),
                "port" => Value::from(9999_u16),
                "name" => Value::from("file-db"),
                "password" => Value::from("secret"),
            }),
            database(map! { "url" => Value::from("libsql://env-host/db") }),
        ]);
        let params = config.resolve().unwrap();
        assert_eq!(params.host, "env-host");
        assert_eq!(params.port, None);
        assert_eq!(params.database, "db");
        assert_eq!(params.password, "secret");
    }

    #[test]
    fn same_layer_fields_beat_that_layers_url() {
        let config = extract(vec![database(map! {
            "url" => Value::from("libsql://url-host:1111/url-db"),
            "host" => Value::from("explicit-host"),
        })]);
        let params = config.resolve().unwrap();
        assert_eq!(params.host, "explicit-host");
        assert_eq!(params.port, Some(1111));
        assert_eq!(params.database, "url-db");
    }

    #[test]
    fn higher_host_still_beats_lower_url() {
        let config = extract(vec![
            database(map! { "url" => Value::from("libsql://file-host:1111/db") }),
            database(map! { "host" => Value::from("flag-host") }),
        ]);
        let params = config.resolve().unwrap();
        assert_eq!(params.host, "flag-host");
        assert_eq!(params.port, Some(1111));
    }

    #[test]
    fn malformed_url_is_left_for_resolve() {
        let config = extract(vec![database(map! { "url" => Value::from("not a url") })]);
        assert_eq!(config.host, "");
        assert!(config.resolve().is_err());
    }
}
