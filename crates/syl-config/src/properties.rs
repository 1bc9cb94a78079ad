//! Java-style `.properties` files (`key=value`, `#` comments).
//!
//! Only the datasource keys are read:
//! `spring.datasource.url`, `spring.datasource.username`,
//! `spring.datasource.password`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::ConfigError;

/// Parse `key=value` lines. Blank lines, `#` comments, and lines without `=`
/// are ignored; keys and values are trimmed; the first `=` splits.
#[must_use]
pub fn parse_properties(text: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        props.insert(key.trim().to_string(), value.trim().to_string());
    }
    props
}

/// Figment layer built from a properties file.
#[derive(Debug, Default, Serialize)]
pub(crate) struct PropertiesLayer {
    database: DatasourceProps,
}

#[derive(Debug, Default, Serialize)]
struct DatasourceProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl PropertiesLayer {
    pub(crate) fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_map(&parse_properties(&text)))
    }

    fn from_map(props: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| props.get(key).cloned();
        Self {
            database: DatasourceProps {
                url: get("spring.datasource.url"),
                user: get("spring.datasource.username"),
                password: get("spring.datasource.password"),
            },
        }
    }
}
