//! Database connection configuration.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::ConfigError;

/// Scheme used when neither a URL nor a host is configured.
pub const LOCAL_SCHEME: &str = "file";

/// Scheme used when a host is configured without a URL.
pub const DEFAULT_REMOTE_SCHEME: &str = "libsql";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `libsql://db.example.com:8080/courses` or
    /// `file:courses.db`. A `jdbc:` prefix is accepted and ignored.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,

    /// Host; overrides the URL's host.
    #[serde(default, deserialize_with = "lenient_string")]
    pub host: String,

    /// Port; overrides the URL's port. A blank value means "not set".
    #[serde(default, deserialize_with = "lenient_port")]
    pub port: Option<u16>,

    /// Database name (a file path for local databases); overrides the URL's path.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub user: String,

    /// Password, sent as the auth token to remote libSQL servers.
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
}

/// Fully resolved connection parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl ConnectionParams {
    /// Whether the target is a local database file.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.scheme == LOCAL_SCHEME
    }

    /// `host:port/database` for remote targets (the database part is omitted
    /// when empty), the file path for local ones.
    #[must_use]
    pub fn target(&self) -> String {
        if self.is_local() {
            return self.database.clone();
        }
        let authority = match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        };
        if self.database.is_empty() {
            authority
        } else {
            format!("{authority}/{}", self.database)
        }
    }

    /// Server URL without the database path, e.g. `libsql://host:8080`.
    #[must_use]
    pub fn server_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{port}", self.scheme, self.host),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

// Keeps the password out of logs and error output.
impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parts of a parsed database URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub database: String,
    pub user: String,
    pub password: String,
}

/// Parse `[jdbc:]scheme://[user[:password]@]host[:port][/database][?query]`
/// or `file:path`.
///
/// # Errors
///
/// Returns `ConfigError::UnsupportedUrl` for anything else.
pub fn parse_database_url(raw: &str) -> Result<UrlParts, ConfigError> {
    let unsupported = |reason: &str| ConfigError::UnsupportedUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = raw.trim();
    let url = url.strip_prefix("jdbc:").unwrap_or(url);

    if let Some(path) = url.strip_prefix("file:") {
        let path = path.strip_prefix("//").unwrap_or(path);
        if path.is_empty() {
            return Err(unsupported("file URL has no path"));
        }
        return Ok(UrlParts {
            scheme: LOCAL_SCHEME.to_string(),
            database: path.to_string(),
            ..UrlParts::default()
        });
    }

    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| unsupported("expected scheme://host"))?;
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+') {
        return Err(unsupported("invalid scheme"));
    }

    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
    let (userinfo, hostport) = match authority.rsplit_once('@') {
        Some((userinfo, hostport)) => (Some(userinfo), hostport),
        None => (None, authority),
    };
    let (host, port) = match hostport.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| unsupported("port is not a number between 0 and 65535"))?;
            (host, Some(port))
        }
        None => (hostport, None),
    };
    if host.is_empty() {
        return Err(unsupported("missing host"));
    }

    let (user, password) = match userinfo {
        Some(info) => match info.split_once(':') {
            Some((user, password)) => (user, password),
            None => (info, ""),
        },
        None => ("", ""),
    };

    Ok(UrlParts {
        scheme: scheme.to_ascii_lowercase(),
        host: host.to_string(),
        port,
        database: path.trim_matches('/').to_string(),
        user: user.to_string(),
        password: password.to_string(),
    })
}

impl DatabaseConfig {
    /// Whether any connection field has been provided.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() || !self.host.is_empty() || !self.name.is_empty()
    }

    /// Merge the URL with the explicit fields and validate the result.
    ///
    /// Explicit fields win over URL parts. Local targets require `name` (the
    /// file path); remote targets require `host`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedUrl` for a malformed URL and
    /// `ConfigError::NotConfigured` for a missing required field.
    pub fn resolve(&self) -> Result<ConnectionParams, ConfigError> {
        let parts = if self.url.trim().is_empty() {
            UrlParts {
                scheme: if self.host.is_empty() {
                    LOCAL_SCHEME.to_string()
                } else {
                    DEFAULT_REMOTE_SCHEME.to_string()
                },
                ..UrlParts::default()
            }
        } else {
            parse_database_url(&self.url)?
        };

        let pick = |explicit: &str, from_url: String| {
            if explicit.is_empty() {
                from_url
            } else {
                explicit.to_string()
            }
        };

        let params = ConnectionParams {
            host: pick(&self.host, parts.host),
            port: self.port.or(parts.port),
            database: pick(&self.name, parts.database),
            user: pick(&self.user, parts.user),
            password: pick(&self.password, parts.password),
            scheme: parts.scheme,
        };

        if params.is_local() && params.database.is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "database.name".into(),
            });
        }
        if !params.is_local() && params.host.is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "database.host".into(),
            });
        }
        Ok(params)
    }
}

/// Accept strings, numbers, and booleans for string fields; environment
/// values such as `DB_PASSWORD=123456` arrive as numbers.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Signed(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Flag(b) => b.to_string(),
    })
}

/// Accept a number, a numeric string, or a blank string (no port).
fn lenient_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u16>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u16),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(port)) => Ok(Some(port)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}
