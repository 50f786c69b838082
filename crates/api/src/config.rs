use std::net::IpAddr;

use axum::http::HeaderValue;

use crate::auth::SessionPolicy;

/// Wildcard entry in `CORS_ORIGINS` allowing any origin.
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A `*` entry allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session lifetime in hours. `None` keeps tokens valid indefinitely.
    pub session_ttl_hours: Option<i64>,
    /// Postgres URL. When unset the server runs on an in-memory store.
    pub database_url: Option<String>,
    /// Pool size for the Postgres store (default: `20`).
    pub database_max_connections: u32,
    /// Emit JSON log lines instead of human-readable ones.
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default  |
    /// |----------------------------|----------|
    /// | `HOST`                     | `0.0.0.0`|
    /// | `PORT`                     | `8000`   |
    /// | `CORS_ORIGINS`             | `*`      |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`     |
    /// | `SESSION_TTL_HOURS`        | unset    |
    /// | `DATABASE_URL`             | unset    |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`     |
    /// | `LOG_FORMAT`               | `text`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = parse_or(var("HOST"), "HOST", "0.0.0.0".parse().ok(), "an IP address")?;
        let port = parse_or(var("PORT"), "PORT", Some(8000), "a valid u16")?;
        let request_timeout_secs = parse_or(
            var("REQUEST_TIMEOUT_SECS"),
            "REQUEST_TIMEOUT_SECS",
            Some(30),
            "a valid u64",
        )?;
        let database_max_connections = parse_or(
            var("DATABASE_MAX_CONNECTIONS"),
            "DATABASE_MAX_CONNECTIONS",
            Some(20),
            "a valid u32",
        )?;

        let session_ttl_hours = match var("SESSION_TTL_HOURS") {
            None => None,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(hours) if hours > 0 => Some(hours),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SESSION_TTL_HOURS",
                        value: raw,
                        expected: "a positive number of hours",
                    })
                }
            },
        };

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| ANY_ORIGIN.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_origins.iter().filter(|o| o.as_str() != ANY_ORIGIN) {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.clone(),
                    expected: "a comma-separated list of origins",
                });
            }
        }

        let log_json = var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_hours,
            database_url: var("DATABASE_URL"),
            database_max_connections,
            log_json,
        })
    }

    /// Session expiry derived from `session_ttl_hours`.
    pub fn session_policy(&self) -> SessionPolicy {
        match self.session_ttl_hours {
            Some(hours) => SessionPolicy::with_ttl(chrono::Duration::hours(hours)),
            None => SessionPolicy::default(),
        }
    }

    /// `true` when `CORS_ORIGINS` contains the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    var: &'static str,
    default: Option<T>,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let invalid = |value: String| ConfigError::Invalid {
        var,
        value,
        expected,
    };
    match raw {
        Some(raw) => raw.trim().parse().map_err(|_| invalid(raw)),
        None => default.ok_or_else(|| invalid(String::new())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).expect("defaults should load");
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins, vec!["*"]);
        assert!(config.allows_any_origin());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.session_ttl_hours, None);
        assert_eq!(config.session_policy(), SessionPolicy::default());
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 20);
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("SESSION_TTL_HOURS", "24"),
            ("DATABASE_URL", "postgres://localhost/workaround"),
            ("LOG_FORMAT", "JSON"),
        ])
        .expect("overrides should load");

        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert!(!config.allows_any_origin());
        assert_eq!(
            config.session_policy(),
            SessionPolicy::with_ttl(chrono::Duration::hours(24))
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/workaround")
        );
        assert!(config.log_json);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("PORT", "  "), ("DATABASE_URL", "")]).unwrap();
        assert_eq!(config.port, 8000);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_port() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        assert_matches!(
            load(&[("SESSION_TTL_HOURS", "0")]),
            Err(ConfigError::Invalid { var: "SESSION_TTL_HOURS", .. })
        );
    }

    #[test]
    fn test_invalid_origin_rejected() {
        assert_matches!(
            load(&[("CORS_ORIGINS", "http://ok.test,bad\norigin")]),
            Err(ConfigError::Invalid { var: "CORS_ORIGINS", .. })
        );
    }
}
