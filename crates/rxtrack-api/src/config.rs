//! Environment-driven server configuration

use std::env;

/// Database location when `DB_URI` is unset
pub const DEFAULT_DB_URI: &str = "rxtrack.db";

/// Placeholder secret when `SECRET_KEY` is unset; triggers a startup warning
pub const DEFAULT_SECRET_KEY: &str = "change-me-in-production";

/// Listen address when `BIND_ADDR` is unset
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8082";

/// Server configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Database URI; accepts `sqlite:` prefixes or a bare path
    pub db_uri: String,

    /// Secret used for signed tokens; must be overridden in production
    pub secret_key: String,

    /// Address the HTTP listener binds to
    pub bind_addr: String,
}

impl Config {
    /// Read configuration from `DB_URI`, `SECRET_KEY`, and `BIND_ADDR`,
    /// falling back to development defaults for any unset variable
    pub fn from_env() -> Self {
        Config {
            db_uri: env::var("DB_URI").unwrap_or_else(|_| DEFAULT_DB_URI.to_string()),
            secret_key: env::var("SECRET_KEY").unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }

    /// True when the secret was never overridden
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_uri: DEFAULT_DB_URI.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}
