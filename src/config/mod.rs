//! Process configuration from environment variables (after `.env` is loaded).

use crate::error::ConfigError;
use std::collections::HashMap;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/usuarios";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Schema holding the users table. Plain identifier only.
    pub schema: String,
    pub body_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build from an explicit variable map; unset variables take defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup(vars, "BIND_ADDR")
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "BIND_ADDR",
                message: e.to_string(),
            })?;
        let max_connections = parse_number(lookup(vars, "DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let body_limit = parse_number(lookup(vars, "BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT)?;
        let schema = lookup(vars, "USERS_SCHEMA").unwrap_or(DEFAULT_SCHEMA).to_string();
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid {
                var: "USERS_SCHEMA",
                message: format!("'{}' is not a plain identifier", schema),
            });
        }

        Ok(AppConfig {
            database_url: lookup(vars, "DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL).to_string(),
            bind_addr,
            max_connections,
            schema,
            body_limit,
        })
    }
}

fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_number<T>(raw: Option<&str>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = raw else { return Ok(default) };
    match raw.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::Invalid {
            var,
            message: format!("expected a positive integer, got '{}'", raw),
        }),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
