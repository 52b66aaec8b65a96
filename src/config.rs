// src/config.rs
use std::{env, net::SocketAddr, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: Option<String>,
    listen_addr: SocketAddr,
    biscuit_private_key: String,
    token_ttl: Duration,
    allowed_origins: Vec<String>,
    cookie_secure: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info,sqlx=warn";

impl AppConfig {
    /// Build configuration from the process environment after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid(format!("LISTEN_ADDR: {err}")))?;

        let biscuit_private_key = lookup("BISCUIT_ROOT_PRIVATE_KEY")
            .ok_or(ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))?;
        if biscuit_private_key.len() != 64
            || !biscuit_private_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PRIVATE_KEY must be a 32-byte hex string".into(),
            ));
        }

        let token_ttl_secs = match lookup("TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid("TOKEN_TTL_SECONDS must be a positive integer".into())
                })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!("COOKIE_SECURE must be true or false, got '{raw}'"))
            })?,
            None => false,
        };

        Ok(Self {
            database_url,
            listen_addr,
            biscuit_private_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
            allowed_origins,
            cookie_secure,
        })
    }

    /// `None` selects the in-memory store.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    pub fn biscuit_private_key(&self) -> &str {
        &self.biscuit_private_key
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20";

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let cfg = config(&[("BISCUIT_ROOT_PRIVATE_KEY", KEY)]).unwrap();
        assert_eq!(cfg.database_url(), None);
        assert_eq!(cfg.listen_addr().to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cfg.token_ttl(), Duration::from_secs(3600));
        assert_eq!(cfg.allowed_origins(), ["http://localhost:3000".to_string()]);
        assert!(!cfg.cookie_secure());
    }

    #[test]
    fn missing_key_is_reported() {
        assert!(matches!(
            config(&[]),
            Err(ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))
        ));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(config(&[("BISCUIT_ROOT_PRIVATE_KEY", "abc")]).is_err());
        assert!(config(&[("BISCUIT_ROOT_PRIVATE_KEY", &"g".repeat(64))]).is_err());
        assert!(
            config(&[("BISCUIT_ROOT_PRIVATE_KEY", KEY), ("TOKEN_TTL_SECONDS", "soon")]).is_err()
        );
        assert!(config(&[("BISCUIT_ROOT_PRIVATE_KEY", KEY), ("LISTEN_ADDR", "nowhere")]).is_err());
        assert!(config(&[("BISCUIT_ROOT_PRIVATE_KEY", KEY), ("COOKIE_SECURE", "maybe")]).is_err());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg = config(&[
            ("BISCUIT_ROOT_PRIVATE_KEY", KEY),
            ("DATABASE_URL", "postgres://localhost/inkpost"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("COOKIE_SECURE", "true"),
            ("TOKEN_TTL_SECONDS", "60"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url(), Some("postgres://localhost/inkpost"));
        assert_eq!(cfg.allowed_origins().len(), 2);
        assert!(cfg.cookie_secure());
        assert_eq!(cfg.token_ttl(), Duration::from_secs(60));
    }
}
