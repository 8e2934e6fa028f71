use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // HTTP
    pub port: u16,

    // Admin access; admin routes reject everything when unset
    pub admin_api_key: Option<String>,

    // Translation cache freshness window
    pub translation_cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL not set")?,
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            admin_api_key: std::env::var("ADMIN_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            translation_cache_ttl_secs: std::env::var("TRANSLATION_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        })
    }

    pub fn translation_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.translation_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "PORT",
        "ADMIN_API_KEY",
        "TRANSLATION_CACHE_TTL_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_missing_database_url_fails() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/federation");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.admin_api_key, None);
        assert_eq!(config.translation_cache_ttl(), Duration::from_secs(300));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_and_invalid_numbers() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/federation");
        std::env::set_var("PORT", "8080");
        std::env::set_var("ADMIN_API_KEY", "s3cret");
        std::env::set_var("TRANSLATION_CACHE_TTL_SECS", "not-a-number");

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.admin_api_key.as_deref(), Some("s3cret"));
        assert_eq!(config.translation_cache_ttl_secs, 300);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_admin_key_is_unset() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/federation");
        std::env::set_var("ADMIN_API_KEY", "  ");

        assert_eq!(Config::from_env().unwrap().admin_api_key, None);
        clear_env();
    }
}
