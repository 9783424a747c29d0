//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use orchestrator::{CacheWritePolicy, OrchestratorOptions, Timeouts};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

const DEFAULT_PG_PORT: u16 = 5432;

/// Configuration values that cannot be defaulted safely.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Service configuration with defaults suitable for local development.
///
/// Reads from environment variables:
/// - `HOST`, `PORT`: bind address (default `0.0.0.0:8083`)
/// - `RUST_LOG`: tracing filter directive (default `info`)
/// - `LOG_FORMAT`: `text` or `json` (default `text`)
/// - `DATABASE_URL`, or `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_TRANSACTION`
/// - `DB_MAX_CONNECTIONS`: pool size (default `5`)
/// - `RUN_MIGRATIONS`: apply migrations on startup (default `true`)
/// - `REDIS_URL`: cache connection (default `redis://127.0.0.1:6379`)
/// - `CUSTOMER_SERVICE_URL`, `PRODUCT_SERVICE_URL`: lookup service base URLs
/// - `LOOKUP_TIMEOUT_MS`, `STORE_TIMEOUT_MS`, `CACHE_TIMEOUT_MS`: call bounds
/// - `CACHE_WRITE_POLICY`: `best_effort` or `strict` (default `best_effort`)
///
/// Unparseable values fall back to their defaults, except
/// `CACHE_WRITE_POLICY`, which is rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
    pub redis_url: String,
    pub customer_service_url: String,
    pub product_service_url: String,
    pub orchestrator: OrchestratorOptions,
}

/// Durable store connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Explicit connection string; takes precedence over the parts below.
    pub url: Option<String>,
    /// `host` or `host:port`.
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Returns the PostgreSQL connection options.
    ///
    /// `DATABASE_URL` is parsed as given. Otherwise the options are built
    /// from the individual parts, so credentials need no URL escaping.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        let (host, port) = split_host_port(&self.host);
        Ok(PgConnectOptions::new()
            .host(host)
            .port(port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "transactions".to_string(),
            max_connections: 5,
            run_migrations: true,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the environment win.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = Self::default();

        let db_defaults = defaults.database;
        let database = DatabaseConfig {
            url: env.var("DATABASE_URL"),
            host: env.var("DB_HOST").unwrap_or(db_defaults.host),
            user: env.var("DB_USER").unwrap_or(db_defaults.user),
            password: env.var("DB_PASSWORD").unwrap_or(db_defaults.password),
            name: env.var("DB_TRANSACTION").unwrap_or(db_defaults.name),
            max_connections: env
                .parse::<u32>("DB_MAX_CONNECTIONS")
                .filter(|n| *n > 0)
                .unwrap_or(db_defaults.max_connections),
            run_migrations: env
                .var("RUN_MIGRATIONS")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(db_defaults.run_migrations),
        };

        let timeouts = defaults.orchestrator.timeouts;
        let orchestrator = OrchestratorOptions {
            timeouts: Timeouts {
                lookup: env.millis("LOOKUP_TIMEOUT_MS").unwrap_or(timeouts.lookup),
                store: env.millis("STORE_TIMEOUT_MS").unwrap_or(timeouts.store),
                cache: env.millis("CACHE_TIMEOUT_MS").unwrap_or(timeouts.cache),
            },
            cache_write_policy: match env.var("CACHE_WRITE_POLICY") {
                Some(value) => value
                    .parse::<CacheWritePolicy>()
                    .map_err(|reason| ConfigError::InvalidValue {
                        key: "CACHE_WRITE_POLICY",
                        reason,
                    })?,
                None => defaults.orchestrator.cache_write_policy,
            },
        };

        Ok(Self {
            host: env.var("HOST").unwrap_or(defaults.host),
            port: env.parse::<u16>("PORT").unwrap_or(defaults.port),
            log_level: env.var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env
                .var("LOG_FORMAT")
                .and_then(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
            database,
            redis_url: env.var("REDIS_URL").unwrap_or(defaults.redis_url),
            customer_service_url: env
                .var("CUSTOMER_SERVICE_URL")
                .unwrap_or(defaults.customer_service_url),
            product_service_url: env
                .var("PRODUCT_SERVICE_URL")
                .unwrap_or(defaults.product_service_url),
            orchestrator,
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Key lookup that treats blank values as unset.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.var(key).and_then(|v| v.trim().parse().ok())
    }

    fn millis(&self, key: &str) -> Option<Duration> {
        self.parse::<u64>(key)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

fn split_host_port(value: &str) -> (&str, u16) {
    if let Some((host, port)) = value.rsplit_once(':') {
        if let Ok(port) = port.parse() {
            return (host, port);
        }
    }
    (value, DEFAULT_PG_PORT)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8083,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            database: DatabaseConfig::default(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            customer_service_url: "http://127.0.0.1:8081".to_string(),
            product_service_url: "http://127.0.0.1:8082".to_string(),
            orchestrator: OrchestratorOptions {
                timeouts: Timeouts::default(),
                cache_write_policy: CacheWritePolicy::BestEffort,
            },
        }
    }
}
