/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables (after
 * `.env` has been applied by the binary) and opens the SQLite pool.
 *
 * # Variables
 *
 * - `SERVER_HOST` (default `0.0.0.0`), `SERVER_PORT` (default `3000`)
 * - `DATABASE_URL` (default `sqlite://authgate.db?mode=rwc`)
 * - `JWT_SECRET` (required, at least 32 bytes)
 * - `TOKEN_TTL_HOURS` (default 3600, five months)
 * - `AUTH_EXEMPT_PATHS` (comma-separated, replaces the default exempt set)
 */

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use chrono::{Duration, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::sessions::DEFAULT_TOKEN_TTL_HOURS;
use crate::backend::middleware::auth::ExemptPaths;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://authgate.db?mode=rwc";
pub const MIN_SECRET_LEN: usize = 32;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("weak secret: {0} must be at least {min} bytes", min = MIN_SECRET_LEN)]
    WeakSecret(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub exempt_paths: ExemptPaths,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("exempt_paths", &self.exempt_paths)
            .finish()
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(host) = lookup("SERVER_HOST") {
            builder = builder.host(parse_value("SERVER_HOST", &host)?);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &port)?);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(hours) = lookup("TOKEN_TTL_HOURS") {
            builder = builder.token_ttl(parse_token_ttl(&hours)?);
        }
        if let Some(paths) = lookup("AUTH_EXEMPT_PATHS") {
            builder = builder.exempt_paths(ExemptPaths::parse_list(&paths));
        }

        builder.build()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

/// Parse `TOKEN_TTL_HOURS` into a lifetime tokens can actually carry
///
/// Zero, negative, and lifetimes whose expiry falls outside chrono's
/// representable range are all [`ConfigError::Invalid`].
fn parse_token_ttl(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::Invalid {
        key: "TOKEN_TTL_HOURS",
        value: value.to_string(),
    };

    let hours: i64 = parse_value("TOKEN_TTL_HOURS", value)?;
    if hours <= 0 {
        return Err(invalid());
    }

    let ttl = Duration::try_hours(hours).ok_or_else(invalid)?;
    Utc::now().checked_add_signed(ttl).ok_or_else(invalid)?;

    Ok(ttl)
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    host: Option<IpAddr>,
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl: Option<Duration>,
    exempt_paths: Option<ExemptPaths>,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = Some(host);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn exempt_paths(mut self, paths: ExemptPaths) -> Self {
        self.exempt_paths = Some(paths);
        self
    }

    /// Build the configuration
    ///
    /// Fails if the JWT secret is absent or shorter than [`MIN_SECRET_LEN`].
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let jwt_secret = self.jwt_secret.ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret("JWT_SECRET"));
        }

        Ok(ServerConfig {
            host: self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            token_ttl: self
                .token_ttl
                .unwrap_or_else(|| Duration::hours(DEFAULT_TOKEN_TTL_HOURS)),
            exempt_paths: self.exempt_paths.unwrap_or_default(),
        })
    }
}

/// Open the SQLite pool and bring the schema up to date
///
/// # Errors
///
/// Connection or migration failure. The binary treats this as fatal.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Single-connection in-memory database with the schema applied
///
/// Each call gets its own private database; the pool is pinned to one
/// connection that never idles out, since closing it would drop the data.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}
