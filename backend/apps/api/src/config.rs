//! Server Configuration
//!
//! Gathered once at startup from the environment (after `.env` is loaded).

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use auth::AuthConfig;
use auth::application::config::{
    DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_REFRESH_TOKEN_TTL, MIN_JWT_SECRET_LENGTH,
};
use platform::config::{
    ConfigError, env_duration, env_list, env_opt, env_or, env_parse, env_required,
};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT`, read ahead of the rest so logging starts first
    pub fn from_env() -> Self {
        Self::parse(&env_or("LOG_FORMAT", "text"))
    }

    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// CORS settings
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

/// Server configuration
#[derive(Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub cors: CorsConfig,
    pub log_format: LogFormat,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth = auth_config(
            env_opt("JWT_SECRET"),
            env_opt("PASSWORD_PEPPER"),
            env_duration("JWT_ACCESS_TOKEN_EXPIRY", DEFAULT_ACCESS_TOKEN_TTL)?,
            env_duration("JWT_REFRESH_TOKEN_EXPIRY", DEFAULT_REFRESH_TOKEN_TTL)?,
            cfg!(debug_assertions),
        )?;

        Ok(Self {
            host: env_parse("APP_HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: env_parse("APP_PORT", 8080)?,
            database_url: env_required("DATABASE_URL")?,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", 5)?,
            cors: CorsConfig {
                allowed_origins: env_list("CORS_ALLOWED_ORIGINS", &["http://localhost:3000"]),
                allowed_methods: env_list(
                    "CORS_ALLOWED_METHODS",
                    &["GET", "POST", "PUT", "DELETE", "OPTIONS"],
                ),
                allowed_headers: env_list(
                    "CORS_ALLOWED_HEADERS",
                    &["Origin", "Content-Type", "Accept", "Authorization"],
                ),
            },
            log_format: LogFormat::from_env(),
            auth,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Build the auth config from raw settings
///
/// Release builds refuse to start without a strong secret. Debug builds fall
/// back to a random one, which invalidates tokens on every restart.
fn auth_config(
    secret: Option<String>,
    pepper: Option<String>,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    allow_random_secret: bool,
) -> Result<AuthConfig, ConfigError> {
    let mut config = match secret {
        Some(secret) if secret.len() >= MIN_JWT_SECRET_LENGTH => AuthConfig::new(secret),
        Some(secret) => {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                value: "<redacted>".to_string(),
                reason: format!(
                    "must be at least {MIN_JWT_SECRET_LENGTH} bytes, got {}",
                    secret.len()
                ),
            });
        }
        None if allow_random_secret => {
            tracing::warn!("JWT_SECRET not set, using a random secret for this process");
            AuthConfig::with_random_secret()
        }
        None => return Err(ConfigError::Missing("JWT_SECRET")),
    };

    config.access_token_ttl = access_token_ttl;
    config.refresh_token_ttl = refresh_token_ttl;
    config.password_pepper = pepper.map(String::into_bytes);
    Ok(config)
}
