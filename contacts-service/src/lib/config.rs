use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for contacts-service.
///
/// Loaded once at startup, before the authenticator and services are built.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub mail: MailConfig,
    pub storage: StorageConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,
    /// Session token lifetime.
    #[serde(default = "default_jwt_expiration_seconds")]
    pub expiration_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Current-user cache configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_current_user_ttl_seconds")]
    pub current_user_ttl_seconds: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            current_user_ttl_seconds: default_current_user_ttl_seconds(),
        }
    }
}

/// Outgoing SMTP configuration (implicit TLS).
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub server: String,
    #[serde(default = "default_mail_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub from_name: String,
}

/// Avatar file storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub avatar_dir: String,
    /// Base URL under which stored avatars are served, e.g. `http://localhost:8000/avatars`.
    pub public_base_url: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_jwt_expiration_seconds() -> i64 {
    3600
}

fn default_bcrypt_cost() -> u32 {
    auth::PasswordHasher::new().cost()
}

fn default_current_user_ttl_seconds() -> i64 {
    180
}

fn default_mail_port() -> u16 {
    465
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
