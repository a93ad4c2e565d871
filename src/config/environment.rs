// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database, auth secret, pagination, CORS, and data directory from env
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::database::{DatabaseConfig, DatabaseUrl};
use crate::constants::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{AppError, AppResult};

/// Secret used when `AUTH_JWT_SECRET` is unset outside production
const DEVELOPMENT_JWT_SECRET: &str = "foodapi-development-secret-do-not-deploy";

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Bearer token verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the identity provider
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Lifetime of tokens minted by `foodapi-cli token issue`
    pub token_expiry_hours: i64,
}

/// List pagination bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size when the client omits `limit`
    pub page_size: u32,
    /// Upper bound for a client-supplied `limit`
    pub max_page_size: u32,
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Pagination bounds
    pub pagination: PaginationConfig,
    /// Largest accepted request body in bytes
    pub max_request_body_bytes: usize,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Directory holding reference-data import files
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            http_port: 8000,
            environment: Environment::Development,
            database: DatabaseConfig::default(),
            auth: AuthConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.into(),
                token_expiry_hours: 24,
            },
            pagination: PaginationConfig {
                page_size: DEFAULT_PAGE_SIZE,
                max_page_size: MAX_PAGE_SIZE,
            },
            max_request_body_bytes: 10 * 1024 * 1024,
            cors: CorsConfig {
                allowed_origins: "*".into(),
            },
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a variable cannot be parsed, or if
    /// `AUTH_JWT_SECRET` is missing in production
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        let defaults = Self::default();

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let jwt_secret = match env::var("AUTH_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                return Err(AppError::config_missing(
                    "AUTH_JWT_SECRET is required in production",
                ));
            }
            _ => {
                warn!("AUTH_JWT_SECRET not set, using the development secret");
                DEVELOPMENT_JWT_SECRET.to_owned()
            }
        };

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => DatabaseUrl::parse_url(&url)?,
            Err(_) => DatabaseUrl::default(),
        };

        let config = Self {
            host: env_var_or("HOST", &defaults.host),
            http_port: env_parse("HTTP_PORT", defaults.http_port)?,
            environment,
            database: DatabaseConfig { url: database_url },
            auth: AuthConfig {
                jwt_secret,
                token_expiry_hours: env_parse(
                    "AUTH_TOKEN_EXPIRY_HOURS",
                    defaults.auth.token_expiry_hours,
                )?,
            },
            pagination: PaginationConfig {
                page_size: env_parse("PAGE_SIZE", defaults.pagination.page_size)?,
                max_page_size: env_parse("MAX_PAGE_SIZE", defaults.pagination.max_page_size)?,
            },
            max_request_body_bytes: env_parse(
                "MAX_REQUEST_BODY_BYTES",
                defaults.max_request_body_bytes,
            )?,
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", &defaults.cors.allowed_origins),
            },
            data_dir: PathBuf::from(env_var_or("DATA_DIR", "./data")),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        if self.pagination.page_size == 0 {
            return Err(AppError::config("PAGE_SIZE must be at least 1"));
        }
        if self.pagination.page_size > self.pagination.max_page_size {
            return Err(AppError::config(
                "PAGE_SIZE cannot be larger than MAX_PAGE_SIZE",
            ));
        }
        if self.auth.token_expiry_hours <= 0 {
            return Err(AppError::config(
                "AUTH_TOKEN_EXPIRY_HOURS must be positive",
            ));
        }
        if self.environment.is_production() && self.auth.jwt_secret == DEVELOPMENT_JWT_SECRET {
            return Err(AppError::config(
                "The development JWT secret cannot be used in production",
            ));
        }
        Ok(())
    }

    /// Resolve a data file name against `data_dir` unless it is absolute
    #[must_use]
    pub fn data_file(&self, file: &str) -> PathBuf {
        let path = PathBuf::from(file);
        if path.is_absolute() || file.starts_with("./") || file.starts_with("../") {
            path
        } else {
            self.data_dir.join(path)
        }
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Foodapi Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Page Size: {} (max {})\n\
             - CORS Origins: {}\n\
             - Data Directory: {}",
            self.host,
            self.http_port,
            self.environment,
            self.database.url,
            self.pagination.page_size,
            self.pagination.max_page_size,
            self.cors.allowed_origins,
            self.data_dir.display()
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("TEST"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());

        config.pagination.page_size = 500;
        assert!(config.validate().is_err());

        let mut config = ServerConfig {
            environment: Environment::Production,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
        config.auth.jwt_secret = "a-real-secret".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_data_file_resolution() {
        let config = ServerConfig {
            data_dir: PathBuf::from("/srv/foodapi"),
            ..ServerConfig::default()
        };

        assert_eq!(
            config.data_file("ingredients.json"),
            PathBuf::from("/srv/foodapi/ingredients.json")
        );
        assert_eq!(
            config.data_file("/tmp/tags.json"),
            PathBuf::from("/tmp/tags.json")
        );
    }
}
