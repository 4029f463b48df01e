//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before any connection is made.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ENVIRONMENT, DEFAULT_KEEPALIVE_INTERVAL_SECS, DEFAULT_RUST_LOG, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SSL_MODE,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub keepalive: KeepAliveConfig,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// libpq-style TLS mode (`disable`, `prefer`, `require`, ...)
    pub ssl_mode: String,
    /// Log every statement at debug level
    pub log_statements: bool,
}

/// Keep-alive configuration
#[derive(Debug, Clone)]
pub struct KeepAliveConfig {
    pub enabled: bool,
    pub interval: Duration,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

/// Environment name that is not one of the known modes
#[derive(Debug, thiserror::Error)]
#[error("Unknown environment: {0}")]
pub struct UnknownEnvironment(pub String);

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        };
        f.write_str(name)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (var, value) = match lookup("APP_ENV") {
            Some(value) => ("APP_ENV", value),
            None => match lookup("ENVIRONMENT") {
                Some(value) => ("ENVIRONMENT", value),
                None => ("APP_ENV", DEFAULT_ENVIRONMENT.to_string()),
            },
        };
        let environment: Environment = value
            .parse()
            .map_err(|_| ConfigError::InvalidValue(var.to_string()))?;

        Ok(Self {
            environment,
            server: ServerConfig::from_source(&lookup)?,
            database: DatabaseConfig::from_source(&lookup, environment)?,
            keepalive: KeepAliveConfig::from_source(&lookup, environment)?,
        })
    }
}

impl ServerConfig {
    fn from_source<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            port: lookup("SERVER_PORT")
                .unwrap_or_else(|| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_RUST_LOG.to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_source<F>(lookup: &F, environment: Environment) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("DATABASE_URL".to_string()))?;

        Ok(Self {
            url,
            ssl_mode: lookup("DATABASE_SSL_MODE").unwrap_or_else(|| DEFAULT_SSL_MODE.to_string()),
            log_statements: environment.is_development(),
        })
    }
}

impl KeepAliveConfig {
    fn from_source<F>(lookup: &F, environment: Environment) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = match lookup("KEEPALIVE_ENABLED") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::InvalidValue("KEEPALIVE_ENABLED".to_string()))?,
            None => environment.is_production(),
        };

        let interval_secs: u64 = lookup("KEEPALIVE_INTERVAL_SECS")
            .unwrap_or_else(|| DEFAULT_KEEPALIVE_INTERVAL_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("KEEPALIVE_INTERVAL_SECS".to_string()))?;

        if interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "KEEPALIVE_INTERVAL_SECS".to_string(),
            ));
        }

        Ok(Self {
            enabled,
            interval: Duration::from_secs(interval_secs),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
