//! Roleboard Configuration System
//!
//! TOML-based configuration with environment variable override support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Upper bound for the role expiration period (100 years)
pub const MAX_EXPIRATION_PERIOD_MONTHS: u32 = 1200;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub roles: RolesConfig,
    pub features: FeaturesConfig,
    pub rate_limit: RateLimitConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl HttpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Role lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RolesConfig {
    /// Months between a role's creation and its expiration
    pub expiration_period_months: u32,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self { expiration_period_months: 3 }
    }
}

/// Feature flag toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub hired_status_message: bool,
    pub enable_role_posting: bool,
    pub require_role_approval: bool,
    pub show_expired_roles: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            hired_status_message: false,
            enable_role_posting: true,
            require_role_approval: false,
            show_expired_roles: false,
        }
    }
}

/// Global request rate limit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_minute: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Check values that serde cannot enforce
    pub fn validate(&self) -> Result<(), ConfigError> {
        let months = self.roles.expiration_period_months;
        if months == 0 || months > MAX_EXPIRATION_PERIOD_MONTHS {
            return Err(ConfigError::ValidationError(format!(
                "roles.expiration_period_months must be between 1 and {}, got {}",
                MAX_EXPIRATION_PERIOD_MONTHS, months
            )));
        }
        if self.http.port == 0 {
            return Err(ConfigError::ValidationError("http.port must be non-zero".to_string()));
        }
        if self.rate_limit.enabled && self.rate_limit.requests_per_minute == 0 {
            return Err(ConfigError::ValidationError(
                "rate_limit.requests_per_minute must be positive when rate limiting is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Roleboard Configuration
# Environment variables (ROLEBOARD_*) override these settings

[http]
port = 8080
host = "0.0.0.0"
cors_origins = ["*"]

[roles]
expiration_period_months = 3

[features]
hired_status_message = false
enable_role_posting = true
require_role_approval = false
show_expired_roles = false

[rate_limit]
enabled = true
requests_per_minute = 100
"#
        .to_string()
    }
}
