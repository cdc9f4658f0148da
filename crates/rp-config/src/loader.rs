//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "roleboard.toml",
    "config.toml",
    "./config/roleboard.toml",
    "./config/config.toml",
    "/etc/roleboard/config.toml",
];

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "ROLEBOARD_CONFIG";

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    search_standard_paths: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            search_standard_paths: true,
        }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
            search_standard_paths: true,
        }
    }

    /// Skip the standard search paths (explicit path and env var still apply)
    pub fn without_search_paths(mut self) -> Self {
        self.search_standard_paths = false;
        self
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Same as [`load`](Self::load) but with a custom variable lookup
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file(&lookup) {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        apply_overrides(&mut config, &lookup)?;
        config.validate()?;

        Ok(config)
    }

    fn find_config_file<F>(&self, lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
        }

        if let Some(path) = lookup(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if !self.search_standard_paths {
            return None;
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}: cannot parse '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvError(format!("{}: expected a boolean, got '{}'", key, value))),
    }
}

/// Apply ROLEBOARD_* overrides on top of file/default values
fn apply_overrides<F>(config: &mut AppConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // HTTP
    if let Some(val) = lookup("ROLEBOARD_HTTP_HOST") {
        config.http.host = val;
    }
    if let Some(val) = lookup("ROLEBOARD_HTTP_PORT") {
        config.http.port = parse_value("ROLEBOARD_HTTP_PORT", &val)?;
    }
    if let Some(val) = lookup("ROLEBOARD_CORS_ORIGINS") {
        config.http.cors_origins = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    // Roles
    if let Some(val) = lookup("ROLEBOARD_ROLE_EXPIRATION_MONTHS") {
        config.roles.expiration_period_months = parse_value("ROLEBOARD_ROLE_EXPIRATION_MONTHS", &val)?;
    }

    // Feature flags
    if let Some(val) = lookup("ROLEBOARD_FEATURE_HIRED_STATUS_MESSAGE") {
        config.features.hired_status_message = parse_bool("ROLEBOARD_FEATURE_HIRED_STATUS_MESSAGE", &val)?;
    }
    if let Some(val) = lookup("ROLEBOARD_FEATURE_ENABLE_ROLE_POSTING") {
        config.features.enable_role_posting = parse_bool("ROLEBOARD_FEATURE_ENABLE_ROLE_POSTING", &val)?;
    }
    if let Some(val) = lookup("ROLEBOARD_FEATURE_REQUIRE_ROLE_APPROVAL") {
        config.features.require_role_approval = parse_bool("ROLEBOARD_FEATURE_REQUIRE_ROLE_APPROVAL", &val)?;
    }
    if let Some(val) = lookup("ROLEBOARD_FEATURE_SHOW_EXPIRED_ROLES") {
        config.features.show_expired_roles = parse_bool("ROLEBOARD_FEATURE_SHOW_EXPIRED_ROLES", &val)?;
    }

    // Rate limiting
    if let Some(val) = lookup("ROLEBOARD_RATE_LIMIT_ENABLED") {
        config.rate_limit.enabled = parse_bool("ROLEBOARD_RATE_LIMIT_ENABLED", &val)?;
    }
    if let Some(val) = lookup("ROLEBOARD_RATE_LIMIT_PER_MINUTE") {
        config.rate_limit.requests_per_minute = parse_value("ROLEBOARD_RATE_LIMIT_PER_MINUTE", &val)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("K", "TRUE").unwrap());
        assert!(parse_bool("K", "1").unwrap());
        assert!(!parse_bool("K", "off").unwrap());
        assert!(parse_bool("K", "maybe").is_err());
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u32>("ROLEBOARD_HTTP_PORT", "abc").unwrap_err();
        assert!(err.to_string().contains("ROLEBOARD_HTTP_PORT"));
    }
}
