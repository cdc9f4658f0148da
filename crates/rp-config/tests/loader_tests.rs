//! Config Loader Tests
//!
//! File discovery, environment overrides and validation.

use std::collections::HashMap;
use std::io::Write;

use rp_config::{ConfigError, ConfigLoader};

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_defaults_without_file() {
    let env = env_of(&[]);
    let config = ConfigLoader::new()
        .without_search_paths()
        .load_with(|k| env.get(k).cloned())
        .unwrap();

    assert_eq!(config.roles.expiration_period_months, 3);
    assert!(config.features.enable_role_posting);
}

#[test]
fn test_load_from_explicit_file() {
    let file = write_config(
        r#"
[http]
port = 9000

[roles]
expiration_period_months = 6

[features]
require_role_approval = true
show_expired_roles = true
"#,
    );

    let env = env_of(&[]);
    let config = ConfigLoader::with_path(file.path())
        .without_search_paths()
        .load_with(|k| env.get(k).cloned())
        .unwrap();

    assert_eq!(config.http.port, 9000);
    assert_eq!(config.roles.expiration_period_months, 6);
    assert!(config.features.require_role_approval);
    assert!(config.features.show_expired_roles);
    assert!(!config.features.hired_status_message);
}

#[test]
fn test_config_path_from_env_var() {
    let file = write_config("[roles]\nexpiration_period_months = 12\n");
    let path = file.path().to_string_lossy().to_string();

    let env = env_of(&[("ROLEBOARD_CONFIG", path.as_str())]);
    let config = ConfigLoader::new()
        .without_search_paths()
        .load_with(|k| env.get(k).cloned())
        .unwrap();

    assert_eq!(config.roles.expiration_period_months, 12);
}

#[test]
fn test_env_overrides_file_values() {
    let file = write_config("[features]\nenable_role_posting = true\n");

    let env = env_of(&[
        ("ROLEBOARD_FEATURE_ENABLE_ROLE_POSTING", "false"),
        ("ROLEBOARD_FEATURE_HIRED_STATUS_MESSAGE", "true"),
        ("ROLEBOARD_ROLE_EXPIRATION_MONTHS", "1"),
        ("ROLEBOARD_CORS_ORIGINS", "http://a.example, http://b.example"),
        ("ROLEBOARD_RATE_LIMIT_PER_MINUTE", "5"),
    ]);
    let config = ConfigLoader::with_path(file.path())
        .without_search_paths()
        .load_with(|k| env.get(k).cloned())
        .unwrap();

    assert!(!config.features.enable_role_posting);
    assert!(config.features.hired_status_message);
    assert_eq!(config.roles.expiration_period_months, 1);
    assert_eq!(config.http.cors_origins, vec!["http://a.example", "http://b.example"]);
    assert_eq!(config.rate_limit.requests_per_minute, 5);
}

#[test]
fn test_zero_expiration_from_env_is_rejected() {
    let env = env_of(&[("ROLEBOARD_ROLE_EXPIRATION_MONTHS", "0")]);
    let result = ConfigLoader::new()
        .without_search_paths()
        .load_with(|k| env.get(k).cloned());

    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_malformed_env_value_is_rejected() {
    let env = env_of(&[("ROLEBOARD_ROLE_EXPIRATION_MONTHS", "three")]);
    let result = ConfigLoader::new()
        .without_search_paths()
        .load_with(|k| env.get(k).cloned());

    assert!(matches!(result, Err(ConfigError::EnvError(_))));
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let file = write_config("[roles\nexpiration_period_months = ");

    let env = env_of(&[]);
    let result = ConfigLoader::with_path(file.path())
        .without_search_paths()
        .load_with(|k| env.get(k).cloned());

    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}
