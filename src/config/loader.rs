//! Configuration loading from disk and the environment.
//!
//! Resolution order, lowest precedence first: built-in defaults, TOML file,
//! environment variables (`PORT`, `WEB_CONCURRENCY`). CLI flags are applied
//! by the binary after this module runs.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for environment variable {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then environment overrides,
/// then validation.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment variable overrides from the process environment.
pub fn apply_env_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    apply_env_overrides_from(config, |var| env::var(var).ok())
}

/// Apply environment variable overrides from an arbitrary lookup.
///
/// An absent or empty `PORT` leaves the configured port in place; any other
/// unparsable value is a startup error, so a misconfigured deployment never
/// silently listens on the wrong port.
pub fn apply_env_overrides_from(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(port) = parse_env_var(&lookup, "PORT")? {
        config.listener.port = port;
    }
    if let Some(workers) = parse_env_var(&lookup, "WEB_CONCURRENCY")? {
        config.listener.workers = workers;
    }
    Ok(())
}

fn parse_env_var<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { var, value: raw }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn port_env_overrides_default() {
        let mut config = AppConfig::default();
        apply_env_overrides_from(&mut config, env_of(&[("PORT", "8080")])).unwrap();
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn absent_port_keeps_default() {
        let mut config = AppConfig::default();
        apply_env_overrides_from(&mut config, env_of(&[])).unwrap();
        assert_eq!(config.listener.port, 5000);
    }

    #[test]
    fn empty_port_is_treated_as_unset() {
        let mut config = AppConfig::default();
        apply_env_overrides_from(&mut config, env_of(&[("PORT", "")])).unwrap();
        assert_eq!(config.listener.port, 5000);
    }

    #[test]
    fn malformed_port_is_a_startup_error() {
        let mut config = AppConfig::default();
        let err =
            apply_env_overrides_from(&mut config, env_of(&[("PORT", "not-a-port")])).unwrap_err();
        match err {
            ConfigError::Env { var, value } => {
                assert_eq!(var, "PORT");
                assert_eq!(value, "not-a-port");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_port_is_rejected() {
        let mut config = AppConfig::default();
        assert!(apply_env_overrides_from(&mut config, env_of(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn web_concurrency_overrides_workers() {
        let mut config = AppConfig::default();
        apply_env_overrides_from(&mut config, env_of(&[("WEB_CONCURRENCY", "8")])).unwrap();
        assert_eq!(config.listener.workers, 8);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.limits.max_upload_mb, 200);
    }
}
