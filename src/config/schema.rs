//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so an empty config file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the compression service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, worker count).
    pub listener: ListenerConfig,

    /// Upload limits.
    pub limits: LimitsConfig,

    /// Ghostscript compression settings.
    pub compression: CompressionConfig,

    /// Cross-origin resource sharing settings.
    pub cors: CorsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (all interfaces by default).
    pub host: String,

    /// Listening port. Overridden by the `PORT` environment variable.
    pub port: u16,

    /// Runtime worker threads. Overridden by `WEB_CONCURRENCY`.
    pub workers: usize,
}

impl ListenerConfig {
    /// Full bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            workers: 4,
        }
    }
}

/// Upload limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted upload size in megabytes.
    pub max_upload_mb: u64,
}

impl LimitsConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_upload_mb: 200 }
    }
}

/// Ghostscript compression settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Timeout for a single Ghostscript run, in seconds.
    pub gs_timeout_secs: u64,

    /// Lower bound for image resolution during target-size search.
    pub min_dpi: u32,

    /// Maximum number of Ghostscript runs during target-size search.
    pub max_iterations: u32,

    /// Accept a candidate whose size is within this many bytes of the target.
    pub target_tolerance_bytes: u64,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            gs_timeout_secs: 60,
            min_dpi: 72,
            max_iterations: 8,
            target_tolerance_bytes: 10 * 1024,
        }
    }
}

/// Cross-origin resource sharing settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API.
    pub allowed_origins: Vec<String>,

    /// Whether credentialed requests are allowed.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["https://zenpdf.vercel.app".to_string()],
            allow_credentials: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    ///
    /// Target-size compression may run several Ghostscript passes, so this
    /// must comfortably exceed `max_iterations * gs_timeout_secs`.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 600 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listener_matches_launch_contract() {
        let listener = ListenerConfig::default();
        assert_eq!(listener.host, "0.0.0.0");
        assert_eq!(listener.port, 5000);
        assert_eq!(listener.workers, 4);
        assert_eq!(listener.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn empty_config_file_is_valid() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.port, 5000);
        assert_eq!(config.limits.max_upload_mb, 200);
        assert_eq!(config.compression.gs_timeout_secs, 60);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [listener]
            port = 8080

            [limits]
            max_upload_mb = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.listener.workers, 4);
        assert_eq!(config.limits.max_upload_bytes(), 50 * 1024 * 1024);
        assert_eq!(config.compression.min_dpi, 72);
    }
}
