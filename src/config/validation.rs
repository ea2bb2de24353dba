//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Validation is a pure
//! function over the config and reports every problem it finds, not just
//! the first, so a broken deployment can be fixed in one pass.

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic configuration problem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.workers must be at least 1")]
    NoWorkers,

    #[error("limits.max_upload_mb must be at least 1")]
    UploadLimitTooSmall,

    #[error("compression.gs_timeout_secs must be at least 1")]
    GsTimeoutTooSmall,

    #[error("compression.min_dpi must be at least 1")]
    MinDpiTooSmall,

    #[error("compression.max_iterations must be at least 1")]
    NoIterations,

    #[error("timeouts.request_secs must be at least 1")]
    RequestTimeoutTooSmall,

    #[error("cors.allowed_origins entry {0:?} is not a valid origin")]
    BadCorsOrigin(String),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    BadMetricsAddress(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.workers == 0 {
        errors.push(ValidationError::NoWorkers);
    }
    if config.limits.max_upload_mb == 0 {
        errors.push(ValidationError::UploadLimitTooSmall);
    }
    if config.compression.gs_timeout_secs == 0 {
        errors.push(ValidationError::GsTimeoutTooSmall);
    }
    if config.compression.min_dpi == 0 {
        errors.push(ValidationError::MinDpiTooSmall);
    }
    if config.compression.max_iterations == 0 {
        errors.push(ValidationError::NoIterations);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeoutTooSmall);
    }

    for origin in &config.cors.allowed_origins {
        if origin.is_empty() || axum::http::HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::BadCorsOrigin(origin.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::BadMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
