//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check header names and values are usable on a response
//! - Check the log level is one the subscriber understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use http::header::{HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::schema::RouterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("diagnostics.request_id_header {0:?} is not a valid header name")]
    InvalidHeaderName(String),

    #[error("diagnostics.powered_by {0:?} must be a non-empty header value")]
    InvalidPoweredBy(String),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let header = &config.diagnostics.request_id_header;
    if HeaderName::from_bytes(header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName(header.clone()));
    }

    let powered_by = &config.diagnostics.powered_by;
    if powered_by.trim().is_empty() || HeaderValue::from_str(powered_by).is_err() {
        errors.push(ValidationError::InvalidPoweredBy(powered_by.clone()));
    }

    let level = &config.observability.log_level;
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.diagnostics.request_id_header = "bad header".into();
        config.diagnostics.powered_by = "  ".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidHeaderName("bad header".into()),
                ValidationError::InvalidPoweredBy("  ".into()),
                ValidationError::InvalidLogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = RouterConfig::default();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
