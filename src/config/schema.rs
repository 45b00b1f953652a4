//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::middleware::diagnostics::X_REQUEST_ID;

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Install the diagnostics middleware (request id + timing headers).
    pub extended: bool,

    /// Strip trailing slashes from request paths before prefix matching.
    pub ignore_trailing_slash: bool,

    /// Diagnostics middleware settings.
    pub diagnostics: DiagnosticsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            extended: false,
            ignore_trailing_slash: true,
            diagnostics: DiagnosticsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Diagnostics middleware configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Header carrying the correlation id on request and response.
    pub request_id_header: String,

    /// Value of the `x-powered-by` response header.
    pub powered_by: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            request_id_header: X_REQUEST_ID.to_string(),
            powered_by: "lambda-router".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
