//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (registration, dispatch outcome, failures)
//!     → logging.rs (subscriber: env filter + fmt layer)
//!
//! Per request, when `extended` is set:
//!     → middleware::diagnostics (request id, timing headers)
//! ```

pub mod logging;
