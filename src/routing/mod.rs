//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at registration):
//!     "/users/:id"
//!     → path.rs (normalize, split into segments)
//!     → matcher.rs (Static / Param tokens)
//!     → router.rs (append to RouteTable)
//!
//! Incoming Request:
//!     raw path
//!     → path.rs (canonical path + segments)
//!     → router.rs (scan in registration order)
//!     → matcher.rs (segment-by-segment comparison)
//!     → Found { route, params } | MethodNotAllowed(methods) | NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable at dispatch time
//! - No regex, no wildcards: token count must equal segment count
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod path;
pub mod router;

pub use matcher::{match_tokens, tokenize, Token};
pub use path::{normalize, split};
pub use router::{Route, RouteMatch, RouteTable};
