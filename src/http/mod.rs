//! Request/response records and their parsing helpers.
//!
//! # Data Flow
//! ```text
//! invocation payload (JSON)
//!     → request.rs (Request: method, raw path, raw query, headers)
//!     → query.rs (query + cookie maps, percent decoding)
//!     → [dispatcher runs the chain]
//!     → response.rs (Response: status, headers, body)
//! ```
//!
//! # Design Decisions
//! - Records mirror the external payload shape; no transport types leak in
//! - Decoding failures degrade to the raw string, never to an error

pub mod query;
pub mod request;
pub mod response;

pub use query::{decode_component, parse_cookie, parse_query};
pub use request::Request;
pub use response::{Response, JSON_CONTENT_TYPE};
