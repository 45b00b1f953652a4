//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup):
//!     App::get/post/.../route → RouteTable
//!     App::use_all/use_at     → MiddlewareRegistry
//!     App::on_error           → ErrorHandler
//!     App::build              → Dispatcher (sealed, Arc-shared)
//!
//! Invocation:
//!     Request → Dispatcher::dispatch → Response
//! ```
//!
//! # Design Decisions
//! - Build once, read many: nothing is registered after `build`
//! - One invocation owns its Context; nothing is shared between requests

pub mod app;
pub mod context;
pub mod dispatcher;

pub use app::App;
pub use context::Context;
pub use dispatcher::{Dispatcher, ErrorHandler};
