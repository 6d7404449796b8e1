//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and the sink traits it routes into so
//! downstream consumers can depend on this module directly.

pub mod dispatcher;
pub mod sinks;

pub use dispatcher::Dispatcher;
pub use sinks::{ClosedSink, ErrorSink, HandlerError, PresentationSink};
