//! Observability subsystem.
//!
//! Every request event is written to stdout through `tracing`; the
//! `TraceLayer` in the HTTP stack adds one span per request and the
//! `x-request-id` ties the two together.

pub mod logging;

pub use logging::init_logging;
