//! Telemetry Echo Server Library
//!
//! A diagnostic HTTP server for telemetry-client development. It accepts
//! `POST /` with a JSON body, logs the payload to stdout, and answers with
//! the request's declared `Content-Length`:
//!
//! ```text
//! POST / {"a": 1}            200 {"Content-Length": "8"}
//! Content-Length: 8    ───▶
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServerConfig;
pub use http::EchoServer;
pub use lifecycle::Shutdown;
