//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware, `POST /` handler)
//!     → request.rs (declared Content-Length, JSON body, request ID)
//!     → log the request event
//!     → response.rs (echo body or 400 error body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestEvent, PayloadError, DEFAULT_CONTENT_LENGTH, X_REQUEST_ID};
pub use response::{ContentLengthEcho, ErrorBody};
pub use server::{EchoServer, ServerError};
