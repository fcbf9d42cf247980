//! HTTP server setup and the echo handler.
//!
//! # Responsibilities
//! - Create the Axum Router with its single `POST /` route
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve on a bound listener until shutdown is signalled

use std::future::Future;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::DefaultBodyLimit,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{self, PayloadError, RequestEvent, UuidRequestId};
use crate::http::response::ContentLengthEcho;

/// Errors surfaced by [`EchoServer::run`].
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The diagnostic echo server.
pub struct EchoServer {
    router: Router,
    config: ServerConfig,
}

impl EchoServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig) -> Router {
        Router::new()
            .route("/", post(content_length_handler))
            .layer(DefaultBodyLimit::disable())
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request::X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(request::X_REQUEST_ID))
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.limits.request_timeout_secs))),
            )
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` completes.
    ///
    /// In-flight requests are allowed to finish once shutdown begins.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `POST /`: log the JSON body and echo the declared `Content-Length`.
async fn content_length_handler(
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ContentLengthEcho>, PayloadError> {
    let request_id = request::request_id(&headers);
    let content_length = request::declared_content_length(&headers);

    let event = match RequestEvent::from_parts(content_length, &body) {
        Ok(event) => event,
        Err(e) => {
            let PayloadError::MalformedJson { source, raw } = &e;
            tracing::warn!(
                request_id = %request_id,
                error = %source,
                raw = %raw,
                "Rejecting malformed JSON body"
            );
            return Err(e);
        }
    };

    event.log(request_id);
    Ok(Json(ContentLengthEcho::from(&event)))
}
