//! Response bodies.
//!
//! Success is always `{"Content-Length": "<declared value>"}`. Failures carry
//! `{"error": "<message>"}` with a 4xx status, never a 200.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::{PayloadError, RequestEvent};

/// Echo of the declared request length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLengthEcho {
    #[serde(rename = "Content-Length")]
    pub content_length: String,
}

impl From<&RequestEvent> for ContentLengthEcho {
    fn from(event: &RequestEvent) -> Self {
        Self {
            content_length: event.content_length.clone(),
        }
    }
}

/// Body of every error response produced by the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for PayloadError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
