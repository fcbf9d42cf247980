//! Request event extraction.
//!
//! # Responsibilities
//! - Capture the declared `Content-Length` header verbatim
//! - Parse the body as untyped JSON
//! - Tag every request with an `x-request-id`
//!
//! The declared length is never compared with the bytes actually received.

use axum::http::{header, HeaderMap, HeaderName, Request};
use serde_json::Value;
use thiserror::Error;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Value reported when the client sends no `Content-Length` header.
pub const DEFAULT_CONTENT_LENGTH: &str = "0";

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Errors raised while turning a request body into a [`RequestEvent`].
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body is non-empty and not valid JSON.
    #[error("malformed JSON body: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
        /// Body as received, lossily decoded for logging.
        raw: String,
    },
}

/// One inbound POST, alive for a single request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEvent {
    /// `Content-Length` header as sent, or [`DEFAULT_CONTENT_LENGTH`].
    pub content_length: String,
    /// Parsed body; `None` when the body was empty.
    pub body: Option<Value>,
}

impl RequestEvent {
    /// Build an event from the captured header and the raw body bytes.
    pub fn from_parts(content_length: String, body: &[u8]) -> Result<Self, PayloadError> {
        // JSON whitespace only; form feed and friends fall through to the parser.
        if body.iter().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
            return Ok(Self {
                content_length,
                body: None,
            });
        }

        let value = serde_json::from_slice(body).map_err(|source| PayloadError::MalformedJson {
            source,
            raw: String::from_utf8_lossy(body).into_owned(),
        })?;

        Ok(Self {
            content_length,
            body: Some(value),
        })
    }

    /// Write the event to the diagnostic log.
    pub fn log(&self, request_id: &str) {
        match &self.body {
            Some(value) => tracing::info!(
                request_id = %request_id,
                content_length = %self.content_length,
                body = %value,
                "Received payload"
            ),
            None => tracing::info!(
                request_id = %request_id,
                content_length = %self.content_length,
                "Received empty payload"
            ),
        }
    }
}

/// The `Content-Length` header exactly as the client declared it.
pub fn declared_content_length(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_LENGTH)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_else(|| DEFAULT_CONTENT_LENGTH.to_string())
}

/// Request id of an already-tagged request, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Generates UUID v4 request ids for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_content_length_defaults_to_zero() {
        assert_eq!(declared_content_length(&HeaderMap::new()), "0");
    }

    #[test]
    fn test_content_length_is_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0008"));
        assert_eq!(declared_content_length(&headers), "0008");
    }

    #[test]
    fn test_event_with_json_body() {
        let event = RequestEvent::from_parts("8".into(), br#"{"a": 1}"#).unwrap();
        assert_eq!(event.content_length, "8");
        assert_eq!(event.body, Some(json!({"a": 1})));
    }

    #[test]
    fn test_event_accepts_any_json_value() {
        let event = RequestEvent::from_parts("4".into(), b"null").unwrap();
        assert_eq!(event.body, Some(Value::Null));

        let event = RequestEvent::from_parts("9".into(), b"[1,\"x\"]").unwrap();
        assert_eq!(event.body, Some(json!([1, "x"])));
    }

    #[test]
    fn test_empty_body_has_no_value() {
        let event = RequestEvent::from_parts("0".into(), b"").unwrap();
        assert_eq!(event.body, None);

        let event = RequestEvent::from_parts("4".into(), b" \t\r\n").unwrap();
        assert_eq!(event.body, None);
    }

    #[test]
    fn test_form_feed_only_body_is_malformed() {
        let err = RequestEvent::from_parts("1".into(), b"\x0c").unwrap_err();
        assert!(matches!(err, PayloadError::MalformedJson { .. }));
    }

    #[test]
    fn test_malformed_body_keeps_raw_text() {
        let err = RequestEvent::from_parts("6".into(), br#"{"a":}"#).unwrap_err();
        let PayloadError::MalformedJson { raw, .. } = &err;
        assert_eq!(raw, r#"{"a":}"#);
        assert!(err.to_string().starts_with("malformed JSON body"));
    }

    #[test]
    fn test_request_id_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }

    #[test]
    fn test_generated_request_id_is_uuid() {
        let request = Request::new(());
        let id = UuidRequestId.make_request_id(&request).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(text).is_ok());
    }
}
