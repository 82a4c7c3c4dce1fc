//! # Store Errors
//!
//! Every failure that crosses the store boundary is one of two things:
//!
//! - a [`RequestError`]: the transport or the server refused the request. These are
//!   recorded in the store under the key that triggered them and handed back to
//!   callers of mutations.
//! - a [`StoreError`]: what a [`StoreClient`](crate::framework::StoreClient) call
//!   returns. Selectors only ever see the channel variants; mutations may also see
//!   [`StoreError::Request`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Code used when the request never produced an HTTP response.
pub const FETCH_ERROR: &str = "fetch_error";

/// Code used when a response body could not be decoded.
pub const INVALID_JSON: &str = "invalid_json";

/// Error body as returned by the REST API: `{ code, message, data }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RequestError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

/// Coarse classification of a [`RequestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 404 on the addressed resource.
    NotFound,
    /// Any other 4xx. Surfaced exactly like `Request`.
    Validation,
    /// Network failures, 5xx, undecodable responses.
    Request,
}

impl RequestError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: Value::Null,
        }
    }

    /// Attaches an HTTP status under `data.status`, keeping any other data fields.
    pub fn with_status(mut self, status: u16) -> Self {
        match &mut self.data {
            Value::Object(map) => {
                map.insert("status".to_string(), Value::from(status));
            }
            _ => self.data = serde_json::json!({ "status": status }),
        }
        self
    }

    /// Generic error for a request that failed before a response arrived.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FETCH_ERROR, message)
    }

    pub fn status(&self) -> Option<u16> {
        self.data
            .get("status")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status() {
            Some(404) => ErrorKind::NotFound,
            Some(status) if (400..500).contains(&status) => ErrorKind::Validation,
            _ => ErrorKind::Request,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Errors returned by [`StoreClient`](crate::framework::StoreClient) calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),
}

impl StoreError {
    /// The underlying request error, if this is one.
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            StoreError::Request(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_rest_error_body() {
        let body = json!({
            "code": "rest_invalid_param",
            "message": "Invalid parameter(s): name",
            "data": { "status": 400, "params": { "name": "required" } }
        });
        let err: RequestError = serde_json::from_value(body).unwrap();
        assert_eq!(err.code, "rest_invalid_param");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_deserializes_without_data() {
        let err: RequestError =
            serde_json::from_value(json!({ "code": "x", "message": "y" })).unwrap();
        assert_eq!(err.data, Value::Null);
        assert_eq!(err.kind(), ErrorKind::Request);
    }

    #[test]
    fn test_with_status_keeps_existing_data() {
        let mut err = RequestError::new("woocommerce_rest_product_invalid_id", "Invalid ID.");
        err.data = json!({ "resource_id": 9 });
        let err = err.with_status(404);
        assert!(err.is_not_found());
        assert_eq!(err.data["resource_id"], 9);
    }

    #[test]
    fn test_network_error_is_request_kind() {
        let err = RequestError::network("connection refused");
        assert_eq!(err.code, FETCH_ERROR);
        assert_eq!(err.kind(), ErrorKind::Request);
        assert_eq!(err.to_string(), "fetch_error: connection refused");
    }
}
